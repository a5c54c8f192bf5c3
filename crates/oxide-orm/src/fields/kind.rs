//! Logical field kinds.

/// The logical type of a model field.
///
/// Backends branch on the kind when they decode driver values, so the
/// predicates below stand in for per-type checks on field classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Auto-incrementing integer primary key.
    Auto,
    /// 16-bit integer.
    SmallInteger,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    BigInteger,
    /// Binary floating point number.
    Float,
    /// Fixed precision decimal.
    Decimal {
        /// Maximum number of digits.
        max_digits: u8,
        /// Number of decimal places.
        decimal_places: u8,
    },
    /// Boolean, never null.
    Boolean,
    /// Boolean that also admits null.
    NullBoolean,
    /// Bounded character data.
    Char {
        /// Maximum length in characters.
        max_length: u32,
    },
    /// Unbounded text.
    Text,
    /// Email address stored as text.
    Email,
    /// URL stored as text.
    Url,
    /// Calendar date.
    Date,
    /// Date and time of day.
    DateTime,
    /// Time of day.
    Time,
}

impl FieldKind {
    /// Returns the generic SQL type for this kind.
    #[must_use]
    pub const fn sql_type(self) -> &'static str {
        match self {
            Self::Auto | Self::Integer => "INTEGER",
            Self::SmallInteger => "SMALLINT",
            Self::BigInteger => "BIGINT",
            Self::Float => "REAL",
            Self::Decimal { .. } => "DECIMAL",
            Self::Boolean | Self::NullBoolean => "BOOLEAN",
            Self::Char { .. } | Self::Email | Self::Url => "VARCHAR",
            Self::Text => "TEXT",
            Self::Date => "DATE",
            Self::DateTime => "TIMESTAMP",
            Self::Time => "TIME",
        }
    }

    /// Whether the empty string is a meaningful value for this kind.
    ///
    /// Only the character kinds store `""`; every other kind represents
    /// absence with null.
    #[must_use]
    pub const fn empty_strings_allowed(self) -> bool {
        matches!(self, Self::Char { .. } | Self::Text | Self::Email | Self::Url)
    }

    /// Boolean and null-boolean fields.
    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self, Self::Boolean | Self::NullBoolean)
    }

    /// Fixed precision decimal fields.
    #[must_use]
    pub const fn is_decimal(self) -> bool {
        matches!(self, Self::Decimal { .. })
    }

    /// Date-only fields. Date-time fields are not date fields here.
    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::Date)
    }

    /// Date-time fields.
    #[must_use]
    pub const fn is_datetime(self) -> bool {
        matches!(self, Self::DateTime)
    }

    /// Time-only fields.
    #[must_use]
    pub const fn is_time(self) -> bool {
        matches!(self, Self::Time)
    }

    /// Decimal places for decimal kinds.
    #[must_use]
    pub const fn decimal_places(self) -> Option<u8> {
        match self {
            Self::Decimal { decimal_places, .. } => Some(decimal_places),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_strings_allowed() {
        assert!(FieldKind::Char { max_length: 10 }.empty_strings_allowed());
        assert!(FieldKind::Text.empty_strings_allowed());
        assert!(FieldKind::Email.empty_strings_allowed());
        assert!(!FieldKind::Integer.empty_strings_allowed());
        assert!(!FieldKind::Boolean.empty_strings_allowed());
        assert!(!FieldKind::Date.empty_strings_allowed());
    }

    #[test]
    fn test_temporal_predicates_are_disjoint() {
        assert!(FieldKind::DateTime.is_datetime());
        assert!(!FieldKind::DateTime.is_date());
        assert!(!FieldKind::DateTime.is_time());
        assert!(FieldKind::Date.is_date());
        assert!(FieldKind::Time.is_time());
    }

    #[test]
    fn test_boolean_kinds() {
        assert!(FieldKind::Boolean.is_boolean());
        assert!(FieldKind::NullBoolean.is_boolean());
        assert!(!FieldKind::Integer.is_boolean());
    }

    #[test]
    fn test_decimal_places() {
        let kind = FieldKind::Decimal {
            max_digits: 5,
            decimal_places: 2,
        };
        assert!(kind.is_decimal());
        assert_eq!(kind.decimal_places(), Some(2));
        assert_eq!(FieldKind::Float.decimal_places(), None);
    }
}
