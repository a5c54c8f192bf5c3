//! Field descriptors for model definitions.
//!
//! A [`Field`] pairs a name with a closed [`FieldKind`] and a few column
//! options. Backends read the kind to decide how a raw driver value maps
//! back to a [`SqlValue`](crate::SqlValue).

mod kind;

pub use kind::FieldKind;

/// Common field options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// Column name override. Defaults to the field name.
    pub db_column: Option<String>,
    /// Whether this is the primary key.
    pub primary_key: bool,
}

impl FieldOptions {
    /// Creates new field options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the db_column option.
    #[must_use]
    pub fn db_column(mut self, value: impl Into<String>) -> Self {
        self.db_column = Some(value.into());
        self
    }

    /// Sets the primary_key option.
    #[must_use]
    pub const fn primary_key(mut self, value: bool) -> Self {
        self.primary_key = value;
        self
    }
}

/// A model field descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    kind: FieldKind,
    options: FieldOptions,
}

impl Field {
    /// Creates a field of the given kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            options: FieldOptions::new(),
        }
    }

    /// Auto-incrementing primary key.
    pub fn auto(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Auto).options(FieldOptions::new().primary_key(true))
    }

    /// Integer field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Float field.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Float)
    }

    /// Decimal field with the given precision.
    pub fn decimal(name: impl Into<String>, max_digits: u8, decimal_places: u8) -> Self {
        Self::new(
            name,
            FieldKind::Decimal {
                max_digits,
                decimal_places,
            },
        )
    }

    /// Boolean field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Nullable boolean field.
    pub fn null_boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::NullBoolean)
    }

    /// Bounded character field.
    pub fn char(name: impl Into<String>, max_length: u32) -> Self {
        Self::new(name, FieldKind::Char { max_length })
    }

    /// Unbounded text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Date field.
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Date-time field.
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    /// Time field.
    pub fn time(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Time)
    }

    /// Sets field options.
    #[must_use]
    pub fn options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// Field name as declared on the model.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column name: the `db_column` override if set, else the field name.
    #[must_use]
    pub fn column(&self) -> &str {
        self.options.db_column.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    #[must_use]
    pub const fn field_options(&self) -> &FieldOptions {
        &self.options
    }

    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.options.primary_key
    }

    #[must_use]
    pub const fn empty_strings_allowed(&self) -> bool {
        self.kind.empty_strings_allowed()
    }

    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        self.kind.is_boolean()
    }

    #[must_use]
    pub const fn is_decimal(&self) -> bool {
        self.kind.is_decimal()
    }

    /// Renders a float with exactly the field's number of decimal places.
    ///
    /// Non-decimal fields render with no fractional digits.
    #[must_use]
    pub fn format_number(&self, value: f64) -> String {
        let places = usize::from(self.kind.decimal_places().unwrap_or(0));
        format!("{value:.places$}")
    }

    /// Renders an integer the same way [`Field::format_number`] renders a
    /// float, without a round trip through binary floating point.
    #[must_use]
    pub fn format_integer(&self, value: i64) -> String {
        match self.kind.decimal_places() {
            Some(places) if places > 0 => {
                format!("{value}.{}", "0".repeat(usize::from(places)))
            }
            _ => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_defaults_to_name() {
        let field = Field::char("username", 150);
        assert_eq!(field.column(), "username");

        let field = Field::char("username", 150).options(FieldOptions::new().db_column("login"));
        assert_eq!(field.name(), "username");
        assert_eq!(field.column(), "login");
    }

    #[test]
    fn test_auto_is_primary_key() {
        assert!(Field::auto("id").is_primary_key());
        assert!(!Field::integer("age").is_primary_key());
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_format_number_uses_decimal_places() {
        let field = Field::decimal("price", 5, 2);
        assert_eq!(field.format_number(3.14), "3.14");
        assert_eq!(field.format_number(3.0), "3.00");
        assert_eq!(field.format_number(2.675_1), "2.68");
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(Field::decimal("price", 5, 2).format_integer(7), "7.00");
        assert_eq!(Field::decimal("qty", 5, 0).format_integer(-7), "-7");
        assert_eq!(Field::integer("age").format_integer(12), "12");
    }
}
