//! Backend configuration.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{OracleError, Result};

/// The date Oracle stores in front of a value that only carries a time.
pub const TIME_SENTINEL: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("invalid sentinel date"),
};

/// Oracle pseudo-columns and the keywords around the row number filter.
const RESERVED_ALIASES: &[&str] = &[
    "rownum",
    "rowid",
    "level",
    "ora_rowscn",
    "sysdate",
    "systimestamp",
    "user",
    "uid",
    "and",
    "or",
    "not",
    "null",
    "select",
    "from",
    "where",
    "order",
    "by",
];

/// Oracle's identifier length limit before 12.2.
const MAX_ALIAS_LEN: usize = 30;

/// Knobs for the Oracle compiler.
///
/// Deserializes from any serde format with missing keys taking their
/// defaults, so it can live in an application's settings file.
///
/// ```
/// use oxide_sql_oracle::OracleOptions;
///
/// let options = OracleOptions::new().row_number_alias("rnum");
/// assert_eq!(options.row_number_alias, "rnum");
/// assert!(options.midnight_as_date);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OracleOptions {
    /// Alias of the `ROW_NUMBER()` column added to paginated queries.
    ///
    /// The outer filter refers to it unquoted while the inner select quotes
    /// it, so it must be a plain lower-case identifier. See
    /// [`OracleOptions::validate`].
    pub row_number_alias: String,
    /// Timestamps on this date decode as a time of day.
    pub time_sentinel: NaiveDate,
    /// Decode exact-midnight timestamps without a field hint as dates.
    pub midnight_as_date: bool,
}

impl Default for OracleOptions {
    fn default() -> Self {
        Self {
            row_number_alias: String::from("rn"),
            time_sentinel: TIME_SENTINEL,
            midnight_as_date: true,
        }
    }
}

impl OracleOptions {
    /// Creates options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row number alias.
    #[must_use]
    pub fn row_number_alias(mut self, value: impl Into<String>) -> Self {
        self.row_number_alias = value.into();
        self
    }

    /// Sets the time sentinel date.
    #[must_use]
    pub const fn time_sentinel(mut self, value: NaiveDate) -> Self {
        self.time_sentinel = value;
        self
    }

    /// Sets the midnight_as_date option.
    #[must_use]
    pub const fn midnight_as_date(mut self, value: bool) -> Self {
        self.midnight_as_date = value;
        self
    }

    /// Checks that the row number alias spells the same column quoted and
    /// unquoted: ASCII lower-case letter first, then lower-case letters,
    /// digits or `_`, at most 30 bytes, and not an Oracle pseudo-column or
    /// a keyword of the outer filter.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::InvalidAlias`] naming the broken rule.
    pub fn validate(&self) -> Result<()> {
        let alias = self.row_number_alias.as_str();
        let reason = match alias.as_bytes() {
            [] => Some("must not be empty"),
            [first, ..] if !first.is_ascii_lowercase() => {
                Some("must start with a lower-case ASCII letter")
            }
            _ if alias.len() > MAX_ALIAS_LEN => Some("must be at most 30 bytes"),
            bytes
                if !bytes
                    .iter()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'_') =>
            {
                Some("may only contain lower-case ASCII letters, digits and '_'")
            }
            _ if RESERVED_ALIASES.contains(&alias) => Some("is reserved by Oracle"),
            _ => None,
        };
        match reason {
            Some(reason) => Err(OracleError::InvalidAlias {
                alias: alias.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}
