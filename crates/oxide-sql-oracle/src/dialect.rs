//! Oracle dialect implementation.

use oxide_orm::Dialect;

/// Oracle dialect.
///
/// Unquoted Oracle identifiers fold to upper case, so quoting upper-cases
/// the name first; a quoted `"USERS"` then matches an unquoted `users`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OracleDialect;

impl OracleDialect {
    /// Creates a new Oracle dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn supports_limit_offset(&self) -> bool {
        false // rows are windowed with ROW_NUMBER() instead
    }

    /// Upper-cases and quotes `name`, doubling embedded quotes. A name that
    /// is already a well-formed quoted identifier is kept as written.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let already_quoted = name
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
            .is_some_and(|inner| !inner.contains(quote));
        if already_quoted {
            return name.to_string();
        }
        let escaped = name
            .to_uppercase()
            .replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }
}
