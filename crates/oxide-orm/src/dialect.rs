//! SQL dialects.
//!
//! A [`Dialect`] tells [`SqlCompiler`](crate::SqlCompiler) how to quote
//! identifiers, how to write a bind placeholder, and whether row bounds can
//! be expressed with `LIMIT`/`OFFSET`.

/// Dialect-specific rendering rules.
pub trait Dialect {
    /// Short name, used in log fields.
    fn name(&self) -> &'static str;

    /// Character wrapped around quoted identifiers.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Text emitted for each bound parameter.
    fn parameter_placeholder(&self) -> &'static str {
        "?"
    }

    /// Whether `LIMIT n OFFSET m` is understood. Compilers leave row bounds
    /// out of the SQL when it is not.
    fn supports_limit_offset(&self) -> bool {
        true
    }

    /// Quotes `name`, doubling any quote character inside it.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }
}

/// ANSI quoting with `?` placeholders and `LIMIT`/`OFFSET`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}
