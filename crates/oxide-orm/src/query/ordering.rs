//! Ordering terms, written the Django way: `"name"` or `"-name"`.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One `ORDER BY` term over a model field name or an extra-select alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: OrderDirection,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Reads a term; a leading `-` means descending.
    #[must_use]
    pub fn parse(term: &str) -> Self {
        match term.strip_prefix('-') {
            Some(field) => Self::new(field, OrderDirection::Desc),
            None => Self::new(term, OrderDirection::Asc),
        }
    }
}

impl From<&str> for OrderBy {
    fn from(term: &str) -> Self {
        Self::parse(term)
    }
}
