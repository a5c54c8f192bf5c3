//! Model metadata.
//!
//! [`ModelMeta`] is the runtime description of a model: its table and its
//! ordered field list. Compilers use it to render column references, and
//! backends use the field order to line raw row values up with fields.

use crate::fields::Field;

/// Table name and ordered fields of a model.
///
/// # Example
///
/// ```
/// use oxide_orm::{Field, ModelMeta};
///
/// let meta = ModelMeta::new("users")
///     .field(Field::auto("id"))
///     .field(Field::char("username", 150))
///     .field(Field::boolean("is_active"));
///
/// assert_eq!(meta.pk().map(Field::name), Some("id"));
/// assert_eq!(meta.fields().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMeta {
    db_table: String,
    fields: Vec<Field>,
}

impl ModelMeta {
    /// Creates metadata for the given table with no fields.
    pub fn new(db_table: impl Into<String>) -> Self {
        Self {
            db_table: db_table.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field. Declaration order is row order.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn db_table(&self) -> &str {
        &self.db_table
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the primary key field, if one is declared.
    #[must_use]
    pub fn pk(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.is_primary_key())
    }

    /// Looks a field up by its declared name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }
}
