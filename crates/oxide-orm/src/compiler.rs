//! Query compilation.
//!
//! [`QueryCompiler`] is the seam backends build on: it exposes the query
//! state plus the individual compilation steps, so a backend can wrap a
//! compiler, adjust the state between steps, and delegate the rest.
//! [`SqlCompiler`] is the reference implementation for ANSI-style SQL.

use std::collections::HashSet;

use tracing::trace;

use crate::dialect::{Dialect, GenericDialect};
use crate::error::{OrmError, Result};
use crate::fields::Field;
use crate::model::ModelMeta;
use crate::query::Query;
use crate::value::SqlValue;

/// Compiles a [`Query`] into SQL text and bind parameters.
pub trait QueryCompiler {
    /// The query state being compiled.
    fn query(&self) -> &Query;

    /// Mutable access to the query state.
    fn query_mut(&mut self) -> &mut Query;

    /// Quotes `name` unless it refers to an extra-select alias.
    fn quote_name_unless_alias(&self, name: &str) -> String;

    /// Resolves the selected fields. Must run before [`Self::get_columns`].
    ///
    /// # Errors
    ///
    /// Returns [`OrmError::InvalidField`] for a selected name the model
    /// does not declare.
    fn pre_sql_setup(&mut self) -> Result<()>;

    /// Output column expressions, extra selects first.
    ///
    /// # Errors
    ///
    /// Fails if the setup step has not resolved the selection.
    fn get_columns(&mut self, with_aliases: bool) -> Result<Vec<String>>;

    /// Rendered ORDER BY items, without the `ORDER BY` keyword.
    ///
    /// # Errors
    ///
    /// Returns [`OrmError::InvalidField`] for an unknown ordering name.
    fn get_ordering(&self) -> Result<Vec<String>>;

    /// Builds the SQL and its parameters.
    ///
    /// With `with_limits` false, row bounds are left out of the SQL. They
    /// are also left out for dialects without `LIMIT`/`OFFSET`.
    /// With `with_col_aliases` true, duplicate output column names are
    /// aliased so the result can be wrapped in an outer `SELECT *`.
    ///
    /// # Errors
    ///
    /// Propagates failures from the individual compilation steps.
    fn as_sql(&mut self, with_limits: bool, with_col_aliases: bool)
        -> Result<(String, Vec<SqlValue>)>;

    /// Narrows the row window. See [`Query::set_limits`].
    fn set_limits(&mut self, low: Option<u64>, high: Option<u64>) {
        self.query_mut().set_limits(low, high);
    }

    /// Removes any row bounds.
    fn clear_limits(&mut self) {
        self.query_mut().clear_limits();
    }

    /// Metadata of the queried model.
    fn model(&self) -> &ModelMeta {
        self.query().model()
    }
}

/// Reference compiler emitting `SELECT … FROM … WHERE … ORDER BY … LIMIT …`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use oxide_orm::{Field, GenericDialect, ModelMeta, Q, Query, QueryCompiler, SqlCompiler};
///
/// let meta = Arc::new(
///     ModelMeta::new("users")
///         .field(Field::auto("id"))
///         .field(Field::char("name", 100)),
/// );
/// let query = Query::new(meta).filter(Q::eq("name", "Ann")).order_by("-id");
/// let mut compiler = SqlCompiler::new(query, GenericDialect::new());
///
/// let (sql, params) = compiler.as_sql(true, false).unwrap();
/// assert_eq!(
///     sql,
///     "SELECT \"users\".\"id\", \"users\".\"name\" FROM \"users\" \
///      WHERE \"users\".\"name\" = ? ORDER BY \"users\".\"id\" DESC"
/// );
/// assert_eq!(params.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SqlCompiler<D = GenericDialect> {
    query: Query,
    dialect: D,
    select_fields: Option<Vec<Field>>,
}

impl<D: Dialect> SqlCompiler<D> {
    /// Creates a compiler for `query`.
    #[must_use]
    pub const fn new(query: Query, dialect: D) -> Self {
        Self {
            query,
            dialect,
            select_fields: None,
        }
    }

    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Returns the query state.
    #[must_use]
    pub fn into_query(self) -> Query {
        self.query
    }

    fn column_ref(&self, field: &Field) -> String {
        format!(
            "{}.{}",
            self.quote_name_unless_alias(self.query.model().db_table()),
            self.quote_name_unless_alias(field.column())
        )
    }

    fn field_column(&self, name: &str) -> Result<String> {
        self.query
            .model()
            .get_field(name)
            .map(|field| self.column_ref(field))
            .ok_or_else(|| OrmError::InvalidField(name.to_string()))
    }

    fn where_clause(&self) -> Result<Option<(String, Vec<SqlValue>)>> {
        let column = |name: &str| self.field_column(name);
        let placeholder = self.dialect.parameter_placeholder();
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        for filter in self.query.filters() {
            let (sql, filter_params) = filter.to_sql(&column, placeholder)?;
            conditions.push(sql);
            params.extend(filter_params);
        }

        for exclude in self.query.excludes() {
            let (sql, exclude_params) = exclude.to_sql(&column, placeholder)?;
            conditions.push(format!("NOT ({sql})"));
            params.extend(exclude_params);
        }

        if conditions.is_empty() {
            return Ok(None);
        }
        Ok(Some((conditions.join(" AND "), params)))
    }
}

impl<D: Dialect> QueryCompiler for SqlCompiler<D> {
    fn query(&self) -> &Query {
        &self.query
    }

    fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }

    fn quote_name_unless_alias(&self, name: &str) -> String {
        if self.query.extra_select().contains(name) {
            return name.to_string();
        }
        self.dialect.quote_identifier(name)
    }

    fn pre_sql_setup(&mut self) -> Result<()> {
        let model = self.query.model();
        let fields = match self.query.selected() {
            None => model.fields().to_vec(),
            Some(names) => names
                .iter()
                .map(|name| {
                    model
                        .get_field(name)
                        .cloned()
                        .ok_or_else(|| OrmError::InvalidField(name.clone()))
                })
                .collect::<Result<Vec<_>>>()?,
        };
        self.select_fields = Some(fields);
        Ok(())
    }

    fn get_columns(&mut self, with_aliases: bool) -> Result<Vec<String>> {
        let fields = self.select_fields.as_ref().ok_or_else(|| {
            OrmError::QueryError("columns requested before pre_sql_setup".to_string())
        })?;

        let extra = self.query.extra_select();
        let mut result: Vec<String> = extra
            .iter()
            .map(|(alias, sql)| format!("({sql}) AS {}", self.dialect.quote_identifier(alias)))
            .collect();
        let mut col_aliases: HashSet<String> = extra.keys().map(str::to_string).collect();

        for field in fields {
            let column = self.column_ref(field);
            if with_aliases && col_aliases.contains(field.column()) {
                let alias = format!("Col{}", col_aliases.len());
                result.push(format!("{column} AS {alias}"));
                col_aliases.insert(alias);
            } else {
                result.push(column);
                col_aliases.insert(field.column().to_string());
            }
        }
        Ok(result)
    }

    fn get_ordering(&self) -> Result<Vec<String>> {
        self.query
            .ordering()
            .iter()
            .map(|order| {
                let direction = order.direction.as_sql();
                if self.query.extra_select().contains(&order.field) {
                    Ok(format!(
                        "{} {direction}",
                        self.quote_name_unless_alias(&order.field)
                    ))
                } else {
                    Ok(format!("{} {direction}", self.field_column(&order.field)?))
                }
            })
            .collect()
    }

    fn as_sql(
        &mut self,
        with_limits: bool,
        with_col_aliases: bool,
    ) -> Result<(String, Vec<SqlValue>)> {
        self.pre_sql_setup()?;
        let out_cols = self.get_columns(with_col_aliases)?;
        let ordering = self.get_ordering()?;

        let mut result = vec![String::from("SELECT")];
        if self.query.is_distinct() {
            result.push(String::from("DISTINCT"));
        }
        result.push(out_cols.join(", "));
        result.push(format!(
            "FROM {}",
            self.quote_name_unless_alias(self.query.model().db_table())
        ));

        let mut params = Vec::new();
        if let Some((where_sql, where_params)) = self.where_clause()? {
            result.push(format!("WHERE {where_sql}"));
            params = where_params;
        }

        if !ordering.is_empty() {
            result.push(format!("ORDER BY {}", ordering.join(", ")));
        }

        if with_limits && self.dialect.supports_limit_offset() {
            let low = self.query.low_mark();
            if let Some(high) = self.query.high_mark() {
                result.push(format!("LIMIT {}", high.saturating_sub(low)));
            }
            if low > 0 {
                result.push(format!("OFFSET {low}"));
            }
        }

        let sql = result.join(" ");
        trace!(sql = %sql, params = params.len(), dialect = self.dialect.name(), "compiled select");
        Ok((sql, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::query::Q;

    fn users() -> Arc<ModelMeta> {
        Arc::new(
            ModelMeta::new("users")
                .field(Field::auto("id"))
                .field(Field::char("name", 100))
                .field(Field::boolean("is_active")),
        )
    }

    fn compile(query: Query, with_limits: bool) -> Result<(String, Vec<SqlValue>)> {
        SqlCompiler::new(query, GenericDialect::new()).as_sql(with_limits, false)
    }

    #[test]
    fn test_select_all_fields() {
        let (sql, params) = compile(Query::new(users()), true).unwrap();
        assert_eq!(
            sql,
            "SELECT \"users\".\"id\", \"users\".\"name\", \"users\".\"is_active\" FROM \"users\""
        );
        assert!(params.is_empty());
    }

    #[test]
    fn test_filters_and_excludes() {
        let query = Query::new(users())
            .only(&["id"])
            .filter(Q::eq("is_active", true))
            .exclude(Q::eq("name", "root"));
        let (sql, params) = compile(query, true).unwrap();
        assert_eq!(
            sql,
            "SELECT \"users\".\"id\" FROM \"users\" WHERE \"users\".\"is_active\" = ? \
             AND NOT (\"users\".\"name\" = ?)"
        );
        assert_eq!(
            params,
            vec![SqlValue::Bool(true), SqlValue::Text("root".to_string())]
        );
    }

    #[test]
    fn test_limits_rendered_only_when_requested() {
        let mut query = Query::new(users()).only(&["id"]);
        query.set_limits(Some(5), Some(15));

        let (sql, _) = compile(query.clone(), true).unwrap();
        assert_eq!(sql, "SELECT \"users\".\"id\" FROM \"users\" LIMIT 10 OFFSET 5");

        let (sql, _) = compile(query, false).unwrap();
        assert_eq!(sql, "SELECT \"users\".\"id\" FROM \"users\"");
    }

    #[test]
    fn test_extra_select_emitted_first() {
        let query = Query::new(users())
            .only(&["name"])
            .extra("one", "1")
            .order_by("-one");
        let (sql, _) = compile(query, false).unwrap();
        assert_eq!(
            sql,
            "SELECT (1) AS \"one\", \"users\".\"name\" FROM \"users\" ORDER BY one DESC"
        );
    }

    #[test]
    fn test_duplicate_columns_aliased() {
        let query = Query::new(users()).only(&["id", "id"]);
        let mut compiler = SqlCompiler::new(query, GenericDialect::new());
        let (sql, _) = compiler.as_sql(false, true).unwrap();
        assert_eq!(
            sql,
            "SELECT \"users\".\"id\", \"users\".\"id\" AS Col1 FROM \"users\""
        );
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let err = compile(Query::new(users()).order_by("email"), true).unwrap_err();
        assert!(matches!(err, OrmError::InvalidField(name) if name == "email"));

        let err = compile(Query::new(users()).only(&["email"]), true).unwrap_err();
        assert!(matches!(err, OrmError::InvalidField(_)));
    }

    #[test]
    fn test_columns_require_setup() {
        let mut compiler = SqlCompiler::new(Query::new(users()), GenericDialect::new());
        assert!(matches!(
            compiler.get_columns(false),
            Err(OrmError::QueryError(_))
        ));
        compiler.pre_sql_setup().unwrap();
        assert_eq!(compiler.get_columns(false).unwrap().len(), 3);
    }
}
