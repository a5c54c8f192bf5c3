//! The Oracle query compiler.
//!
//! [`OracleCompiler`] wraps any [`QueryCompiler`] and overrides three
//! things: row bounds, which Oracle cannot express with `LIMIT`/`OFFSET`,
//! become a `ROW_NUMBER()` window filtered by an outer query; and rows read
//! back from the driver are normalized with [`convert_value`]. Everything
//! else is delegated to the wrapped compiler.

use std::sync::Arc;

use oxide_orm::{Field, OrmError, Query, QueryCompiler, SqlValue};
use tracing::{debug, trace};

use crate::convert::convert_value;
use crate::driver::OracleValue;
use crate::error::Result;
use crate::options::OracleOptions;

/// A query compiler specialized for Oracle.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use oxide_orm::{Field, ModelMeta, Query, QueryCompiler, SqlCompiler};
/// use oxide_sql_oracle::{OracleDialect, get_compiler};
///
/// let meta = Arc::new(
///     ModelMeta::new("books")
///         .field(Field::auto("id"))
///         .field(Field::char("title", 200)),
/// );
/// let base = SqlCompiler::new(Query::new(meta), OracleDialect::new());
/// let mut compiler = get_compiler::<SqlCompiler<OracleDialect>>().wrap(base);
///
/// compiler.set_limits(Some(20), Some(30));
/// let (sql, _) = compiler.as_sql(true, false)?;
/// assert_eq!(
///     sql,
///     "SELECT * FROM (SELECT (ROW_NUMBER() OVER (ORDER BY \"BOOKS\".\"ID\")) AS \"RN\", \
///      \"BOOKS\".\"ID\", \"BOOKS\".\"TITLE\" FROM \"BOOKS\") WHERE rn > 20 AND rn <= 30"
/// );
/// # Ok::<(), oxide_orm::OrmError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OracleCompiler<C> {
    base: C,
    options: Arc<OracleOptions>,
}

impl<C: QueryCompiler> OracleCompiler<C> {
    /// Wraps `base`. Prefer [`OracleAdapter::wrap`](crate::OracleAdapter::wrap),
    /// which shares the adapter's already validated options; `options` is
    /// used here as given. See [`OracleOptions::validate`].
    #[must_use]
    pub const fn new(base: C, options: Arc<OracleOptions>) -> Self {
        Self { base, options }
    }

    /// The wrapped compiler.
    #[must_use]
    pub const fn base(&self) -> &C {
        &self.base
    }

    /// Unwraps the base compiler.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.base
    }

    #[must_use]
    pub fn options(&self) -> &OracleOptions {
        &self.options
    }

    /// Decodes a raw driver row.
    ///
    /// The leading values belong to the extra selects and are converted
    /// without a field; the remaining values are paired with `fields` in
    /// order. Pairing stops at whichever runs out first, so surplus values
    /// or fields are dropped silently.
    ///
    /// # Errors
    ///
    /// Propagates [`convert_value`] failures.
    pub fn resolve_columns(&self, row: Vec<OracleValue>, fields: &[Field]) -> Result<Vec<SqlValue>> {
        let index_start = self.base.query().extra_select().len();
        let mut values = row.into_iter();

        let mut resolved = values
            .by_ref()
            .take(index_start)
            .map(|value| self.convert_value(value, None))
            .collect::<Result<Vec<_>>>()?;
        for (value, field) in values.zip(fields) {
            resolved.push(self.convert_value(value, Some(field))?);
        }
        Ok(resolved)
    }

    /// Converts a single value. See [`convert_value`].
    ///
    /// # Errors
    ///
    /// Propagates [`convert_value`] failures.
    pub fn convert_value(&self, value: OracleValue, field: Option<&Field>) -> Result<SqlValue> {
        convert_value(value, field, &self.options)
    }

    fn default_ordering(&self) -> oxide_orm::Result<String> {
        let model = self.base.model();
        let first = model
            .fields()
            .first()
            .ok_or_else(|| OrmError::QueryError(format!("model '{}' has no fields", model.db_table())))?;
        Ok(format!(
            "{}.{}",
            self.base.quote_name_unless_alias(model.db_table()),
            self.base.quote_name_unless_alias(first.column())
        ))
    }
}

impl<C: QueryCompiler> QueryCompiler for OracleCompiler<C> {
    fn query(&self) -> &Query {
        self.base.query()
    }

    fn query_mut(&mut self) -> &mut Query {
        self.base.query_mut()
    }

    fn quote_name_unless_alias(&self, name: &str) -> String {
        self.base.quote_name_unless_alias(name)
    }

    fn pre_sql_setup(&mut self) -> oxide_orm::Result<()> {
        self.base.pre_sql_setup()
    }

    fn get_columns(&mut self, with_aliases: bool) -> oxide_orm::Result<Vec<String>> {
        self.base.get_columns(with_aliases)
    }

    fn get_ordering(&self) -> oxide_orm::Result<Vec<String>> {
        self.base.get_ordering()
    }

    /// Builds the SQL, windowing bounded queries with `ROW_NUMBER()`.
    ///
    /// Unbounded queries, or any query compiled with `with_limits` false,
    /// are returned exactly as the base compiler renders them without
    /// limits. Bounds are inlined as integer literals, so the parameters
    /// are the base compiler's, unchanged.
    fn as_sql(
        &mut self,
        with_limits: bool,
        with_col_aliases: bool,
    ) -> oxide_orm::Result<(String, Vec<SqlValue>)> {
        let do_offset = with_limits && self.base.query().has_limits();
        if !do_offset {
            return self.base.as_sql(false, with_col_aliases);
        }

        // columns before ordering: the setup resolves what ordering refers to
        self.base.pre_sql_setup()?;
        let out_cols = self.base.get_columns(false)?;
        let ordering = self.base.get_ordering()?;

        // ROW_NUMBER() always needs an ORDER BY
        let rn_orderby = if ordering.is_empty() {
            self.default_ordering()?
        } else {
            ordering.join(", ")
        };

        let alias = self.options.row_number_alias.clone();
        self.base
            .query_mut()
            .extra_select_mut()
            .insert(alias.as_str(), format!("ROW_NUMBER() OVER (ORDER BY {rn_orderby})"));
        let (sql, params) = self.base.as_sql(false, true)?;

        let low = self.base.query().low_mark();
        let high = self.base.query().high_mark();
        trace!(
            low_mark = low,
            high_mark = ?high,
            columns = out_cols.len(),
            ordering = %rn_orderby,
            "windowing query with ROW_NUMBER()"
        );

        let mut result = vec![format!("SELECT * FROM ({sql})")];
        result.push(format!("WHERE {alias} > {low}"));
        if let Some(high) = high {
            result.push(format!("AND {alias} <= {high}"));
        }
        Ok((result.join(" "), params))
    }

    /// Sets row bounds and reserves the row number column.
    ///
    /// The placeholder is added now because code inspecting the extra
    /// selects may run before compilation; its real expression depends on
    /// the final ordering and is filled in by [`Self::as_sql`].
    fn set_limits(&mut self, low: Option<u64>, high: Option<u64>) {
        self.base.set_limits(low, high);
        let alias = self.options.row_number_alias.as_str();
        debug!(?low, ?high, alias, "reserving row number column");
        self.base.query_mut().extra_select_mut().insert(alias, "1");
    }

    fn clear_limits(&mut self) {
        self.base.clear_limits();
        let alias = self.options.row_number_alias.as_str();
        if self.base.query_mut().extra_select_mut().remove(alias).is_some() {
            debug!(alias, "dropped row number column");
        }
    }
}
