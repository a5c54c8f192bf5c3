//! Filter expressions.
//!
//! A [`Q`] names fields symbolically. Compilers resolve the names to column
//! references when rendering, so one expression works for every dialect and
//! every table alias.

use crate::error::Result;
use crate::value::{SqlValue, ToSqlValue};

/// Comparison operators usable in a [`Lookup::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }
}

/// The test applied to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// `field <op> ?`
    Compare(CompareOp, SqlValue),
    /// `field IS NULL`, or `IS NOT NULL` when false.
    IsNull(bool),
    /// `field IN (?, …)`
    In(Vec<SqlValue>),
    /// `field LIKE ?`
    Like(String),
    /// `field BETWEEN ? AND ?`
    Range(SqlValue, SqlValue),
}

/// A rendered-on-demand boolean expression over model fields.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Lookup { field: String, lookup: Lookup },
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    Not(Box<FilterExpr>),
}

/// Builder for [`FilterExpr`].
///
/// ```
/// use oxide_orm::Q;
///
/// let filter = Q::eq("status", "active").and(Q::gt("age", 18).or(Q::is_null("age")));
/// let (sql, params) = filter
///     .into_expr()
///     .to_sql(&|field: &str| Ok(field.to_string()), "?")?;
///
/// assert_eq!(sql, "status = ? AND (age > ? OR age IS NULL)");
/// assert_eq!(params.len(), 2);
/// # Ok::<(), oxide_orm::OrmError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Q(FilterExpr);

impl Q {
    fn lookup(field: &str, lookup: Lookup) -> Self {
        Self(FilterExpr::Lookup {
            field: field.to_string(),
            lookup,
        })
    }

    fn compare(field: &str, op: CompareOp, value: impl ToSqlValue) -> Self {
        Self::lookup(field, Lookup::Compare(op, value.to_sql_value()))
    }

    pub fn eq(field: &str, value: impl ToSqlValue) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    pub fn ne(field: &str, value: impl ToSqlValue) -> Self {
        Self::compare(field, CompareOp::Ne, value)
    }

    pub fn gt(field: &str, value: impl ToSqlValue) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    pub fn gte(field: &str, value: impl ToSqlValue) -> Self {
        Self::compare(field, CompareOp::Gte, value)
    }

    pub fn lt(field: &str, value: impl ToSqlValue) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    pub fn lte(field: &str, value: impl ToSqlValue) -> Self {
        Self::compare(field, CompareOp::Lte, value)
    }

    pub fn is_null(field: &str) -> Self {
        Self::lookup(field, Lookup::IsNull(true))
    }

    pub fn is_not_null(field: &str) -> Self {
        Self::lookup(field, Lookup::IsNull(false))
    }

    /// Membership test. An empty list matches nothing.
    pub fn is_in<V: ToSqlValue>(field: &str, values: impl IntoIterator<Item = V>) -> Self {
        let values = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        Self::lookup(field, Lookup::In(values))
    }

    /// `LIKE` with a caller-supplied pattern.
    pub fn like(field: &str, pattern: impl Into<String>) -> Self {
        Self::lookup(field, Lookup::Like(pattern.into()))
    }

    /// Substring match.
    pub fn contains(field: &str, needle: &str) -> Self {
        Self::like(field, format!("%{needle}%"))
    }

    /// Inclusive range.
    pub fn between(field: &str, low: impl ToSqlValue, high: impl ToSqlValue) -> Self {
        Self::lookup(field, Lookup::Range(low.to_sql_value(), high.to_sql_value()))
    }

    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self.0 {
            FilterExpr::And(mut items) => {
                items.push(other.0);
                Self(FilterExpr::And(items))
            }
            expr => Self(FilterExpr::And(vec![expr, other.0])),
        }
    }

    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self.0 {
            FilterExpr::Or(mut items) => {
                items.push(other.0);
                Self(FilterExpr::Or(items))
            }
            expr => Self(FilterExpr::Or(vec![expr, other.0])),
        }
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self(FilterExpr::Not(Box::new(self.0)))
    }

    #[must_use]
    pub fn into_expr(self) -> FilterExpr {
        self.0
    }
}

impl FilterExpr {
    /// Renders the expression with `column` resolving field names and
    /// `placeholder` standing in for each parameter, in parameter order.
    ///
    /// Nested `AND`/`OR` groups are parenthesized; the top level is not.
    ///
    /// # Errors
    ///
    /// Returns whatever `column` returns for an unknown field.
    pub fn to_sql<F>(&self, column: &F, placeholder: &str) -> Result<(String, Vec<SqlValue>)>
    where
        F: Fn(&str) -> Result<String>,
    {
        let mut params = Vec::new();
        let sql = self.render(column, placeholder, &mut params)?;
        Ok((sql, params))
    }

    fn render<F>(&self, column: &F, ph: &str, params: &mut Vec<SqlValue>) -> Result<String>
    where
        F: Fn(&str) -> Result<String>,
    {
        let sql = match self {
            Self::Lookup { field, lookup } => {
                let col = column(field)?;
                match lookup {
                    Lookup::Compare(op, value) => {
                        params.push(value.clone());
                        format!("{col} {} {ph}", op.as_sql())
                    }
                    Lookup::IsNull(true) => format!("{col} IS NULL"),
                    Lookup::IsNull(false) => format!("{col} IS NOT NULL"),
                    Lookup::In(values) if values.is_empty() => String::from("1 = 0"),
                    Lookup::In(values) => {
                        params.extend(values.iter().cloned());
                        format!("{col} IN ({})", vec![ph; values.len()].join(", "))
                    }
                    Lookup::Like(pattern) => {
                        params.push(SqlValue::Text(pattern.clone()));
                        format!("{col} LIKE {ph}")
                    }
                    Lookup::Range(low, high) => {
                        params.push(low.clone());
                        params.push(high.clone());
                        format!("{col} BETWEEN {ph} AND {ph}")
                    }
                }
            }
            Self::And(items) => Self::join(items, " AND ", column, ph, params)?,
            Self::Or(items) => Self::join(items, " OR ", column, ph, params)?,
            Self::Not(inner) => format!("NOT ({})", inner.render(column, ph, params)?),
        };
        Ok(sql)
    }

    fn join<F>(
        items: &[Self],
        sep: &str,
        column: &F,
        ph: &str,
        params: &mut Vec<SqlValue>,
    ) -> Result<String>
    where
        F: Fn(&str) -> Result<String>,
    {
        let parts = items
            .iter()
            .map(|item| {
                let sql = item.render(column, ph, params)?;
                Ok(match item {
                    Self::And(_) | Self::Or(_) => format!("({sql})"),
                    _ => sql,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join(sep))
    }
}
