//! Mutable query state shared between a compiler and its backend.

use std::sync::Arc;

use tracing::trace;

use super::filter::{FilterExpr, Q};
use super::ordering::OrderBy;
use crate::model::ModelMeta;

/// Ordered mapping of extra selected expressions (alias → SQL).
///
/// Entries are emitted in insertion order ahead of the model columns.
/// Replacing an existing alias keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraSelect {
    entries: Vec<(String, String)>,
}

impl ExtraSelect {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces an expression under `alias`.
    pub fn insert(&mut self, alias: impl Into<String>, sql: impl Into<String>) {
        let alias = alias.into();
        let sql = sql.into();
        match self.entries.iter_mut().find(|(name, _)| *name == alias) {
            Some(entry) => entry.1 = sql,
            None => self.entries.push((alias, sql)),
        }
    }

    /// Removes `alias`, returning its expression if it was present.
    pub fn remove(&mut self, alias: &str) -> Option<String> {
        let index = self.entries.iter().position(|(name, _)| name == alias)?;
        Some(self.entries.remove(index).1)
    }

    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == alias)
            .map(|(_, sql)| sql.as_str())
    }

    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == alias)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, sql)| (name.as_str(), sql.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The state of a query under construction.
///
/// Row bounds follow slicing semantics: `low_mark` is the number of rows
/// skipped and `high_mark`, when set, is the index one past the last row
/// returned. Both are absolute positions in the unsliced result.
#[derive(Debug, Clone)]
pub struct Query {
    model: Arc<ModelMeta>,
    low_mark: u64,
    high_mark: Option<u64>,
    extra_select: ExtraSelect,
    filters: Vec<FilterExpr>,
    excludes: Vec<FilterExpr>,
    order_by: Vec<OrderBy>,
    select: Option<Vec<String>>,
    distinct: bool,
}

impl Query {
    /// Creates an unfiltered, unbounded query over `model`.
    #[must_use]
    pub fn new(model: Arc<ModelMeta>) -> Self {
        Self {
            model,
            low_mark: 0,
            high_mark: None,
            extra_select: ExtraSelect::new(),
            filters: Vec::new(),
            excludes: Vec::new(),
            order_by: Vec::new(),
            select: None,
            distinct: false,
        }
    }

    /// Adds a filter. Multiple filters are combined with AND.
    #[must_use]
    pub fn filter(mut self, q: Q) -> Self {
        self.filters.push(q.into_expr());
        self
    }

    /// Adds an exclude filter. Rows matching it are left out.
    #[must_use]
    pub fn exclude(mut self, q: Q) -> Self {
        self.excludes.push(q.into_expr());
        self
    }

    /// Appends an ordering. Use `-` prefix for descending order.
    #[must_use]
    pub fn order_by(mut self, term: &str) -> Self {
        self.order_by.push(OrderBy::parse(term));
        self
    }

    /// Restricts the selected model fields, in the given order.
    #[must_use]
    pub fn only(mut self, fields: &[&str]) -> Self {
        self.select = Some(fields.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Adds an extra selected expression.
    #[must_use]
    pub fn extra(mut self, alias: &str, sql: &str) -> Self {
        self.extra_select.insert(alias, sql);
        self
    }

    /// Makes the query return distinct rows.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Narrows the row window, relative to the current window.
    ///
    /// `high` is applied before `low`, and neither can widen an existing
    /// upper bound. Offsets past `u64::MAX` saturate.
    pub fn set_limits(&mut self, low: Option<u64>, high: Option<u64>) {
        if let Some(high) = high {
            let candidate = self.low_mark.saturating_add(high);
            self.high_mark = Some(self.high_mark.map_or(candidate, |h| h.min(candidate)));
        }
        if let Some(low) = low {
            let candidate = self.low_mark.saturating_add(low);
            self.low_mark = self.high_mark.map_or(candidate, |h| h.min(candidate));
        }
        trace!(low_mark = self.low_mark, high_mark = ?self.high_mark, "limits set");
    }

    /// Removes any row bounds.
    pub fn clear_limits(&mut self) {
        self.low_mark = 0;
        self.high_mark = None;
    }

    /// Whether any row bound is in effect.
    #[must_use]
    pub const fn has_limits(&self) -> bool {
        self.high_mark.is_some() || self.low_mark > 0
    }

    #[must_use]
    pub const fn low_mark(&self) -> u64 {
        self.low_mark
    }

    #[must_use]
    pub const fn high_mark(&self) -> Option<u64> {
        self.high_mark
    }

    #[must_use]
    pub fn model(&self) -> &ModelMeta {
        &self.model
    }

    #[must_use]
    pub const fn extra_select(&self) -> &ExtraSelect {
        &self.extra_select
    }

    pub fn extra_select_mut(&mut self) -> &mut ExtraSelect {
        &mut self.extra_select
    }

    #[must_use]
    pub fn filters(&self) -> &[FilterExpr] {
        &self.filters
    }

    #[must_use]
    pub fn excludes(&self) -> &[FilterExpr] {
        &self.excludes
    }

    #[must_use]
    pub fn ordering(&self) -> &[OrderBy] {
        &self.order_by
    }

    /// Selected field names, or `None` for every model field.
    #[must_use]
    pub fn selected(&self) -> Option<&[String]> {
        self.select.as_deref()
    }

    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }
}
