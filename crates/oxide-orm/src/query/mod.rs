//! Query building types for the ORM.
//!
//! This module provides the mutable [`Query`] state, Q objects for
//! filtering, and ordering specifications.

mod filter;
mod ordering;
mod state;

pub use filter::{CompareOp, FilterExpr, Lookup, Q};
pub use ordering::{OrderBy, OrderDirection};
pub use state::{ExtraSelect, Query};
