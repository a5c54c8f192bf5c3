//! # oxide-orm
//!
//! The generic query layer of the oxide ORM.
//!
//! This crate provides:
//! - [`ModelMeta`] and [`Field`] descriptors with a closed [`FieldKind`]
//! - [`Query`] state: filters, ordering, extra selects, and row bounds
//! - `Q` objects for complex filter expressions
//! - The [`QueryCompiler`] trait that database backends wrap, and the
//!   reference [`SqlCompiler`]
//! - [`SqlValue`], the value type exchanged with backends
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use oxide_orm::{Field, GenericDialect, ModelMeta, Q, Query, QueryCompiler, SqlCompiler};
//!
//! let meta = Arc::new(
//!     ModelMeta::new("users")
//!         .field(Field::auto("id"))
//!         .field(Field::char("username", 150))
//!         .field(Field::boolean("is_active")),
//! );
//!
//! let query = Query::new(meta)
//!     .filter(Q::eq("is_active", true))
//!     .order_by("-id");
//!
//! let mut compiler = SqlCompiler::new(query, GenericDialect::new());
//! compiler.set_limits(None, Some(10));
//! let (sql, params) = compiler.as_sql(true, false)?;
//!
//! assert!(sql.ends_with("ORDER BY \"users\".\"id\" DESC LIMIT 10"));
//! assert_eq!(params.len(), 1);
//! # Ok::<(), oxide_orm::OrmError>(())
//! ```
//!
//! ## Complex Filters with Q Objects
//!
//! ```
//! use oxide_orm::Q;
//!
//! // AND conditions
//! let filter = Q::eq("status", "active").and(Q::gt("age", 18));
//!
//! // OR conditions
//! let filter = Q::eq("role", "admin").or(Q::eq("role", "moderator"));
//!
//! // NOT conditions
//! let filter = Q::eq("deleted", true).not();
//! ```

mod compiler;
pub mod dialect;
mod error;
pub mod fields;
mod model;
pub mod query;
pub mod value;

pub use compiler::{QueryCompiler, SqlCompiler};
pub use dialect::{Dialect, GenericDialect};
pub use error::{OrmError, Result};
pub use fields::{Field, FieldKind, FieldOptions};
pub use model::ModelMeta;
pub use query::{ExtraSelect, OrderBy, OrderDirection, Q, Query};
pub use value::{SqlValue, ToSqlValue};
