//! # oxide-sql-oracle
//!
//! Oracle backend for `oxide-orm`.
//!
//! # How Oracle differs from other dialects
//!
//! - **No `LIMIT`/`OFFSET`**: older Oracle releases have no row limiting
//!   clause. Sliced queries are wrapped instead: the inner query selects a
//!   [`ROW_NUMBER()`] column (aliased `rn`) ordered like the query, and an
//!   outer `SELECT *` keeps rows with `rn > low AND rn <= high`.
//! - **Empty strings are NULL**: Oracle stores `''` as `NULL`, so NULLs read
//!   back for character fields are turned into empty strings.
//! - **No boolean column type**: booleans are stored as `NUMBER(1)` and come
//!   back as `1` or `0`.
//! - **One temporal type**: `DATE` and `TIMESTAMP` both come back as
//!   timestamps. The field kind decides whether a value is a date, a time or
//!   a date-time; without one, a value on 1900-01-01 is a time and an exact
//!   midnight is a date.
//! - **Large objects**: `CLOB` and `BLOB` columns arrive as handles that are
//!   read before any other conversion.
//! - **Identifier case**: unquoted identifiers fold to upper case, so
//!   [`OracleDialect`] upper-cases names when quoting them.
//!
//! [`ROW_NUMBER()`]: https://docs.oracle.com/en/database/oracle/oracle-database/19/sqlrf/ROW_NUMBER.html
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use oxide_orm::{Field, GenericDialect, ModelMeta, Query, QueryCompiler, SqlCompiler, SqlValue};
//! use oxide_sql_oracle::{get_compiler, OracleValue};
//!
//! let meta = Arc::new(
//!     ModelMeta::new("users")
//!         .field(Field::auto("id"))
//!         .field(Field::char("nickname", 50))
//!         .field(Field::boolean("is_active")),
//! );
//! let base = SqlCompiler::new(Query::new(meta).order_by("id"), GenericDialect::new());
//! let mut compiler = get_compiler::<SqlCompiler>().wrap(base);
//!
//! compiler.set_limits(Some(10), Some(20));
//! let (sql, _) = compiler.as_sql(true, false)?;
//! assert!(sql.starts_with("SELECT * FROM (SELECT (ROW_NUMBER() OVER"));
//! assert!(sql.ends_with("WHERE rn > 10 AND rn <= 20"));
//!
//! // a raw row: row number first, then the model fields
//! let fields = compiler.model().fields().to_vec();
//! let row = vec![
//!     OracleValue::Integer(11),
//!     OracleValue::Integer(42),
//!     OracleValue::Null,
//!     OracleValue::Integer(1),
//! ];
//! let values = compiler.resolve_columns(row, &fields)?;
//! assert_eq!(
//!     values,
//!     vec![
//!         SqlValue::Int(11),
//!         SqlValue::Int(42),
//!         SqlValue::Text(String::new()),
//!         SqlValue::Bool(true),
//!     ]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod compiler;
mod convert;
mod dialect;
pub mod driver;
mod error;
mod options;
mod registry;

pub use compiler::OracleCompiler;
pub use convert::convert_value;
pub use dialect::OracleDialect;
pub use driver::{LargeObject, LobData, MemoryLob, OracleTimestamp, OracleValue};
pub use error::{OracleError, Result};
pub use options::{OracleOptions, TIME_SENTINEL};
pub use registry::{get_compiler, registry, AdapterRegistry, OracleAdapter};
