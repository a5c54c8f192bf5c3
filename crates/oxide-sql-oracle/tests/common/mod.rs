#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDateTime;
use oxide_orm::{Field, ModelMeta, SqlValue};
use oxide_sql_oracle::OracleValue;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{query::Query, Row, Sqlite, TypeInfo, ValueRef};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub async fn create_test_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create in-memory SQLite pool")
}

/// The `books` model. Prices are decimals, stock flags are booleans stored
/// as integers, and a missing subtitle is NULL the way Oracle stores `''`.
pub fn books() -> Arc<ModelMeta> {
    Arc::new(
        ModelMeta::new("books")
            .field(Field::auto("id"))
            .field(Field::char("title", 200))
            .field(Field::char("subtitle", 200))
            .field(Field::decimal("price", 8, 2))
            .field(Field::boolean("in_stock")),
    )
}

/// Creates `books` with ids `1..=count`. Every third book has no subtitle
/// and odd ids are in stock.
pub async fn seed_books(pool: &SqlitePool, count: i64) {
    sqlx::query(
        "CREATE TABLE books (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            subtitle TEXT,
            price REAL NOT NULL,
            in_stock INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await
    .unwrap();

    for id in 1..=count {
        let subtitle = (id % 3 != 0).then(|| format!("Volume {id}"));
        #[allow(clippy::cast_precision_loss)]
        let price = id as f64 * 1.25;
        sqlx::query("INSERT INTO books (id, title, subtitle, price, in_stock) VALUES (?, ?, ?, ?, ?)")
            .bind(id)
            .bind(format!("Book {id:02}"))
            .bind(subtitle)
            .bind(price)
            .bind(id % 2)
            .execute(pool)
            .await
            .unwrap();
    }
}

/// The `events` model, with one column per temporal kind.
pub fn events() -> Arc<ModelMeta> {
    Arc::new(
        ModelMeta::new("events")
            .field(Field::auto("id"))
            .field(Field::date("day"))
            .field(Field::time("starts_at"))
            .field(Field::datetime("created")),
    )
}

/// Creates `events` with every temporal column stored as a full
/// timestamp, the way Oracle returns `DATE` and `TIMESTAMP` alike.
pub async fn seed_events(pool: &SqlitePool, rows: &[(i64, &str, &str, &str)]) {
    sqlx::query(
        "CREATE TABLE events (
            id INTEGER PRIMARY KEY,
            day TEXT NOT NULL,
            starts_at TEXT NOT NULL,
            created TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .unwrap();

    for (id, day, starts_at, created) in rows {
        sqlx::query("INSERT INTO events (id, day, starts_at, created) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(*day)
            .bind(*starts_at)
            .bind(*created)
            .execute(pool)
            .await
            .unwrap();
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Int(n) => query.bind(*n),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Text(s) => query.bind(s.clone()),
            SqlValue::Blob(b) => query.bind(b.clone()),
            SqlValue::Decimal(d) => query.bind(d.to_string()),
            SqlValue::Date(d) => query.bind(d.to_string()),
            SqlValue::Time(t) => query.bind(t.to_string()),
            SqlValue::DateTime(dt) => query.bind(dt.to_string()),
        };
    }
    query
}

/// Decodes a column the way an Oracle driver would hand it over: typed
/// scalars, and timestamps for anything that looks like one.
fn decode(row: &SqliteRow, index: usize) -> OracleValue {
    let raw = row.try_get_raw(index).expect("column index out of range");
    if raw.is_null() {
        return OracleValue::Null;
    }
    match raw.type_info().name() {
        "INTEGER" => OracleValue::Integer(row.get(index)),
        "REAL" => OracleValue::Float(row.get(index)),
        "BLOB" => OracleValue::Binary(row.get(index)),
        _ => {
            let text: String = row.get(index);
            match NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT) {
                Ok(ts) => OracleValue::DateTime(ts),
                Err(_) => OracleValue::Text(text),
            }
        }
    }
}

/// Runs compiled SQL and returns the raw rows.
pub async fn fetch_rows(pool: &SqlitePool, sql: &str, params: &[SqlValue]) -> Vec<Vec<OracleValue>> {
    let rows = bind_params(sqlx::query(sql), params)
        .fetch_all(pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to run: {sql}\nError: {e}"));
    rows.iter()
        .map(|row| (0..row.len()).map(|i| decode(row, i)).collect())
        .collect()
}

/// Integer values of one column across `rows`.
pub fn column_ints(rows: &[Vec<OracleValue>], index: usize) -> Vec<i64> {
    rows.iter()
        .map(|row| match &row[index] {
            OracleValue::Integer(n) => *n,
            other => panic!("Expected integer in column {index}, got {other:?}"),
        })
        .collect()
}
