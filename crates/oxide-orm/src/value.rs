//! SQL values exchanged with backends.
//!
//! [`SqlValue`] is used in both directions: as a bind parameter produced by
//! filters, and as the normalized value a backend hands back after decoding
//! a driver row.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// A SQL value in the ORM's type system.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Binary floating point. Decimal fields decode to [`SqlValue::Decimal`].
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Blob(Vec<u8>),
    /// Calendar date without a time of day.
    Date(NaiveDate),
    /// Time of day without a date.
    Time(NaiveTime),
    /// Date and time without a timezone.
    DateTime(NaiveDateTime),
}

impl SqlValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

macro_rules! sql_value_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

sql_value_from!(
    Bool(bool),
    Int(i8),
    Int(i16),
    Int(i32),
    Int(i64),
    Int(u8),
    Int(u16),
    Int(u32),
    Float(f32),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Text(&str),
    Blob(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
);

impl<T: Into<Self>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Anything usable as a bind parameter.
pub trait ToSqlValue {
    fn to_sql_value(self) -> SqlValue;
}

impl<T: Into<SqlValue>> ToSqlValue for T {
    fn to_sql_value(self) -> SqlValue {
        self.into()
    }
}
