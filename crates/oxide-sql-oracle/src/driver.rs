//! Raw values as delivered by an Oracle driver.
//!
//! These types mirror what a driver hands back before any ORM-level
//! interpretation: numbers without a declared meaning, nulls where empty
//! strings were written, timestamps for every temporal column, and
//! large-object handles that still have to be read.

use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::Result;

/// Content of a large object once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobData {
    /// Character large object (CLOB / NCLOB).
    Text(String),
    /// Binary large object (BLOB).
    Binary(Vec<u8>),
}

/// A handle to out-of-line data that must be read explicitly.
pub trait LargeObject: fmt::Debug + Send + Sync {
    /// Reads the whole object into memory.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Lob`](crate::OracleError::Lob) when the
    /// driver cannot read the object.
    fn read(&self) -> Result<LobData>;
}

/// A large object whose content is already in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLob {
    data: LobData,
}

impl MemoryLob {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            data: LobData::Text(content.into()),
        }
    }

    pub fn binary(content: impl Into<Vec<u8>>) -> Self {
        Self {
            data: LobData::Binary(content.into()),
        }
    }
}

impl LargeObject for MemoryLob {
    fn read(&self) -> Result<LobData> {
        Ok(self.data.clone())
    }
}

/// The driver's timestamp type.
///
/// Oracle returns `DATE` and `TIMESTAMP` columns alike as timestamps, so a
/// value of this type says nothing about whether the column held a date, a
/// time, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OracleTimestamp {
    inner: NaiveDateTime,
}

impl OracleTimestamp {
    /// Builds a timestamp from its components; `fsecond` is in
    /// microseconds. Returns `None` for out-of-range components.
    #[must_use]
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        fsecond: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_micro_opt(hour, minute, second, fsecond)
            .map(|inner| Self { inner })
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.inner.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.inner.day()
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.inner.hour()
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.inner.minute()
    }

    #[must_use]
    pub fn second(&self) -> u32 {
        self.inner.second()
    }

    /// Fractional seconds in microseconds.
    #[must_use]
    pub fn fsecond(&self) -> u32 {
        self.inner.nanosecond() / 1_000
    }

    /// The generic date-time this timestamp denotes.
    #[must_use]
    pub const fn to_datetime(&self) -> NaiveDateTime {
        self.inner
    }
}

impl From<NaiveDateTime> for OracleTimestamp {
    fn from(inner: NaiveDateTime) -> Self {
        Self { inner }
    }
}

/// A raw value from one column of a driver row.
#[derive(Debug, Clone)]
pub enum OracleValue {
    /// NULL. Oracle also returns this for empty strings.
    Null,
    /// Integral `NUMBER`.
    Integer(i64),
    /// Non-integral `NUMBER` or `BINARY_DOUBLE`.
    Float(f64),
    /// `VARCHAR2`, `NVARCHAR2`, `CHAR`.
    Text(String),
    /// `RAW`.
    Binary(Vec<u8>),
    /// `TIMESTAMP` with fractional seconds.
    Timestamp(OracleTimestamp),
    /// `DATE` already decoded to a date-time by the driver.
    DateTime(NaiveDateTime),
    /// `CLOB`, `NCLOB`, or `BLOB` handle.
    Lob(Arc<dyn LargeObject>),
}

impl OracleValue {
    /// Wraps a large-object handle.
    pub fn lob(handle: impl LargeObject + 'static) -> Self {
        Self::Lob(Arc::new(handle))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Binary(_) => "binary",
            Self::Timestamp(_) => "timestamp",
            Self::DateTime(_) => "datetime",
            Self::Lob(_) => "lob",
        }
    }
}

impl From<LobData> for OracleValue {
    fn from(data: LobData) -> Self {
        match data {
            LobData::Text(s) => Self::Text(s),
            LobData::Binary(b) => Self::Binary(b),
        }
    }
}

impl From<OracleTimestamp> for OracleValue {
    fn from(ts: OracleTimestamp) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<i64> for OracleValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for OracleValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for OracleValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for OracleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
