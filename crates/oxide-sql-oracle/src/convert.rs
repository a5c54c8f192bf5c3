//! Normalization of raw driver values.
//!
//! The Oracle driver loses information the ORM relies on: empty strings
//! come back as null, booleans as `0`/`1`, decimals as floats, and every
//! temporal column as a timestamp. [`convert_value`] restores the ORM
//! representation using the field descriptor where one is available.

use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use oxide_orm::{Field, SqlValue};
use rust_decimal::Decimal;

use crate::driver::OracleValue;
use crate::error::{OracleError, Result};
use crate::options::OracleOptions;

/// Converts one raw value, optionally guided by its field.
///
/// Checks run in order and the first match wins:
///
/// 1. large objects are read into memory first;
/// 2. null becomes `""` for fields that accept the empty string;
/// 3. integer `1`/`0` becomes a bool for boolean fields;
/// 4. any non-null value for a decimal field is formatted with the field's
///    decimal places and parsed as an exact decimal;
/// 5. timestamps are narrowed to a date, a time, or kept as date-time;
/// 6. everything else passes through unchanged.
///
/// # Errors
///
/// Returns [`OracleError::InvalidDecimal`] or [`OracleError::NotNumeric`]
/// when a decimal field's value cannot be read as an exact decimal, and
/// [`OracleError::Lob`] when the driver fails to read a large object.
pub fn convert_value(
    value: OracleValue,
    field: Option<&Field>,
    options: &OracleOptions,
) -> Result<SqlValue> {
    match (value, field) {
        (OracleValue::Lob(handle), field) => convert_value(handle.read()?.into(), field, options),
        (OracleValue::Null, Some(field)) if field.empty_strings_allowed() => {
            Ok(SqlValue::Text(String::new()))
        }
        (OracleValue::Integer(n @ (0 | 1)), Some(field)) if field.is_boolean() => {
            Ok(SqlValue::Bool(n == 1))
        }
        (value, Some(field)) if !value.is_null() && field.is_decimal() => to_decimal(value, field),
        (OracleValue::Timestamp(ts), field) => Ok(disambiguate(ts.to_datetime(), field, options)),
        (OracleValue::DateTime(dt), field) => Ok(disambiguate(dt, field, options)),
        (value, _) => passthrough(value),
    }
}

fn to_decimal(value: OracleValue, field: &Field) -> Result<SqlValue> {
    let input = match value {
        OracleValue::Integer(n) => field.format_integer(n),
        OracleValue::Float(f) => field.format_number(f),
        OracleValue::Text(s) => s.trim().to_string(),
        other => return Err(OracleError::NotNumeric(other.type_name())),
    };
    Decimal::from_str(&input)
        .map(SqlValue::Decimal)
        .map_err(|source| OracleError::InvalidDecimal { input, source })
}

/// Narrows a timestamp to the temporal type it most likely came from.
fn disambiguate(value: NaiveDateTime, field: Option<&Field>, options: &OracleOptions) -> SqlValue {
    let kind = field.map(Field::kind);
    if kind.is_some_and(|k| k.is_datetime()) {
        return SqlValue::DateTime(value);
    }
    if kind.is_some_and(|k| k.is_date()) {
        return SqlValue::Date(value.date());
    }
    if kind.is_some_and(|k| k.is_time()) || value.date() == options.time_sentinel {
        return SqlValue::Time(value.time());
    }
    // Lossy: a genuine midnight timestamp without a field hint reads as a date.
    let midnight = value.hour() == 0
        && value.minute() == 0
        && value.second() == 0
        && value.nanosecond() == 0;
    if options.midnight_as_date && midnight {
        return SqlValue::Date(value.date());
    }
    SqlValue::DateTime(value)
}

fn passthrough(value: OracleValue) -> Result<SqlValue> {
    let converted = match value {
        OracleValue::Null => SqlValue::Null,
        OracleValue::Integer(n) => SqlValue::Int(n),
        OracleValue::Float(f) => SqlValue::Float(f),
        OracleValue::Text(s) => SqlValue::Text(s),
        OracleValue::Binary(b) => SqlValue::Blob(b),
        OracleValue::Timestamp(ts) => SqlValue::DateTime(ts.to_datetime()),
        OracleValue::DateTime(dt) => SqlValue::DateTime(dt),
        OracleValue::Lob(handle) => return passthrough(handle.read()?.into()),
    };
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::driver::{LargeObject, LobData, MemoryLob, OracleTimestamp};

    fn convert(value: impl Into<OracleValue>, field: Option<&Field>) -> SqlValue {
        convert_value(value.into(), field, &OracleOptions::default()).unwrap()
    }

    fn ts(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> OracleTimestamp {
        OracleTimestamp::new(y, m, d, h, mi, s, 0).unwrap()
    }

    #[derive(Debug)]
    struct BrokenLob;

    impl LargeObject for BrokenLob {
        fn read(&self) -> Result<LobData> {
            Err(OracleError::Lob("ORA-22922: nonexistent LOB value".to_string()))
        }
    }

    #[test]
    fn test_null_becomes_empty_string_for_char_fields() {
        let name = Field::char("name", 30);
        assert_eq!(convert(OracleValue::Null, Some(&name)), SqlValue::Text(String::new()));
    }

    #[test]
    fn test_null_stays_null_elsewhere() {
        assert_eq!(convert(OracleValue::Null, None), SqlValue::Null);
        assert_eq!(
            convert(OracleValue::Null, Some(&Field::integer("age"))),
            SqlValue::Null
        );
        assert_eq!(
            convert(OracleValue::Null, Some(&Field::decimal("price", 5, 2))),
            SqlValue::Null
        );
    }

    #[test]
    fn test_integer_booleans() {
        let flag = Field::boolean("is_active");
        assert_eq!(convert(1_i64, Some(&flag)), SqlValue::Bool(true));
        assert_eq!(convert(0_i64, Some(&flag)), SqlValue::Bool(false));

        let maybe = Field::null_boolean("is_verified");
        assert_eq!(convert(1_i64, Some(&maybe)), SqlValue::Bool(true));
        assert_eq!(convert(OracleValue::Null, Some(&maybe)), SqlValue::Null);
    }

    #[test]
    fn test_other_integers_untouched_for_booleans() {
        let flag = Field::boolean("is_active");
        assert_eq!(convert(2_i64, Some(&flag)), SqlValue::Int(2));
        assert_eq!(convert(1_i64, Some(&Field::integer("n"))), SqlValue::Int(1));
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_float_to_exact_decimal() {
        let price = Field::decimal("price", 5, 2);
        let value = convert(3.14_f64, Some(&price));
        assert_eq!(value, SqlValue::Decimal(Decimal::new(314, 2)));
        match value {
            SqlValue::Decimal(d) => assert_eq!(d.to_string(), "3.14"),
            other => panic!("expected decimal, got {other:?}"),
        }
    }

    #[test]
    fn test_decimal_rounds_to_field_places() {
        let price = Field::decimal("price", 5, 2);
        let SqlValue::Decimal(d) = convert(0.1_f64 + 0.2_f64, Some(&price)) else {
            panic!("expected decimal");
        };
        assert_eq!(d.to_string(), "0.30");
    }

    #[test]
    fn test_integer_and_text_to_decimal() {
        let price = Field::decimal("price", 8, 2);
        assert_eq!(
            convert(12_i64, Some(&price)),
            SqlValue::Decimal(Decimal::new(1200, 2))
        );
        assert_eq!(
            convert("19.99", Some(&price)),
            SqlValue::Decimal(Decimal::new(1999, 2))
        );
    }

    #[test]
    fn test_invalid_decimal_is_an_error() {
        let price = Field::decimal("price", 5, 2);
        let err = convert_value(OracleValue::Float(f64::NAN), Some(&price), &OracleOptions::default())
            .unwrap_err();
        assert!(matches!(err, OracleError::InvalidDecimal { ref input, .. } if input == "NaN"));

        let err = convert_value("n/a".into(), Some(&price), &OracleOptions::default()).unwrap_err();
        assert!(matches!(err, OracleError::InvalidDecimal { .. }));

        let err = convert_value(
            OracleValue::Binary(vec![1]),
            Some(&price),
            &OracleOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, OracleError::NotNumeric("binary")));
    }

    #[test]
    fn test_timestamp_for_datetime_field_kept() {
        let created = Field::datetime("created_at");
        let value = ts(2020, 5, 1, 0, 0, 0);
        assert_eq!(
            convert(value, Some(&created)),
            SqlValue::DateTime(value.to_datetime())
        );
    }

    #[test]
    fn test_timestamp_for_date_field_truncated() {
        let born = Field::date("born_on");
        assert_eq!(
            convert(ts(2020, 5, 1, 13, 5, 0), Some(&born)),
            SqlValue::Date(NaiveDate::from_ymd_opt(2020, 5, 1).unwrap())
        );
    }

    #[test]
    fn test_timestamp_for_time_field() {
        let opens = Field::time("opens_at");
        assert_eq!(
            convert(ts(2020, 5, 1, 9, 15, 0), Some(&opens)),
            SqlValue::Time(NaiveTime::from_hms_opt(9, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_sentinel_date_means_time() {
        assert_eq!(
            convert(ts(1900, 1, 1, 14, 30, 0), None),
            SqlValue::Time(NaiveTime::from_hms_opt(14, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_midnight_without_hint_is_a_date() {
        assert_eq!(
            convert(ts(2020, 5, 1, 0, 0, 0), None),
            SqlValue::Date(NaiveDate::from_ymd_opt(2020, 5, 1).unwrap())
        );
        // the same holds for a field that carries no temporal kind
        assert_eq!(
            convert(ts(2020, 5, 1, 0, 0, 0), Some(&Field::text("note"))),
            SqlValue::Date(NaiveDate::from_ymd_opt(2020, 5, 1).unwrap())
        );
    }

    #[test]
    fn test_midnight_heuristic_can_be_disabled() {
        let options = OracleOptions::new().midnight_as_date(false);
        let value = ts(2020, 5, 1, 0, 0, 0);
        assert_eq!(
            convert_value(value.into(), None, &options).unwrap(),
            SqlValue::DateTime(value.to_datetime())
        );
    }

    #[test]
    fn test_fractional_second_keeps_datetime() {
        let value = OracleTimestamp::new(2020, 5, 1, 0, 0, 0, 1).unwrap();
        assert_eq!(convert(value, None), SqlValue::DateTime(value.to_datetime()));
    }

    #[test]
    fn test_driver_datetime_follows_timestamp_rules() {
        let dt = NaiveDate::from_ymd_opt(1900, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(
            convert(OracleValue::DateTime(dt), None),
            SqlValue::Time(NaiveTime::from_hms_opt(8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_lob_is_read_before_conversion() {
        let body = Field::text("body");
        assert_eq!(
            convert(OracleValue::lob(MemoryLob::text("chapter one")), Some(&body)),
            SqlValue::Text("chapter one".to_string())
        );
        assert_eq!(
            convert(OracleValue::lob(MemoryLob::text("42.5")), Some(&Field::decimal("d", 5, 1))),
            SqlValue::Decimal(Decimal::new(425, 1))
        );
        assert_eq!(
            convert(OracleValue::lob(MemoryLob::binary(vec![0xCA, 0xFE])), None),
            SqlValue::Blob(vec![0xCA, 0xFE])
        );
    }

    #[test]
    fn test_lob_read_failure_propagates() {
        let err = convert_value(OracleValue::lob(BrokenLob), None, &OracleOptions::default())
            .unwrap_err();
        assert!(matches!(err, OracleError::Lob(_)));
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(convert(7_i64, None), SqlValue::Int(7));
        assert_eq!(convert(2.5_f64, None), SqlValue::Float(2.5));
        assert_eq!(convert("hi", None), SqlValue::Text("hi".to_string()));
        assert_eq!(
            convert(OracleValue::Binary(vec![1]), Some(&Field::text("t"))),
            SqlValue::Blob(vec![1])
        );
    }
}
