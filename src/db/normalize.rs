//! Result row normalization.
//!
//! Converts engine-native row values into transport-safe scalars so that
//! every row is representable in a JSON wire format with no MySQL-specific
//! types escaping the boundary:
//! - date/time values become canonical ISO-8601 strings
//! - binary values are decoded as UTF-8 text, invalid sequences replaced
//! - numbers, strings, booleans, and NULL pass through unchanged
//! - DECIMAL/NUMERIC values are preserved exactly as strings
//!
//! Conversion happens per row, per column, independently, keyed on the
//! column's reported type.

use crate::models::ResultRow;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::mysql::{MySqlRow, MySqlTypeInfo, MySqlValueRef};
use sqlx::{Column, Decode, Row, Type, TypeInfo};

// =============================================================================
// Type Classification
// =============================================================================

/// Logical category for MySQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Integer,
    Float,
    Decimal,
    Boolean,
    Binary,
    Json,
    Date,
    DateTime,
    Timestamp,
    Time,
    Unknown,
}

/// Classify a MySQL type name into a logical category.
pub fn categorize_type(type_name: &str) -> TypeCategory {
    let lower = type_name.to_lowercase();

    // Decimal/Numeric - check first as "numeric" overlaps with float checks
    if lower.contains("decimal") || lower.contains("numeric") {
        return TypeCategory::Decimal;
    }

    // Boolean (TINYINT(1) is reported as BOOLEAN by the driver)
    if lower == "bool" || lower == "boolean" {
        return TypeCategory::Boolean;
    }

    // Integer types, including unsigned variants and YEAR
    if lower.contains("int") || lower.contains("year") {
        return TypeCategory::Integer;
    }

    // Float types
    if lower.contains("float") || lower.contains("double") {
        return TypeCategory::Float;
    }

    if lower == "json" {
        return TypeCategory::Json;
    }

    // Temporal types - exact names; "datetime" would otherwise match both
    // "date" and "time"
    match lower.as_str() {
        "date" => return TypeCategory::Date,
        "datetime" => return TypeCategory::DateTime,
        "timestamp" => return TypeCategory::Timestamp,
        "time" => return TypeCategory::Time,
        _ => {}
    }

    // Binary types (BLOB, TINYBLOB..., BINARY, VARBINARY)
    if lower.contains("blob") || lower.contains("binary") {
        return TypeCategory::Binary;
    }

    // Everything else (varchar, text, char, enum, set, ...) decodes as text
    TypeCategory::Unknown
}

// =============================================================================
// Decimal Type Support
// =============================================================================

/// Wrapper type for raw DECIMAL/NUMERIC values as strings.
/// This preserves the exact database representation.
#[derive(Debug)]
pub struct RawDecimal(pub String);

impl Type<sqlx::MySql> for RawDecimal {
    fn type_info() -> MySqlTypeInfo {
        <String as Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        let name = ty.name().to_lowercase();
        name.contains("decimal") || name.contains("numeric")
    }
}

impl<'r> Decode<'r, sqlx::MySql> for RawDecimal {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<sqlx::MySql>>::decode(value)?;
        Ok(RawDecimal(s.to_string()))
    }
}

// =============================================================================
// Canonical Scalar Forms
// =============================================================================

/// Canonical ISO-8601 form of a DATE value, e.g. `2024-01-15`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Canonical ISO-8601 form of a DATETIME value, e.g. `2024-01-15T10:30:00`.
/// Fractional seconds are included only when non-zero.
pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Canonical ISO-8601 form of a TIMESTAMP value with UTC offset,
/// e.g. `2024-01-15T10:30:00+00:00`.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339()
}

/// Canonical ISO-8601 form of a TIME value, e.g. `10:30:00`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S%.f").to_string()
}

/// Decode binary data as UTF-8 text. Invalid byte sequences are replaced
/// with U+FFFD rather than raising.
pub fn decode_binary_text(bytes: &[u8]) -> JsonValue {
    JsonValue::String(String::from_utf8_lossy(bytes).into_owned())
}

// =============================================================================
// Row Normalization
// =============================================================================

/// Normalize a MySQL row into an ordered mapping of transport-safe scalars.
pub fn normalize_row(row: &MySqlRow) -> ResultRow {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, col)| {
            let category = categorize_type(col.type_info().name());
            (col.name().to_string(), decode_column(row, idx, category))
        })
        .collect()
}

fn decode_column(row: &MySqlRow, idx: usize, category: TypeCategory) -> JsonValue {
    match category {
        TypeCategory::Decimal => decode_decimal(row, idx),
        TypeCategory::Integer => decode_integer(row, idx),
        TypeCategory::Boolean => decode_boolean(row, idx),
        TypeCategory::Float => decode_float(row, idx),
        TypeCategory::Binary => decode_binary_col(row, idx),
        TypeCategory::Json => decode_json(row, idx),
        TypeCategory::Date => decode_date(row, idx),
        TypeCategory::DateTime => decode_datetime(row, idx),
        TypeCategory::Timestamp => decode_timestamp(row, idx),
        TypeCategory::Time => decode_time(row, idx),
        TypeCategory::Unknown => decode_text(row, idx),
    }
}

fn decode_decimal(row: &MySqlRow, idx: usize) -> JsonValue {
    match row.try_get::<Option<RawDecimal>, _>(idx) {
        Ok(Some(v)) => JsonValue::String(v.0),
        Ok(None) => JsonValue::Null,
        Err(e) => {
            tracing::error!("Failed to decode DECIMAL: {:?}", e);
            JsonValue::Null
        }
    }
}

fn decode_integer(row: &MySqlRow, idx: usize) -> JsonValue {
    // Check NULL first
    if let Ok(None) = row.try_get::<Option<i64>, _>(idx) {
        return JsonValue::Null;
    }
    // Try signed types
    if let Ok(Some(v)) = row.try_get::<Option<i8>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<i16>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<i32>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    // Try unsigned types
    if let Ok(Some(v)) = row.try_get::<Option<u8>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<u16>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<u32>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<u64>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    JsonValue::Null
}

fn decode_boolean(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<bool>, _>(idx)
        .ok()
        .flatten()
        .map(JsonValue::Bool)
        .unwrap_or(JsonValue::Null)
}

fn decode_float(row: &MySqlRow, idx: usize) -> JsonValue {
    if let Ok(Some(v)) = row.try_get::<Option<f64>, _>(idx) {
        return serde_json::Number::from_f64(v)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(v.to_string()));
    }
    if let Ok(Some(v)) = row.try_get::<Option<f32>, _>(idx) {
        return serde_json::Number::from_f64(v as f64)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(v.to_string()));
    }
    JsonValue::Null
}

fn decode_binary_col(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<Vec<u8>>, _>(idx)
        .ok()
        .flatten()
        .map(|v| decode_binary_text(&v))
        .unwrap_or(JsonValue::Null)
}

fn decode_json(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<JsonValue>, _>(idx)
        .ok()
        .flatten()
        .unwrap_or(JsonValue::Null)
}

fn decode_date(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<NaiveDate>, _>(idx)
        .ok()
        .flatten()
        .map(|v| JsonValue::String(format_date(v)))
        .unwrap_or(JsonValue::Null)
}

fn decode_datetime(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<NaiveDateTime>, _>(idx)
        .ok()
        .flatten()
        .map(|v| JsonValue::String(format_datetime(v)))
        .unwrap_or(JsonValue::Null)
}

fn decode_timestamp(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<DateTime<Utc>>, _>(idx)
        .ok()
        .flatten()
        .map(|v| JsonValue::String(format_timestamp(v)))
        .unwrap_or(JsonValue::Null)
}

fn decode_time(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<NaiveTime>, _>(idx)
        .ok()
        .flatten()
        .map(|v| JsonValue::String(format_time(v)))
        .unwrap_or(JsonValue::Null)
}

fn decode_text(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<String>, _>(idx)
        .ok()
        .flatten()
        .map(JsonValue::String)
        .unwrap_or(JsonValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_type_integer() {
        assert_eq!(categorize_type("INT"), TypeCategory::Integer);
        assert_eq!(categorize_type("BIGINT"), TypeCategory::Integer);
        assert_eq!(categorize_type("TINYINT"), TypeCategory::Integer);
        assert_eq!(categorize_type("BIGINT UNSIGNED"), TypeCategory::Integer);
        assert_eq!(categorize_type("YEAR"), TypeCategory::Integer);
    }

    #[test]
    fn test_categorize_type_decimal() {
        assert_eq!(categorize_type("DECIMAL"), TypeCategory::Decimal);
        assert_eq!(categorize_type("NUMERIC"), TypeCategory::Decimal);
    }

    #[test]
    fn test_categorize_type_temporal() {
        assert_eq!(categorize_type("DATE"), TypeCategory::Date);
        assert_eq!(categorize_type("DATETIME"), TypeCategory::DateTime);
        assert_eq!(categorize_type("TIMESTAMP"), TypeCategory::Timestamp);
        assert_eq!(categorize_type("TIME"), TypeCategory::Time);
    }

    #[test]
    fn test_categorize_type_binary() {
        assert_eq!(categorize_type("BLOB"), TypeCategory::Binary);
        assert_eq!(categorize_type("TINYBLOB"), TypeCategory::Binary);
        assert_eq!(categorize_type("VARBINARY"), TypeCategory::Binary);
        assert_eq!(categorize_type("BINARY"), TypeCategory::Binary);
    }

    #[test]
    fn test_categorize_type_text_fallback() {
        assert_eq!(categorize_type("VARCHAR"), TypeCategory::Unknown);
        assert_eq!(categorize_type("TEXT"), TypeCategory::Unknown);
        assert_eq!(categorize_type("ENUM"), TypeCategory::Unknown);
    }

    #[test]
    fn test_format_date_is_iso() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_date(d), "2024-01-15");
    }

    #[test]
    fn test_format_datetime_is_iso() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(format_datetime(dt), "2024-01-15T10:30:00");
    }

    #[test]
    fn test_format_datetime_keeps_fractional_seconds() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_micro_opt(10, 30, 0, 250_000)
            .unwrap();
        assert_eq!(format_datetime(dt), "2024-01-15T10:30:00.250");
    }

    #[test]
    fn test_format_timestamp_is_rfc3339() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
            .and_utc();
        assert_eq!(format_timestamp(ts), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_format_time() {
        let t = NaiveTime::from_hms_opt(10, 30, 5).unwrap();
        assert_eq!(format_time(t), "10:30:05");
    }

    #[test]
    fn test_decode_binary_text_valid_utf8() {
        assert_eq!(
            decode_binary_text(b"hello world"),
            JsonValue::String("hello world".to_string())
        );
    }

    #[test]
    fn test_decode_binary_text_invalid_utf8_replaced() {
        let bytes: &[u8] = &[0x68, 0x69, 0xFF, 0xFE];
        let decoded = decode_binary_text(bytes);
        let s = decoded.as_str().unwrap();
        assert!(s.starts_with("hi"));
        assert!(s.contains('\u{FFFD}'));
    }

    #[test]
    fn test_decode_binary_text_empty() {
        assert_eq!(decode_binary_text(&[]), JsonValue::String(String::new()));
    }

    #[test]
    fn test_date_round_trips_through_canonical_form() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let canonical = format_date(d);
        let reparsed: NaiveDate = canonical.parse().unwrap();
        assert_eq!(format_date(reparsed), canonical);
    }
}
