use std::fmt::Write;

use chrono::{NaiveDateTime, Timelike};

use dbdoc_api::{Row, Timestamp, TypedCell, Value};

use crate::error::EngineError;

/// Canonical text form of a cell, or `None` for NULL.
///
/// Output never depends on the host locale. Numeric and temporal values use
/// forms that parse back to the same value:
/// - integers and decimals: plain fixed point (`Decimal` keeps its scale);
/// - bool: `true` / `false`;
/// - timestamps: ISO-8601 with the timezone kind preserved
///   (`Z` for UTC, `±HH:MM` for local, no suffix for unspecified).
///
/// Text passes through untouched; escaping belongs to the renderer.
pub fn canonicalize(cell: &TypedCell) -> Option<String> {
    let value = cell.value()?;
    let text = match value {
        Value::Text(s) => s.clone(),
        Value::UInt8(v) => v.to_string(),
        Value::Int16(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Decimal(v) => v.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Timestamp(ts) => format_timestamp(ts),
        Value::Float64(v) => v.to_string(),
        Value::Uuid(v) => v.hyphenated().to_string(),
        Value::Binary(bytes) => format_binary(bytes),
    };
    Some(text)
}

/// Canonical text of `column` in `row`.
///
/// A NULL cell gives `Ok(None)`; a column the row does not have at all is
/// an `InvalidArgument`.
pub fn canonical_column(row: &Row, column: &str) -> Result<Option<String>, EngineError> {
    row.get(column)
        .map(canonicalize)
        .ok_or_else(|| EngineError::InvalidArgument(format!("row has no '{column}' column")))
}

/// Round-trip form of a timestamp. Inverse of `Timestamp::from_str`.
pub fn format_timestamp(ts: &Timestamp) -> String {
    match ts {
        Timestamp::Utc(dt) => format!("{}Z", format_naive(&dt.naive_utc())),
        Timestamp::Local(dt) => {
            format!("{}{}", format_naive(&dt.naive_local()), dt.format("%:z"))
        }
        Timestamp::Unspecified(dt) => format_naive(dt),
    }
}

/// `YYYY-MM-DDTHH:MM:SS` plus the fractional second with trailing zeros
/// trimmed; no fraction at all on whole seconds.
///
/// A leap second is stored as a nanosecond count past 1e9; `%S` already
/// prints it as `60`.
fn format_naive(dt: &NaiveDateTime) -> String {
    let mut out = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = dt.nanosecond() % 1_000_000_000;
    if nanos > 0 {
        let frac = format!("{nanos:09}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

fn format_binary(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for b in bytes {
        let _ = write!(out, "{b:02X}");
    }
    out
}
