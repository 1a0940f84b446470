use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value as Json};
use uuid::Uuid;

use dbdoc_api::{ObjectId, Row, ScalarType, SourceError, Timestamp, TypedCell, Value};

// ════════════════════════════════════════════════════════════════
//  On-disk snapshot format
// ════════════════════════════════════════════════════════════════

/// JSON row: column name → JSON value, in file order.
pub(crate) type JsonRow = Map<String, Json>;

/// The four catalog result sets as stored in a snapshot file.
///
/// `objects` is keyed by parent id (`"0"` = top level),
/// `columns` by object id.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SnapshotFile {
    pub database: JsonRow,
    #[serde(default)]
    pub schemas: Vec<JsonRow>,
    #[serde(default)]
    pub objects: BTreeMap<String, Vec<JsonRow>>,
    #[serde(default)]
    pub columns: BTreeMap<String, Vec<JsonRow>>,
}

/// Parse a result-set key (`"0"`, `"1093578934"`) into an object id.
pub(crate) fn parse_id(key: &str) -> Result<ObjectId, SourceError> {
    key.trim()
        .parse::<i64>()
        .map(ObjectId)
        .map_err(|e| SourceError::format(format!("object id '{key}': {e}")))
}

// ════════════════════════════════════════════════════════════════
//  Cell decoding
// ════════════════════════════════════════════════════════════════

/// Convert a JSON row into a `Row`, keeping column order.
pub(crate) fn decode_row(json: &JsonRow) -> Result<Row, SourceError> {
    let mut row = Row::new();
    for (column, value) in json {
        let cell = decode_cell(value).map_err(|e| e.with_context(format!("column '{column}'")))?;
        row.set(column.as_str(), cell);
    }
    Ok(row)
}

/// Plain JSON values map onto the obvious types (string → text,
/// integer → int64, other numbers → float64, bool, null → text NULL).
/// Other SQL types are spelled `{"$type": "<type>", "value": ...}`.
fn decode_cell(value: &Json) -> Result<TypedCell, SourceError> {
    match value {
        Json::Null => Ok(TypedCell::null(ScalarType::Text)),
        Json::Bool(b) => Ok((*b).into()),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.into())
            } else if let Some(f) = n.as_f64() {
                Ok(f.into())
            } else {
                Err(SourceError::format(format!("number {n} out of range")))
            }
        }
        Json::String(s) => Ok(s.as_str().into()),
        Json::Object(map) => decode_typed(map),
        Json::Array(_) => Err(SourceError::format("arrays are not cell values")),
    }
}

fn decode_typed(map: &Map<String, Json>) -> Result<TypedCell, SourceError> {
    let ty = map
        .get("$type")
        .ok_or_else(|| SourceError::format("object cell without \"$type\""))?;
    let ty: ScalarType = serde_json::from_value(ty.clone())?;

    let value = match map.get("value") {
        None | Some(Json::Null) => return Ok(TypedCell::null(ty)),
        Some(v) => v,
    };

    let value = match ty {
        ScalarType::Text => Value::Text(expect_str(value, ty)?.to_string()),
        ScalarType::UInt8 => Value::UInt8(narrow(expect_i64(value, ty)?, ty)?),
        ScalarType::Int16 => Value::Int16(narrow(expect_i64(value, ty)?, ty)?),
        ScalarType::Int32 => Value::Int32(narrow(expect_i64(value, ty)?, ty)?),
        ScalarType::Int64 => Value::Int64(expect_i64(value, ty)?),
        ScalarType::Decimal => {
            // Strings keep the scale exactly; numbers go through their JSON text.
            let text = match value {
                Json::String(s) => s.clone(),
                Json::Number(n) => n.to_string(),
                _ => return Err(mismatch(value, ty)),
            };
            Value::Decimal(Decimal::from_str(text.trim())?)
        }
        ScalarType::Bool => Value::Bool(value.as_bool().ok_or_else(|| mismatch(value, ty))?),
        ScalarType::Timestamp => Value::Timestamp(expect_str(value, ty)?.parse::<Timestamp>()?),
        ScalarType::Float64 => Value::Float64(value.as_f64().ok_or_else(|| mismatch(value, ty))?),
        ScalarType::Uuid => Value::Uuid(Uuid::parse_str(expect_str(value, ty)?)?),
        ScalarType::Binary => Value::Binary(parse_hex(expect_str(value, ty)?)?),
    };
    Ok(TypedCell::new(value))
}

fn expect_str(value: &Json, ty: ScalarType) -> Result<&str, SourceError> {
    value.as_str().ok_or_else(|| mismatch(value, ty))
}

fn expect_i64(value: &Json, ty: ScalarType) -> Result<i64, SourceError> {
    value.as_i64().ok_or_else(|| mismatch(value, ty))
}

fn narrow<T: TryFrom<i64>>(v: i64, ty: ScalarType) -> Result<T, SourceError> {
    T::try_from(v).map_err(|_| SourceError::format(format!("{v} does not fit {ty}")))
}

fn mismatch(value: &Json, ty: ScalarType) -> SourceError {
    SourceError::format(format!("{value} is not a valid {ty} value"))
}

/// `0x0AFF` / `0AFF` → bytes.
fn parse_hex(s: &str) -> Result<Vec<u8>, SourceError> {
    let digits = s.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    if digits.len() % 2 != 0 {
        return Err(SourceError::format(format!("odd number of hex digits in '{s}'")));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| SourceError::format(format!("invalid hex in '{s}'")))
        })
        .collect()
}
