use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SourceError;

// ════════════════════════════════════════════════════════════════
//  Scalar Type
// ════════════════════════════════════════════════════════════════

/// Semantic type of a result-set column.
///
/// Carried by every cell, NULL cells included: a NULL `int` column is still
/// an `Int32` cell, it just has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    Text,
    #[serde(rename = "uint8")]
    UInt8,
    Int16,
    Int32,
    Int64,
    /// Fixed point. SQL Server: `decimal(p,s)`, `numeric(p,s)`, `money`.
    Decimal,
    Bool,
    Timestamp,
    Float64,
    Uuid,
    Binary,
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarType::Text => write!(f, "text"),
            ScalarType::UInt8 => write!(f, "uint8"),
            ScalarType::Int16 => write!(f, "int16"),
            ScalarType::Int32 => write!(f, "int32"),
            ScalarType::Int64 => write!(f, "int64"),
            ScalarType::Decimal => write!(f, "decimal"),
            ScalarType::Bool => write!(f, "bool"),
            ScalarType::Timestamp => write!(f, "timestamp"),
            ScalarType::Float64 => write!(f, "float64"),
            ScalarType::Uuid => write!(f, "uuid"),
            ScalarType::Binary => write!(f, "binary"),
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  Timestamp
// ════════════════════════════════════════════════════════════════

/// Point in time together with its timezone kind.
///
/// The kind is part of the value: a UTC instant and the same instant
/// expressed as local time are different timestamps, and an unspecified
/// wall-clock time has no offset at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timestamp {
    Utc(DateTime<Utc>),
    /// Local time with the offset that was in effect.
    Local(DateTime<FixedOffset>),
    /// Wall-clock time, timezone unknown.
    Unspecified(NaiveDateTime),
}

impl Timestamp {
    /// Current instant as local time.
    pub fn now_local() -> Self {
        let now = chrono::Local::now();
        Timestamp::Local(now.with_timezone(now.offset()))
    }
}

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses the ISO-8601 round-trip form: `Z` suffix → `Utc`,
/// `±HH:MM` suffix → `Local`, no suffix → `Unspecified`.
impl FromStr for Timestamp {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(naive) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
            let dt = NaiveDateTime::parse_from_str(naive, NAIVE_FORMAT)?;
            return Ok(Timestamp::Utc(dt.and_utc()));
        }

        let has_offset = s
            .split_once('T')
            .is_some_and(|(_, time)| time.contains(['+', '-']));
        if has_offset {
            let dt = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%:z")?;
            Ok(Timestamp::Local(dt))
        } else {
            Ok(Timestamp::Unspecified(NaiveDateTime::parse_from_str(s, NAIVE_FORMAT)?))
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  Value
// ════════════════════════════════════════════════════════════════

/// Non-NULL cell payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    UInt8(u8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Decimal(Decimal),
    Bool(bool),
    Timestamp(Timestamp),
    Float64(f64),
    Uuid(Uuid),
    Binary(Vec<u8>),
}

impl Value {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Value::Text(_) => ScalarType::Text,
            Value::UInt8(_) => ScalarType::UInt8,
            Value::Int16(_) => ScalarType::Int16,
            Value::Int32(_) => ScalarType::Int32,
            Value::Int64(_) => ScalarType::Int64,
            Value::Decimal(_) => ScalarType::Decimal,
            Value::Bool(_) => ScalarType::Bool,
            Value::Timestamp(_) => ScalarType::Timestamp,
            Value::Float64(_) => ScalarType::Float64,
            Value::Uuid(_) => ScalarType::Uuid,
            Value::Binary(_) => ScalarType::Binary,
        }
    }

    /// Integer view of the value. Only the integer kinds qualify.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::UInt8(v) => Some(i64::from(*v)),
            Value::Int16(v) => Some(i64::from(*v)),
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  TypedCell
// ════════════════════════════════════════════════════════════════

/// A single datum of a result set: its column type plus an optional value.
/// `value == None` is a relational NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedCell {
    scalar_type: ScalarType,
    value: Option<Value>,
}

impl TypedCell {
    pub fn new(value: Value) -> Self {
        Self {
            scalar_type: value.scalar_type(),
            value: Some(value),
        }
    }

    /// NULL cell of the given column type.
    pub fn null(scalar_type: ScalarType) -> Self {
        Self { scalar_type, value: None }
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

impl From<Value> for TypedCell {
    fn from(value: Value) -> Self {
        TypedCell::new(value)
    }
}

macro_rules! impl_from_native {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$native> for Value {
                fn from(v: $native) -> Self {
                    Value::$variant(v.into())
                }
            }

            impl From<$native> for TypedCell {
                fn from(v: $native) -> Self {
                    TypedCell::new(Value::from(v))
                }
            }
        )*
    };
}

impl_from_native! {
    String => Text,
    &str => Text,
    u8 => UInt8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    Decimal => Decimal,
    bool => Bool,
    Timestamp => Timestamp,
    f64 => Float64,
    Uuid => Uuid,
    Vec<u8> => Binary,
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;

    #[test]
    fn null_cell_keeps_its_type() {
        let cell = TypedCell::null(ScalarType::Int32);
        assert!(cell.is_null());
        assert_eq!(cell.scalar_type(), ScalarType::Int32);
        assert_eq!(cell.value(), None);
    }

    #[test]
    fn native_conversions_pick_the_matching_type() {
        assert_eq!(TypedCell::from("x").scalar_type(), ScalarType::Text);
        assert_eq!(TypedCell::from(7u8).scalar_type(), ScalarType::UInt8);
        assert_eq!(TypedCell::from(7i16).scalar_type(), ScalarType::Int16);
        assert_eq!(TypedCell::from(7i32).scalar_type(), ScalarType::Int32);
        assert_eq!(TypedCell::from(7i64).scalar_type(), ScalarType::Int64);
        assert_eq!(TypedCell::from(true).scalar_type(), ScalarType::Bool);
        assert_eq!(TypedCell::from(vec![1u8, 2]).scalar_type(), ScalarType::Binary);
    }

    #[test]
    fn as_i64_accepts_only_integers() {
        assert_eq!(Value::Int16(-3).as_i64(), Some(-3));
        assert_eq!(Value::UInt8(255).as_i64(), Some(255));
        assert_eq!(Value::Text("1".into()).as_i64(), None);
        assert_eq!(Value::Float64(1.0).as_i64(), None);
    }

    #[test]
    fn parse_timestamp_kinds() {
        let utc: Timestamp = "2011-03-04T05:06:07Z".parse().unwrap();
        assert_eq!(
            utc,
            Timestamp::Utc(Utc.with_ymd_and_hms(2011, 3, 4, 5, 6, 7).unwrap())
        );

        let local: Timestamp = "2011-03-04T05:06:07.25+01:00".parse().unwrap();
        match local {
            Timestamp::Local(dt) => assert_eq!(dt.offset().local_minus_utc(), 3600),
            other => panic!("expected local timestamp, got {other:?}"),
        }

        let naive: Timestamp = "2011-03-04T05:06:07".parse().unwrap();
        let expected = NaiveDate::from_ymd_opt(2011, 3, 4)
            .unwrap()
            .and_hms_opt(5, 6, 7)
            .unwrap();
        assert_eq!(naive, Timestamp::Unspecified(expected));
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        let err = "yesterday".parse::<Timestamp>().unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Format);
    }

    #[test]
    fn scalar_type_serde_names() {
        let t: ScalarType = serde_json::from_str("\"uint8\"").unwrap();
        assert_eq!(t, ScalarType::UInt8);
        let t: ScalarType = serde_json::from_str("\"float64\"").unwrap();
        assert_eq!(t, ScalarType::Float64);
        assert_eq!(ScalarType::Timestamp.to_string(), "timestamp");
    }
}
