use std::fmt;

use serde::Serialize;

use super::shape::{SimpleType, TemporalKind};

/// Storage-representable column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    Float32,
    Float64,
    Char,
    Text,
    Uuid,
    /// Generic date/time type for temporal values without a zone.
    Timestamp,
    Array(Box<ColumnType>),
}

impl ColumnType {
    pub fn array_of(element: ColumnType) -> Self {
        ColumnType::Array(Box::new(element))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ColumnType::Array(_))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Boolean => f.write_str("boolean"),
            ColumnType::Int8 => f.write_str("int8"),
            ColumnType::Int16 => f.write_str("int16"),
            ColumnType::Int32 => f.write_str("int32"),
            ColumnType::Int64 => f.write_str("int64"),
            ColumnType::Int128 => f.write_str("int128"),
            ColumnType::UInt8 => f.write_str("uint8"),
            ColumnType::UInt16 => f.write_str("uint16"),
            ColumnType::UInt32 => f.write_str("uint32"),
            ColumnType::UInt64 => f.write_str("uint64"),
            ColumnType::UInt128 => f.write_str("uint128"),
            ColumnType::Float32 => f.write_str("float32"),
            ColumnType::Float64 => f.write_str("float64"),
            ColumnType::Char => f.write_str("char"),
            ColumnType::Text => f.write_str("text"),
            ColumnType::Uuid => f.write_str("uuid"),
            ColumnType::Timestamp => f.write_str("timestamp"),
            ColumnType::Array(element) => write!(f, "{element}[]"),
        }
    }
}

/// Conversion table from scalar value types to column types.
///
/// Enums and zoned date/times are stored as text, the remaining temporal
/// kinds collapse into [`ColumnType::Timestamp`], everything else passes
/// through as its native column type.
pub fn storage_type(simple: SimpleType) -> ColumnType {
    match simple {
        SimpleType::Enum(_) => ColumnType::Text,
        SimpleType::Temporal(TemporalKind::Zoned) => ColumnType::Text,
        SimpleType::Temporal(
            TemporalKind::Date | TemporalKind::Time | TemporalKind::DateTime | TemporalKind::Instant,
        ) => ColumnType::Timestamp,
        SimpleType::Bool => ColumnType::Boolean,
        SimpleType::I8 => ColumnType::Int8,
        SimpleType::I16 => ColumnType::Int16,
        SimpleType::I32 => ColumnType::Int32,
        SimpleType::I64 => ColumnType::Int64,
        SimpleType::I128 => ColumnType::Int128,
        SimpleType::U8 => ColumnType::UInt8,
        SimpleType::U16 => ColumnType::UInt16,
        SimpleType::U32 => ColumnType::UInt32,
        SimpleType::U64 => ColumnType::UInt64,
        SimpleType::U128 => ColumnType::UInt128,
        SimpleType::F32 => ColumnType::Float32,
        SimpleType::F64 => ColumnType::Float64,
        SimpleType::Char => ColumnType::Char,
        SimpleType::Text => ColumnType::Text,
        SimpleType::Uuid => ColumnType::Uuid,
    }
}
