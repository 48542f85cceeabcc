use std::fmt;

use crate::{Result, TableError};

/// Column type bound to a type tag in a scenario table header.
///
/// Aliases collapse onto one variant, but families the warehouse reports as
/// different types (`FLOAT`/`DOUBLE`, `VARCHAR`/`CHAR`, `DATETIME`/`TIMESTAMP`)
/// keep separate variants even where the native value is the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnType {
    Integer,
    BigInt,
    Decimal,
    Float,
    Double,
    Boolean,
    String,
    Char,
    Binary,
    Date,
    Time,
    DateTime,
    Timestamp,
}

/// Native value representation produced for a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Integer,
    BigInt,
    Decimal,
    Float,
    Boolean,
    String,
    Binary,
    Date,
    Time,
    DateTime,
}

const TYPE_TAGS: &[(&str, ColumnType)] = &[
    ("INT", ColumnType::Integer),
    ("INTEGER", ColumnType::Integer),
    ("SMALLINT", ColumnType::Integer),
    ("TINYINT", ColumnType::Integer),
    ("BYTEINT", ColumnType::Integer),
    ("BIGINT", ColumnType::BigInt),
    ("NUMBER", ColumnType::Decimal),
    ("DECIMAL", ColumnType::Decimal),
    ("NUMERIC", ColumnType::Decimal),
    ("FLOAT", ColumnType::Float),
    ("FLOAT4", ColumnType::Float),
    ("FLOAT8", ColumnType::Float),
    ("REAL", ColumnType::Float),
    ("DOUBLE", ColumnType::Double),
    ("DOUBLE PRECISION", ColumnType::Double),
    ("BOOLEAN", ColumnType::Boolean),
    ("STRING", ColumnType::String),
    ("TEXT", ColumnType::String),
    ("VARCHAR", ColumnType::String),
    ("CHAR", ColumnType::Char),
    ("CHARACTER", ColumnType::Char),
    ("BINARY", ColumnType::Binary),
    ("VARBINARY", ColumnType::Binary),
    ("DATE", ColumnType::Date),
    ("TIME", ColumnType::Time),
    ("DATETIME", ColumnType::DateTime),
    ("TIMESTAMP", ColumnType::Timestamp),
    ("TIMESTAMP_NTZ", ColumnType::Timestamp),
];

/// Resolves a header type tag. Lookup is case-sensitive after trimming.
pub fn resolve_type(tag: &str) -> Result<ColumnType> {
    lookup_type(tag).ok_or_else(|| {
        TableError::UnknownType {
            tag: tag.trim().to_string(),
        }
        .into()
    })
}

pub fn lookup_type(tag: &str) -> Option<ColumnType> {
    let tag = tag.trim();
    TYPE_TAGS
        .iter()
        .find(|(candidate, _)| *candidate == tag)
        .map(|(_, column_type)| *column_type)
}

impl ColumnType {
    /// Canonical name, also used when rendering DDL.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Decimal => "DECIMAL",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Boolean => "BOOLEAN",
            Self::String => "VARCHAR",
            Self::Char => "CHAR",
            Self::Binary => "BINARY",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
        }
    }

    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Integer => ValueKind::Integer,
            Self::BigInt => ValueKind::BigInt,
            Self::Decimal => ValueKind::Decimal,
            Self::Float | Self::Double => ValueKind::Float,
            Self::Boolean => ValueKind::Boolean,
            Self::String | Self::Char => ValueKind::String,
            Self::Binary => ValueKind::Binary,
            Self::Date => ValueKind::Date,
            Self::Time => ValueKind::Time,
            Self::DateTime | Self::Timestamp => ValueKind::DateTime,
        }
    }

    #[must_use]
    pub const fn is_string_like(self) -> bool {
        matches!(self.kind(), ValueKind::String)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
