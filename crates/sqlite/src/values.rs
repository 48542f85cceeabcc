use rusqlite::types::Value as SqliteValue;
use rust_decimal::Decimal;
use snowbdd_core::{ColumnSpec, ColumnType, DecodeError, Result, Value, lookup_type, parse_literal};

/// Maps a declared column type such as `VARCHAR(20)` onto the registry.
pub(crate) fn declared_type(decl_type: &str) -> Option<ColumnType> {
    let base = decl_type
        .split_once('(')
        .map_or(decl_type, |(base, _)| base)
        .trim()
        .to_ascii_uppercase();
    lookup_type(&base)
}

/// Column type for an expression column, taken from its first non-null value.
pub(crate) fn inferred_type<'a>(mut values: impl Iterator<Item = &'a SqliteValue>) -> ColumnType {
    match values.find(|value| !matches!(value, SqliteValue::Null)) {
        Some(SqliteValue::Integer(_)) => ColumnType::Integer,
        Some(SqliteValue::Real(_)) => ColumnType::Double,
        Some(SqliteValue::Blob(_)) => ColumnType::Binary,
        Some(SqliteValue::Text(_) | SqliteValue::Null) | None => ColumnType::String,
    }
}

pub(crate) fn convert_value(value: SqliteValue, column: &ColumnSpec) -> Result<Value> {
    match value {
        SqliteValue::Null => Ok(Value::Null),
        SqliteValue::Integer(integer) => convert_integer(integer, column),
        SqliteValue::Real(real) => convert_real(real, column),
        SqliteValue::Text(text) => parse_literal(&text, column),
        SqliteValue::Blob(bytes) => match column.column_type {
            ColumnType::Binary => Ok(Value::Binary(bytes)),
            _ => parse_literal(&String::from_utf8_lossy(&bytes), column),
        },
    }
}

fn convert_integer(integer: i64, column: &ColumnSpec) -> Result<Value> {
    Ok(match column.column_type {
        ColumnType::Integer => Value::Integer(integer),
        ColumnType::BigInt => Value::BigInt(i128::from(integer)),
        ColumnType::Decimal => Value::Decimal(Decimal::from(integer)),
        ColumnType::Float | ColumnType::Double => Value::Float(integer as f64),
        ColumnType::Boolean => Value::Boolean(integer != 0),
        ColumnType::String | ColumnType::Char => Value::String(integer.to_string()),
        ColumnType::Binary
        | ColumnType::Date
        | ColumnType::Time
        | ColumnType::DateTime
        | ColumnType::Timestamp => {
            return Err(storage_class_error(integer.to_string(), column, "integer"));
        }
    })
}

fn convert_real(real: f64, column: &ColumnSpec) -> Result<Value> {
    match column.column_type {
        ColumnType::Float | ColumnType::Double => Ok(Value::Float(real)),
        ColumnType::Decimal => Decimal::try_from(real)
            .map(Value::Decimal)
            .map_err(|error| storage_class_error(real.to_string(), column, &error.to_string())),
        ColumnType::String | ColumnType::Char => Ok(Value::String(real.to_string())),
        ColumnType::Integer | ColumnType::BigInt if real.fract() == 0.0 => {
            parse_literal(&format!("{real:.0}"), column)
        }
        _ => Err(storage_class_error(real.to_string(), column, "real")),
    }
}

fn storage_class_error(raw: String, column: &ColumnSpec, storage: &str) -> snowbdd_core::Error {
    DecodeError::Cell {
        column: column.name.clone(),
        raw,
        column_type: column.column_type,
        reason: format!("sqlite {storage} value does not fit the column type"),
    }
    .into()
}
