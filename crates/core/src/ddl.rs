use std::fmt::Write as _;

use crate::{ColumnSpec, Table, Value, quote_ident};

/// `CREATE [TEMPORARY] TABLE <target> (...)` using canonical type names.
#[must_use]
pub fn create_table_sql(target: &str, columns: &[ColumnSpec], temporary: bool) -> String {
    let prefix = if temporary {
        "CREATE TEMPORARY TABLE"
    } else {
        "CREATE TABLE"
    };
    let definitions = columns
        .iter()
        .map(|column| format!("{} {}", quote_ident(&column.name), column.column_type.name()))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{prefix} {target} ({definitions})")
}

/// One multi-row `INSERT` carrying every row, or `None` for an empty table.
#[must_use]
pub fn insert_sql(target: &str, table: &Table) -> Option<String> {
    if table.is_empty() {
        return None;
    }

    let columns = table
        .columns()
        .iter()
        .map(|column| quote_ident(&column.name))
        .collect::<Vec<_>>()
        .join(", ");
    let rows = table
        .rows()
        .iter()
        .map(|row| {
            let values = row.iter().map(sql_literal).collect::<Vec<_>>().join(", ");
            format!("({values})")
        })
        .collect::<Vec<_>>()
        .join(", ");

    Some(format!("INSERT INTO {target} ({columns}) VALUES {rows}"))
}

#[must_use]
pub fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(value) => value.to_string(),
        Value::BigInt(value) => value.to_string(),
        Value::Decimal(value) => value.to_string(),
        Value::Float(value) if value.is_finite() => format!("{value:?}"),
        Value::Float(value) => format!("CAST ('{value}' AS DOUBLE)"),
        Value::Boolean(true) => "TRUE".to_string(),
        Value::Boolean(false) => "FALSE".to_string(),
        Value::String(value) => quote_string(value),
        Value::Binary(bytes) => {
            let mut literal = String::with_capacity(bytes.len() * 2 + 3);
            literal.push_str("X'");
            for byte in bytes {
                let _ = write!(literal, "{byte:02X}");
            }
            literal.push('\'');
            literal
        }
        Value::Date(value) => quote_string(&value.to_string()),
        Value::Time(value) => quote_string(&value.to_string()),
        Value::DateTime(value) => quote_string(&value.to_string()),
    }
}

pub(crate) fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
