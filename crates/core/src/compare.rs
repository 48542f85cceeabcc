use std::{cmp::Ordering, collections::BTreeSet};

use crate::{AssertionError, ColumnType, Result, Table, Value};

/// Asserts that `actual` and `expected` hold the same rows, ignoring both row
/// and column order.
///
/// The column sets must be equal first. Rows of each table are then stably
/// sorted by `key_columns` (nulls first) and compared cell by cell in
/// lexicographic column order; the first differing cell is reported. With
/// `check_types` the declared column types must match as well.
///
/// Cells compare with [`Value::numeric_cmp`], so numbers of different kinds
/// (`INTEGER` against `BIGINT`, `DOUBLE` against `DECIMAL`) are equal when
/// their values are. Only `check_types` tells such columns apart.
pub fn assert_table_eq(
    actual: &Table,
    expected: &Table,
    key_columns: &[&str],
    check_types: bool,
) -> Result<()> {
    let columns = compare_column_sets(actual, expected)?;
    if let Some(key) = key_columns.iter().find(|key| !columns.contains(*key)) {
        return Err(AssertionError::UnknownKeyColumn {
            column: (*key).to_string(),
        }
        .into());
    }

    if check_types {
        compare_column_types(actual, expected, &columns)?;
    }

    if actual.len() != expected.len() {
        return Err(AssertionError::RowCountMismatch {
            expected: expected.len(),
            actual: actual.len(),
        }
        .into());
    }

    let actual_rows = sorted_projection(actual, key_columns, &columns);
    let expected_rows = sorted_projection(expected, key_columns, &columns);

    for (row, (actual_row, expected_row)) in actual_rows.iter().zip(&expected_rows).enumerate() {
        for (column, (actual_value, expected_value)) in
            columns.iter().zip(actual_row.iter().zip(expected_row))
        {
            if actual_value.numeric_cmp(expected_value).is_ne() {
                return Err(AssertionError::ValueMismatch {
                    row,
                    column: (*column).to_string(),
                    expected: expected_value.to_string(),
                    actual: actual_value.to_string(),
                }
                .into());
            }
        }
    }

    Ok(())
}

/// Returns the shared column names in canonical (lexicographic) order.
fn compare_column_sets<'a>(actual: &'a Table, expected: &Table) -> Result<Vec<&'a str>> {
    let actual_names: BTreeSet<&str> = actual.column_names().into_iter().collect();
    let expected_names: BTreeSet<&str> = expected.column_names().into_iter().collect();

    if actual_names == expected_names {
        return Ok(actual_names.into_iter().collect());
    }

    Err(AssertionError::SchemaMismatch {
        missing: expected_names
            .difference(&actual_names)
            .map(|name| (*name).to_string())
            .collect(),
        extra: actual_names
            .difference(&expected_names)
            .map(|name| (*name).to_string())
            .collect(),
    }
    .into())
}

fn compare_column_types(actual: &Table, expected: &Table, columns: &[&str]) -> Result<()> {
    for name in columns {
        let (Some(actual_type), Some(expected_type)) =
            (column_type(actual, name), column_type(expected, name))
        else {
            continue;
        };

        if actual_type != expected_type {
            return Err(AssertionError::TypeMismatch {
                column: (*name).to_string(),
                expected: expected_type,
                actual: actual_type,
            }
            .into());
        }
    }

    Ok(())
}

fn column_type(table: &Table, name: &str) -> Option<ColumnType> {
    table.column(name).map(|column| column.column_type)
}

/// Rows sorted by key columns, each reordered to `columns`.
fn sorted_projection<'t>(
    table: &'t Table,
    key_columns: &[&str],
    columns: &[&str],
) -> Vec<Vec<&'t Value>> {
    let key_indexes: Vec<usize> = key_columns
        .iter()
        .filter_map(|key| table.column_index(key))
        .collect();
    let column_indexes: Vec<usize> = columns
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();

    let mut rows: Vec<&Vec<Value>> = table.rows().iter().collect();
    rows.sort_by(|left, right| compare_keys(left, right, &key_indexes));

    rows.into_iter()
        .map(|row| column_indexes.iter().map(|index| &row[*index]).collect())
        .collect()
}

fn compare_keys(left: &[Value], right: &[Value], key_indexes: &[usize]) -> Ordering {
    key_indexes
        .iter()
        .map(|index| left[*index].numeric_cmp(&right[*index]))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
