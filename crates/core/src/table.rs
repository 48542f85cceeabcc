use std::collections::BTreeSet;

use crate::{ColumnType, Result, TableError, Value, decode_cell, resolve_type};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Typed rows over named columns. Row and column order are representational
/// only; [`crate::assert_table_eq`] ignores both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<ColumnSpec>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Every row must have exactly one value per column, and column names
    /// must be unique.
    pub fn new(columns: Vec<ColumnSpec>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn {
                    name: column.name.clone(),
                }
                .into());
            }
        }

        for (row_index, row) in rows.iter().enumerate() {
            ensure_row_width(row_index, columns.len(), row.len())?;
        }

        Ok(Self { columns, rows })
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_parts(self) -> (Vec<ColumnSpec>, Vec<Vec<Value>>) {
        (self.columns, self.rows)
    }
}

/// Parses a pipe-delimited scenario table.
///
/// ```text
/// | id: INTEGER | name: STRING | active: BOOLEAN |
/// | 1           | "tilak"      | true            |
/// | 2           | "t"          | {null}          |
/// ```
///
/// The first line is the header of `name:TYPE` cells. Later lines without a
/// `|` are ignored.
pub fn parse_table(text: &str) -> Result<Table> {
    let mut lines = text.split('\n');
    let header = lines.next().unwrap_or_default();
    let columns = parse_header(header)?;

    let mut rows = Vec::new();
    for (row_index, line) in lines.filter(|line| line.contains('|')).enumerate() {
        let cells = inner_fragments(line);
        ensure_row_width(row_index, columns.len(), cells.len())?;

        let row = cells
            .iter()
            .zip(&columns)
            .map(|(cell, column)| decode_cell(cell, column))
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    let table = Table::new(columns, rows)?;
    tracing::debug!(
        columns = ?table.column_names(),
        rows = table.len(),
        "parsed scenario table"
    );
    Ok(table)
}

fn parse_header(header: &str) -> Result<Vec<ColumnSpec>> {
    let fragments = inner_fragments(header);
    if fragments.is_empty() {
        return Err(TableError::EmptyHeader.into());
    }

    fragments
        .into_iter()
        .map(|fragment| parse_column(fragment.trim()))
        .collect()
}

fn parse_column(fragment: &str) -> Result<ColumnSpec> {
    let malformed = || TableError::MalformedHeader {
        fragment: fragment.to_string(),
    };

    let mut parts = fragment.split(':');
    let (Some(name), Some(tag), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed().into());
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(malformed().into());
    }

    Ok(ColumnSpec::new(name, resolve_type(tag)?))
}

/// Splits on `|` and drops the text before the first and after the last pipe.
fn inner_fragments(line: &str) -> Vec<&str> {
    let fragments: Vec<&str> = line.split('|').collect();
    if fragments.len() < 2 {
        return Vec::new();
    }
    fragments[1..fragments.len() - 1].to_vec()
}

fn ensure_row_width(row_index: usize, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        return Ok(());
    }

    Err(TableError::RowWidth {
        row_index,
        expected,
        actual,
    }
    .into())
}
