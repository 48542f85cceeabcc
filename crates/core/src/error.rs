use std::error::Error as StdError;

use crate::ColumnType;

pub type Result<T> = std::result::Result<T, Error>;

type BoxedSource = Box<dyn StdError + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Assertion(#[from] AssertionError),
    #[error(transparent)]
    Execute(#[from] ExecutionError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

/// Problems with the scenario definition itself. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("unknown column type `{tag}`")]
    UnknownType { tag: String },
    #[error(
        "You must specify name AND data type for columns like this 'my_field:string' at {fragment}"
    )]
    MalformedHeader { fragment: String },
    #[error("table header declares no columns")]
    EmptyHeader,
    #[error("column `{name}` is declared more than once")]
    DuplicateColumn { name: String },
    #[error("row[{row_index}] has {actual} cells but the header declares {expected} columns")]
    RowWidth {
        row_index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Table name should be fully qualified ex: db_name.schema_name.table_name, got `{name}`")]
    UnqualifiedTableName { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("cannot decode `{raw}` as {column_type} for column `{column}`: {reason}")]
    Cell {
        column: String,
        raw: String,
        column_type: ColumnType,
        reason: String,
    },
}

/// Mismatch between an actual and an expected table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssertionError {
    #[error("key column `{column}` is not present in both tables")]
    UnknownKeyColumn { column: String },
    #[error("column sets differ: missing={missing:?} extra={extra:?}")]
    SchemaMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },
    #[error("column `{column}` type differs: expected {expected}, actual {actual}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },
    #[error("row counts differ: expected {expected}, actual {actual}")]
    RowCountMismatch { expected: usize, actual: usize },
    #[error("row[{row}] column `{column}` differs: expected {expected}, actual {actual}")]
    ValueMismatch {
        row: usize,
        column: String,
        expected: String,
        actual: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("statement failed: {sql}: {source}")]
    StatementFailed {
        sql: String,
        #[source]
        source: BoxedSource,
    },
    #[error("failed to read sql script `{path}`: {source}")]
    ScriptRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExecutionError {
    pub fn statement_failed<E>(sql: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::StatementFailed {
            sql: sql.into(),
            source: Box::new(source),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("step does not match any known pattern: {step}")]
    UnknownStep { step: String },
    #[error("failed to read scenario file `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario document at line {line}: {source}")]
    Document {
        line: usize,
        #[source]
        source: BoxedSource,
    },
    #[error("expected error: {expected}, but got {actual}")]
    ExpectedError { expected: String, actual: String },
}
