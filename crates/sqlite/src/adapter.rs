use std::{collections::BTreeSet, error::Error as StdError};

use rusqlite::{Connection, types::Value as SqliteValue};
use snowbdd_core::{
    ColumnSpec, ConnectionConfig, ExecutionError, QualifiedTableName, Result, Table,
    WarehouseAdapter, quote_ident,
};

use crate::{
    casts::rewrite_temporal_casts,
    values::{convert_value, declared_type, inferred_type},
};

const CONNECT_SQL: &str = "CONNECT sqlite";
const IN_MEMORY_DATABASE: &str = ":memory:";
const MAIN_SCHEMA: &str = "main";
const TEMP_SCHEMA: &str = "temp";

/// Runs scenarios against a SQLite database.
///
/// SQLite has a single catalogue, so `USE DATABASE` is only recorded. Each
/// schema is attached as an in-memory database the first time a table is
/// created in it, and temporary tables always live in SQLite's `temp` schema.
/// Scripts can therefore refer to scenario tables by their bare name.
///
/// Casts of string literals to temporal types keep their text, so stubbed
/// `current_timestamp()` calls come back as timestamps.
pub struct SqliteAdapter {
    connection: Connection,
    current_database: Option<String>,
    attached_schemas: BTreeSet<String>,
}

impl SqliteAdapter {
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let database = if config.database.is_empty() {
            IN_MEMORY_DATABASE
        } else {
            config.database.as_str()
        };

        let connection =
            Connection::open(database).map_err(|source| execution_error(CONNECT_SQL, source))?;
        tracing::debug!(database, "opened sqlite connection");

        for (pragma, value) in &config.extra {
            connection
                .pragma_update(None, pragma.as_str(), value.as_str())
                .map_err(|source| execution_error(&format!("PRAGMA {pragma} = {value}"), source))?;
            tracing::debug!(pragma = %pragma, value = %value, "applied sqlite pragma");
        }

        Ok(Self {
            connection,
            current_database: None,
            attached_schemas: BTreeSet::new(),
        })
    }

    #[must_use]
    pub fn current_database(&self) -> Option<&str> {
        self.current_database.as_deref()
    }

    fn ensure_schema_attached(&mut self, schema: &str) -> Result<()> {
        if schema == MAIN_SCHEMA || schema == TEMP_SCHEMA || self.attached_schemas.contains(schema) {
            return Ok(());
        }

        let sql = format!(
            "ATTACH DATABASE '{IN_MEMORY_DATABASE}' AS {}",
            quote_ident(schema)
        );
        self.execute(&sql)?;
        self.attached_schemas.insert(schema.to_string());
        Ok(())
    }
}

impl WarehouseAdapter for SqliteAdapter {
    fn execute(&mut self, sql: &str) -> Result<()> {
        let (prepared, _) = rewrite_temporal_casts(sql);
        self.connection
            .execute_batch(&prepared)
            .map_err(|source| execution_error(sql, source))
    }

    fn query(&mut self, sql: &str) -> Result<Table> {
        let (prepared, casts) = rewrite_temporal_casts(sql);
        let mut statement = self
            .connection
            .prepare(&prepared)
            .map_err(|source| execution_error(sql, source))?;
        let declared: Vec<(String, Option<String>)> = statement
            .columns()
            .into_iter()
            .map(|column| {
                (
                    column.name().to_string(),
                    column.decl_type().map(str::to_string),
                )
            })
            .collect();

        let mut raw_rows: Vec<Vec<SqliteValue>> = Vec::new();
        let mut rows = statement
            .query([])
            .map_err(|source| execution_error(sql, source))?;
        while let Some(row) = rows.next().map_err(|source| execution_error(sql, source))? {
            let values = (0..declared.len())
                .map(|index| row.get::<_, SqliteValue>(index))
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|source| execution_error(sql, source))?;
            raw_rows.push(values);
        }

        let columns: Vec<ColumnSpec> = declared
            .into_iter()
            .enumerate()
            .map(|(index, (name, decl_type))| {
                let column_type = decl_type
                    .as_deref()
                    .and_then(declared_type)
                    .or_else(|| casts.column_type(raw_rows.iter().map(|row| &row[index])))
                    .unwrap_or_else(|| inferred_type(raw_rows.iter().map(|row| &row[index])));
                ColumnSpec::new(name, column_type)
            })
            .collect();

        let rows = raw_rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&columns)
                    .map(|(value, column)| convert_value(value, column))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Table::new(columns, rows)
    }

    fn use_database(&mut self, database: &str) -> Result<()> {
        tracing::debug!(database, "sqlite has a single catalogue; recording database only");
        self.current_database = Some(database.to_string());
        Ok(())
    }

    fn table_target(&mut self, name: &QualifiedTableName, temporary: bool) -> Result<String> {
        let schema = if temporary {
            TEMP_SCHEMA
        } else {
            self.ensure_schema_attached(&name.schema)?;
            name.schema.as_str()
        };

        Ok(format!("{}.{}", quote_ident(schema), quote_ident(&name.table)))
    }
}

fn execution_error<E>(sql: &str, source: E) -> snowbdd_core::Error
where
    E: StdError + Send + Sync + 'static,
{
    ExecutionError::statement_failed(sql, source).into()
}
