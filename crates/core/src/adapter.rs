use crate::{
    ColumnSpec, QualifiedTableName, Result, Table, create_table_sql, insert_sql, quote_ident,
};

/// Connection to the warehouse a scenario runs against.
///
/// Implementations only need `execute` and `query`; table creation and
/// loading are rendered as plain SQL unless the backend needs something else.
pub trait WarehouseAdapter {
    fn execute(&mut self, sql: &str) -> Result<()>;

    /// Runs `sql` and returns its result set with the column types the
    /// backend reports.
    fn query(&mut self, sql: &str) -> Result<Table>;

    fn use_database(&mut self, database: &str) -> Result<()> {
        self.execute(&format!("USE DATABASE {}", quote_ident(database)))
    }

    /// SQL reference for `name` inside the current database.
    fn table_target(&mut self, name: &QualifiedTableName, _temporary: bool) -> Result<String> {
        Ok(format!(
            "{}.{}",
            quote_ident(&name.schema),
            quote_ident(&name.table)
        ))
    }

    fn create_table(
        &mut self,
        name: &QualifiedTableName,
        columns: &[ColumnSpec],
        temporary: bool,
    ) -> Result<()> {
        let target = self.table_target(name, temporary)?;
        self.execute(&create_table_sql(&target, columns, temporary))
    }

    fn insert_rows(
        &mut self,
        name: &QualifiedTableName,
        table: &Table,
        temporary: bool,
    ) -> Result<()> {
        let target = self.table_target(name, temporary)?;
        match insert_sql(&target, table) {
            Some(sql) => self.execute(&sql),
            None => Ok(()),
        }
    }
}
