use std::collections::VecDeque;

use snowbdd_core::{ExecutionError, Result, Table, WarehouseAdapter};

/// Records statements and answers queries from a queue of prepared tables.
#[derive(Debug, Default)]
pub struct ScriptedAdapter {
    pub executed_sql: Vec<String>,
    pub queried_sql: Vec<String>,
    results: VecDeque<Table>,
}

#[allow(dead_code)]
impl ScriptedAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(table: Table) -> Self {
        let mut adapter = Self::default();
        adapter.results.push_back(table);
        adapter
    }

    pub fn call_count(&self) -> usize {
        self.executed_sql.len() + self.queried_sql.len()
    }
}

impl WarehouseAdapter for ScriptedAdapter {
    fn execute(&mut self, sql: &str) -> Result<()> {
        self.executed_sql.push(sql.to_string());
        Ok(())
    }

    fn query(&mut self, sql: &str) -> Result<Table> {
        self.queried_sql.push(sql.to_string());
        self.results.pop_front().ok_or_else(|| {
            ExecutionError::statement_failed(sql, std::io::Error::other("no scripted result"))
                .into()
        })
    }
}
