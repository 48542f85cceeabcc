use snowbdd_core::{ExecutionError, Result, Table, WarehouseAdapter};

/// Adapter that records every executed statement and has no result sets.
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    executed_sql: Vec<String>,
    fail_on: Option<String>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails any statement containing `fragment`.
    pub fn failing_on(mut self, fragment: impl Into<String>) -> Self {
        self.fail_on = Some(fragment.into());
        self
    }

    pub fn executed_sql(&self) -> &[String] {
        &self.executed_sql
    }
}

impl WarehouseAdapter for RecordingAdapter {
    fn execute(&mut self, sql: &str) -> Result<()> {
        self.executed_sql.push(sql.to_string());
        match &self.fail_on {
            Some(fragment) if sql.contains(fragment.as_str()) => Err(
                ExecutionError::statement_failed(sql, std::io::Error::other("injected failure"))
                    .into(),
            ),
            _ => Ok(()),
        }
    }

    fn query(&mut self, sql: &str) -> Result<Table> {
        Err(ExecutionError::statement_failed(sql, std::io::Error::other("no result sets")).into())
    }
}
