use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionConfig {
    pub database: String,
    /// Backend-specific session settings, applied when the connection opens.
    /// The SQLite adapter issues one `PRAGMA` per entry.
    pub extra: BTreeMap<String, String>,
}

impl ConnectionConfig {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            extra: BTreeMap::new(),
        }
    }
}

/// Knobs for the result-set assertion step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertOptions {
    pub check_types: bool,
    pub fixed_timestamp: Option<String>,
    pub fixed_time: Option<String>,
}

impl Default for AssertOptions {
    fn default() -> Self {
        Self {
            check_types: true,
            fixed_timestamp: None,
            fixed_time: None,
        }
    }
}
