use std::fmt;

use crate::{Result, TableError};

/// `database.schema.table`, the only accepted form for scenario tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedTableName {
    pub database: String,
    pub schema: String,
    pub table: String,
}

impl QualifiedTableName {
    pub fn parse(name: &str) -> Result<Self> {
        let unqualified = || TableError::UnqualifiedTableName {
            name: name.to_string(),
        };

        let mut parts = name.split('.').map(str::trim);
        let (Some(database), Some(schema), Some(table), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(unqualified().into());
        };

        if [database, schema, table].iter().any(|part| part.is_empty()) {
            return Err(unqualified().into());
        }

        Ok(Self {
            database: database.to_string(),
            schema: schema.to_string(),
            table: table.to_string(),
        })
    }
}

impl fmt::Display for QualifiedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.database, self.schema, self.table)
    }
}

#[must_use]
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
