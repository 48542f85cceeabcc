use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rusqlite::types::Value as SqliteValue;
use snowbdd_core::{ColumnType, lookup_type};

static TEMPORAL_CAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bCAST\s*\(\s*'((?:[^']|'')*)'\s+AS\s+(TIMESTAMP_NTZ|TIMESTAMP|DATETIME|DATE|TIME)\s*\)",
    )
    .expect("temporal cast pattern is valid")
});

/// Temporal literal casts found in a script.
///
/// SQLite gives `TIMESTAMP`, `DATE` and `TIME` numeric affinity, so
/// `CAST ('2022-01-05 04:12:17' AS TIMESTAMP)` evaluates to `2022`. Such casts
/// are rewritten to `AS TEXT`, and an expression column holding only those
/// literals takes the type named by the cast.
#[derive(Debug, Default)]
pub(crate) struct TemporalCasts {
    literals: Vec<(String, ColumnType)>,
}

pub(crate) fn rewrite_temporal_casts(sql: &str) -> (Cow<'_, str>, TemporalCasts) {
    let mut casts = TemporalCasts::default();
    let rewritten = TEMPORAL_CAST.replace_all(sql, |captures: &Captures<'_>| {
        let literal = &captures[1];
        if let Some(column_type) = lookup_type(&captures[2].to_ascii_uppercase()) {
            casts
                .literals
                .push((literal.replace("''", "'"), column_type));
        }
        format!("CAST ('{literal}' AS TEXT)")
    });

    if !casts.literals.is_empty() {
        tracing::debug!(casts = casts.literals.len(), "kept temporal casts as text");
    }
    (rewritten, casts)
}

impl TemporalCasts {
    /// Cast type for an undeclared column whose non-null values are all text
    /// matching rewritten literals of one type.
    pub(crate) fn column_type<'a>(
        &self,
        values: impl Iterator<Item = &'a SqliteValue>,
    ) -> Option<ColumnType> {
        if self.literals.is_empty() {
            return None;
        }

        let mut found = None;
        for value in values {
            let text = match value {
                SqliteValue::Null => continue,
                SqliteValue::Text(text) => text,
                _ => return None,
            };
            let column_type = self
                .literals
                .iter()
                .find(|(literal, _)| literal == text)
                .map(|(_, column_type)| *column_type)?;

            match found {
                None => found = Some(column_type),
                Some(existing) if existing == column_type => {}
                Some(_) => return None,
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::types::Value as SqliteValue;
    use snowbdd_core::ColumnType;

    use super::rewrite_temporal_casts;

    #[test]
    fn literal_casts_are_rewritten_to_text() {
        let (sql, casts) = rewrite_temporal_casts(
            "select CAST ('2022-01-05 04:12:17' AS TIMESTAMP) a, cast('04:12:17' as time) b",
        );

        assert_eq!(
            sql,
            "select CAST ('2022-01-05 04:12:17' AS TEXT) a, CAST ('04:12:17' AS TEXT) b"
        );
        let timestamp = [SqliteValue::Text("2022-01-05 04:12:17".to_string())];
        assert_eq!(casts.column_type(timestamp.iter()), Some(ColumnType::Timestamp));
        let time = [SqliteValue::Null, SqliteValue::Text("04:12:17".to_string())];
        assert_eq!(casts.column_type(time.iter()), Some(ColumnType::Time));
    }

    #[test]
    fn escaped_quotes_survive_the_rewrite() {
        let (sql, casts) = rewrite_temporal_casts("select CAST ('it''s' AS DATE)");

        assert_eq!(sql, "select CAST ('it''s' AS TEXT)");
        let values = [SqliteValue::Text("it's".to_string())];
        assert_eq!(casts.column_type(values.iter()), Some(ColumnType::Date));
    }

    #[test]
    fn other_casts_and_other_values_are_left_alone() {
        let sql = "select CAST (amount AS INTEGER), CAST ('1' AS REAL) from t";
        let (rewritten, casts) = rewrite_temporal_casts(sql);

        assert_eq!(rewritten, sql);
        let values = [SqliteValue::Text("2022-01-05".to_string())];
        assert_eq!(casts.column_type(values.iter()), None);
    }
}
