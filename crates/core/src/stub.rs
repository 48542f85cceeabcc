use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::ddl::quote_string;

static TIMESTAMP_FUNCTIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:current_timestamp|localtimestamp|getdate|systimestamp|sysdate)\s*\(\s*\)")
        .expect("timestamp function pattern is valid")
});

static TIME_FUNCTIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:current_time|localtime)\s*\(\s*\)")
        .expect("time function pattern is valid")
});

/// Replaces zero-argument calls to volatile time functions with fixed casts so
/// that query results containing "now" can be compared against golden tables.
///
/// `current_timestamp()` becomes `CAST ('<fixed_timestamp>' AS TIMESTAMP)` and
/// `current_time()` becomes `CAST ('<fixed_time>' AS TIME)`. With both values
/// absent the script is returned unchanged.
#[must_use]
pub fn stub_sql_functions(
    sql: &str,
    fixed_timestamp: Option<&str>,
    fixed_time: Option<&str>,
) -> String {
    let mut stubbed = sql.to_string();

    if let Some(timestamp) = fixed_timestamp {
        let replacement = format!("CAST ({} AS TIMESTAMP)", quote_string(timestamp));
        stubbed = TIMESTAMP_FUNCTIONS
            .replace_all(&stubbed, NoExpand(&replacement))
            .into_owned();
    }

    if let Some(time) = fixed_time {
        let replacement = format!("CAST ({} AS TIME)", quote_string(time));
        stubbed = TIME_FUNCTIONS
            .replace_all(&stubbed, NoExpand(&replacement))
            .into_owned();
    }

    if stubbed != sql {
        tracing::debug!(sql = %stubbed, "stubbed volatile sql functions");
    }
    stubbed
}
