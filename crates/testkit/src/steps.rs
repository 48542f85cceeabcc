use std::{fs, path::Path};

use once_cell::sync::Lazy;
use regex::Regex;
use snowbdd_core::{
    AssertOptions, ExecutionError, QualifiedTableName, Result, ScenarioError, WarehouseAdapter,
    assert_table_eq, parse_table, stub_sql_functions,
};

static TEMPORARY_TABLE_STEP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^a temporary table called "(?P<table_name>.+)" has\s+(?P<table>[\s\S]+)$"#)
        .expect("temporary table step pattern is valid")
});

static TABLE_STEP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^a table called "(?P<table_name>.+)" has\s+(?P<table>[\s\S]+)$"#)
        .expect("table step pattern is valid")
});

static SCRIPT_RESULT_STEP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^a sql script "(?P<script_path>.+)" runs and the result is\n(?P<table>[\s\S]+)$"#)
        .expect("script result step pattern is valid")
});

const CONNECTION_STEP: &str = "a snowflake connection";
const GHERKIN_KEYWORDS: &[&str] = &["Given ", "When ", "Then ", "And ", "But "];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Connection,
    CreateTable {
        table_name: String,
        table: String,
        temporary: bool,
    },
    AssertResult {
        script_path: String,
        table: String,
    },
}

/// Matches step text (with or without a leading Gherkin keyword) against the
/// known step patterns.
pub fn parse_step(text: &str) -> Result<Step> {
    let text = strip_keyword(text.trim_start());

    if text.trim_end() == CONNECTION_STEP {
        return Ok(Step::Connection);
    }

    for (pattern, temporary) in [(&*TEMPORARY_TABLE_STEP, true), (&*TABLE_STEP, false)] {
        if let Some(captures) = pattern.captures(text) {
            return Ok(Step::CreateTable {
                table_name: captures["table_name"].to_string(),
                table: captures["table"].to_string(),
                temporary,
            });
        }
    }

    if let Some(captures) = SCRIPT_RESULT_STEP.captures(text) {
        return Ok(Step::AssertResult {
            script_path: captures["script_path"].to_string(),
            table: captures["table"].to_string(),
        });
    }

    Err(ScenarioError::UnknownStep {
        step: text.to_string(),
    }
    .into())
}

fn strip_keyword(text: &str) -> &str {
    GHERKIN_KEYWORDS
        .iter()
        .find_map(|keyword| text.strip_prefix(keyword))
        .unwrap_or(text)
}

/// Runs one step. Relative script paths resolve against `base_dir`.
pub fn run_step(
    adapter: &mut dyn WarehouseAdapter,
    text: &str,
    base_dir: &Path,
    options: &AssertOptions,
) -> Result<()> {
    match parse_step(text)? {
        Step::Connection => Ok(()),
        Step::CreateTable {
            table_name,
            table,
            temporary,
        } => create_table_with_data(adapter, &table, &table_name, temporary),
        Step::AssertResult { script_path, table } => {
            assert_table_contains(adapter, &base_dir.join(script_path), &table, options)
        }
    }
}

/// Creates `table_name` and loads the rows of the scenario table into it.
///
/// The table text and the three-part name are both validated before the
/// adapter is touched.
pub fn create_table_with_data(
    adapter: &mut dyn WarehouseAdapter,
    table: &str,
    table_name: &str,
    temporary: bool,
) -> Result<()> {
    let table = parse_table(table)?;
    let name = QualifiedTableName::parse(table_name)?;

    adapter.use_database(&name.database)?;
    adapter.create_table(&name, table.columns(), temporary)?;
    adapter.insert_rows(&name, &table, temporary)?;

    tracing::info!(
        table = %name,
        temporary,
        rows = table.len(),
        "created scenario table"
    );
    Ok(())
}

/// Runs the script at `script_path` and asserts its result set equals the
/// scenario table, using every result column as a sort key.
pub fn assert_table_contains(
    adapter: &mut dyn WarehouseAdapter,
    script_path: &Path,
    table: &str,
    options: &AssertOptions,
) -> Result<()> {
    let sql = fs::read_to_string(script_path).map_err(|source| ExecutionError::ScriptRead {
        path: script_path.display().to_string(),
        source,
    })?;
    let sql = stub_sql_functions(
        &sql,
        options.fixed_timestamp.as_deref(),
        options.fixed_time.as_deref(),
    );

    tracing::info!(script = %script_path.display(), %sql, "executing query");
    let actual = adapter.query(&sql)?;
    let expected = parse_table(table)?;

    tracing::debug!(
        expected = ?expected.columns(),
        actual = ?actual.columns(),
        "comparing result schema"
    );

    let key_columns = actual.column_names();
    assert_table_eq(&actual, &expected, &key_columns, options.check_types)
}
