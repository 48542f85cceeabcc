mod error_presentation;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use error_presentation::{CliError, CliResult, render_runtime_error};
use snowbdd_core::{AssertOptions, ConnectionConfig};
use snowbdd_testkit::{TestResult, load_scenarios_from_path, run_scenario};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "snowbdd", about = "Run table-driven warehouse scenarios")]
struct Cli {
    /// SQLite database the scenarios run against.
    #[arg(long, default_value = ":memory:", env = "SNOWBDD_DATABASE")]
    database: String,

    /// Compare values only, ignoring declared column types.
    #[arg(long)]
    no_check_types: bool,

    /// Literal substituted for `current_timestamp()` and friends.
    #[arg(long, value_name = "TIMESTAMP")]
    fixed_timestamp: Option<String>,

    /// Literal substituted for `current_time()` and `localtime()`.
    #[arg(long, value_name = "TIME")]
    fixed_time: Option<String>,

    /// SQLite `PRAGMA` applied to every connection. Repeatable.
    #[arg(long = "pragma", value_name = "NAME=VALUE", value_parser = parse_pragma)]
    pragmas: Vec<(String, String)>,

    #[arg(required = true, value_name = "SCENARIO_FILE")]
    scenarios: Vec<PathBuf>,
}

#[derive(Debug, Default)]
struct Summary {
    passed: usize,
    failed: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(error) => {
            eprintln!("{}", render_runtime_error(error));
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> CliResult<Summary> {
    let defaults = AssertOptions {
        check_types: !cli.no_check_types,
        fixed_timestamp: cli.fixed_timestamp.clone(),
        fixed_time: cli.fixed_time.clone(),
    };
    let config = ConnectionConfig {
        database: cli.database.clone(),
        extra: cli.pragmas.iter().cloned().collect(),
    };
    let mut summary = Summary::default();

    for path in &cli.scenarios {
        let scenarios =
            load_scenarios_from_path(path).map_err(|source| CliError::LoadScenarios {
                path: path.clone(),
                source,
            })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        for (name, scenario) in &scenarios {
            // Fresh connection per scenario so tables never leak between them.
            let mut adapter = snowbdd_sqlite::connect(&config).map_err(CliError::Connect)?;
            let label = format!("{}::{name}", path.display());

            match run_scenario(adapter.as_mut(), scenario, base_dir, &defaults) {
                TestResult::Passed => {
                    println!("PASS {label}");
                    summary.passed += 1;
                }
                TestResult::Failed(message) => {
                    println!("FAIL {label}: {message}");
                    summary.failed += 1;
                }
            }
        }
    }

    println!("{} passed, {} failed", summary.passed, summary.failed);
    Ok(summary)
}

fn parse_pragma(text: &str) -> Result<(String, String), String> {
    match text.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got `{text}`")),
    }
}
