use std::path::PathBuf;

use miette::Report;

const LOAD_CONTEXT: &str = "while loading scenario file";
const CONNECT_CONTEXT: &str = "while connecting to the warehouse";

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    LoadScenarios {
        path: PathBuf,
        source: snowbdd_core::Error,
    },
    Connect(snowbdd_core::Error),
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::LoadScenarios { path, source } => {
            let category = core_category(&source);
            let context = format!("{LOAD_CONTEXT} `{}`", path.display());
            let report = report_with_context(source, context);
            format!("[{category}] {report}")
        }
        CliError::Connect(source) => {
            let category = core_category(&source);
            let report = report_with_context(source, CONNECT_CONTEXT);
            format!("[{category}] {report}")
        }
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let anyhow_error = anyhow::Error::new(source).context(context.into());
    miette::miette!("{anyhow_error:#}")
}

fn core_category(error: &snowbdd_core::Error) -> &'static str {
    match error {
        snowbdd_core::Error::Table(_) => "table",
        snowbdd_core::Error::Decode(_) => "decode",
        snowbdd_core::Error::Assertion(_) => "assert",
        snowbdd_core::Error::Execute(_) => "execute",
        snowbdd_core::Error::Scenario(_) => "scenario",
    }
}
