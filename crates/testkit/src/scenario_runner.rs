use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use snowbdd_core::{AssertOptions, Result, ScenarioError, WarehouseAdapter};

use crate::run_step;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub steps: Vec<String>,
    pub fixed_timestamp: Option<String>,
    pub fixed_time: Option<String>,
    /// `None` falls back to the runner default.
    pub check_types: Option<bool>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Failed(String),
}

pub fn load_scenarios_from_str(yaml: &str) -> Result<BTreeMap<String, Scenario>> {
    serde_yaml::from_str(yaml).map_err(parse_yaml_error)
}

pub fn load_scenarios_from_path(path: impl AsRef<Path>) -> Result<BTreeMap<String, Scenario>> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
        path: path.display().to_string(),
        source,
    })?;
    load_scenarios_from_str(&yaml)
}

/// Runs every step of `scenario` in order; the first failing step fails the
/// scenario. When the scenario declares `error`, it passes only if a step
/// fails with exactly that message.
pub fn run_scenario(
    adapter: &mut dyn WarehouseAdapter,
    scenario: &Scenario,
    base_dir: &Path,
    defaults: &AssertOptions,
) -> TestResult {
    let options = scenario_options(scenario, defaults);
    let outcome = run_steps(adapter, &scenario.steps, base_dir, &options);

    match evaluate_expected_error(scenario, outcome) {
        Ok(()) => TestResult::Passed,
        Err(error) => TestResult::Failed(error.to_string()),
    }
}

fn run_steps(
    adapter: &mut dyn WarehouseAdapter,
    steps: &[String],
    base_dir: &Path,
    options: &AssertOptions,
) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        tracing::debug!(step = index, "running scenario step");
        run_step(adapter, step, base_dir, options)?;
    }
    Ok(())
}

fn scenario_options(scenario: &Scenario, defaults: &AssertOptions) -> AssertOptions {
    AssertOptions {
        check_types: scenario.check_types.unwrap_or(defaults.check_types),
        fixed_timestamp: scenario
            .fixed_timestamp
            .clone()
            .or_else(|| defaults.fixed_timestamp.clone()),
        fixed_time: scenario
            .fixed_time
            .clone()
            .or_else(|| defaults.fixed_time.clone()),
    }
}

fn evaluate_expected_error(scenario: &Scenario, outcome: Result<()>) -> Result<()> {
    let Some(expected) = scenario.error.as_deref() else {
        return outcome;
    };

    match outcome {
        Ok(()) => Err(ScenarioError::ExpectedError {
            expected: expected.to_string(),
            actual: "no error".to_string(),
        }
        .into()),
        Err(error) => {
            let actual = error.to_string();
            if actual == expected {
                Ok(())
            } else {
                Err(ScenarioError::ExpectedError {
                    expected: expected.to_string(),
                    actual,
                }
                .into())
            }
        }
    }
}

fn parse_yaml_error(source: serde_yaml::Error) -> snowbdd_core::Error {
    ScenarioError::Document {
        line: source.location().map_or(0, |location| location.line()),
        source: Box::new(source),
    }
    .into()
}
