mod scenario_runner;
mod steps;

pub use scenario_runner::{
    Scenario, TestResult, load_scenarios_from_path, load_scenarios_from_str, run_scenario,
};
pub use steps::{
    Step, assert_table_contains, create_table_with_data, parse_step, run_step,
};
