//! Scenario command implementation

use anyhow::Result;
use dynarr_array::DynArray;
use serde::Serialize;

use crate::utils::format_values;

#[derive(Serialize)]
struct ScenarioReport {
    steps: Vec<StepInfo>,
}

#[derive(Serialize)]
struct StepInfo {
    operation: String,
    values: Vec<i32>,
    len: usize,
    capacity: usize,
}

impl StepInfo {
    fn capture(operation: &str, array: &DynArray<i32>) -> StepInfo {
        StepInfo {
            operation: operation.to_string(),
            values: array.iter().copied().collect(),
            len: array.len(),
            capacity: array.capacity(),
        }
    }
}

/// Runs the walkthrough and records the array state after every step.
fn build_report() -> ScenarioReport {
    let mut array = DynArray::new();
    let mut steps = Vec::new();

    for value in 1..=3 {
        array.push_back(value);
        steps.push(StepInfo::capture(&format!("push_back({value})"), &array));
    }

    array.resize(5, 100);
    steps.push(StepInfo::capture("resize(5, 100)", &array));

    array.shrink_to_fit();
    steps.push(StepInfo::capture("shrink_to_fit()", &array));

    array.resize_default(2);
    steps.push(StepInfo::capture("resize(2)", &array));

    array.shrink_to_fit();
    steps.push(StepInfo::capture("shrink_to_fit()", &array));

    array.clear();
    steps.push(StepInfo::capture("clear()", &array));

    array.shrink_to_fit();
    steps.push(StepInfo::capture("shrink_to_fit()", &array));

    ScenarioReport { steps }
}

pub fn run(json: bool) -> Result<()> {
    let report = build_report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for step in &report.steps {
        println!(
            "{:<16} {:<20} len={} capacity={}",
            step.operation,
            format_values(&step.values),
            step.len,
            step.capacity
        );
    }
    Ok(())
}
