//! Growth command implementation

use anyhow::Result;
use dynarr_array::DynArray;
use serde::Serialize;

#[derive(Serialize)]
struct GrowthReport {
    count: usize,
    final_capacity: usize,
    reallocations: usize,
    relocated_elements: usize,
    transitions: Vec<TransitionInfo>,
}

#[derive(Serialize)]
struct TransitionInfo {
    /// Length of the array when the push that triggered growth began.
    at_len: usize,
    old_capacity: usize,
    new_capacity: usize,
}

/// Pushes `count` values into a fresh array, recording every capacity
/// change. Each transition relocates the `at_len` live elements.
fn build_report(count: usize) -> GrowthReport {
    let mut array = DynArray::new();
    let mut transitions = Vec::new();

    for value in 0..count {
        let old_capacity = array.capacity();
        let at_len = array.len();
        array.push_back(value);
        if array.capacity() != old_capacity {
            transitions.push(TransitionInfo {
                at_len,
                old_capacity,
                new_capacity: array.capacity(),
            });
        }
    }

    GrowthReport {
        count,
        final_capacity: array.capacity(),
        reallocations: transitions.len(),
        relocated_elements: transitions.iter().map(|t| t.at_len).sum(),
        transitions,
    }
}

pub fn run(count: usize, json: bool) -> Result<()> {
    let report = build_report(count);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for t in &report.transitions {
        println!(
            "len {:>10}: capacity {:>10} -> {:>10}",
            t.at_len, t.old_capacity, t.new_capacity
        );
    }
    println!("pushed:             {}", report.count);
    println!("final capacity:     {}", report.final_capacity);
    println!("reallocations:      {}", report.reallocations);
    println!("relocated elements: {}", report.relocated_elements);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_transitions() {
        let report = build_report(9);
        let caps: Vec<(usize, usize)> = report
            .transitions
            .iter()
            .map(|t| (t.old_capacity, t.new_capacity))
            .collect();
        assert_eq!(caps, vec![(0, 2), (2, 4), (4, 8), (8, 16)]);
        assert_eq!(report.final_capacity, 16);
        assert_eq!(report.relocated_elements, 2 + 4 + 8);
    }

    #[test]
    fn test_relocated_elements_stay_linear() {
        for count in [0, 1, 5, 1000, 4097] {
            let report = build_report(count);
            assert!(report.relocated_elements <= 2 * count);
        }
        assert_eq!(build_report(0).reallocations, 0);
    }
}
