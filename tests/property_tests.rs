//! Property-Based Tests for swarm-input
//!
//! These tests verify:
//! - Linear spacing endpoints, length and monotonicity
//! - Center entry shape and rounding
//! - Output document growth and deterministic serialization

use proptest::prelude::*;
use serde_json::json;

use swarm_input::{
    CenterEntry, MethodSelection, SweepConfig, TemplateDocument, VariableBounds, generate,
    linspace, round_to,
};

/// Tolerance for "equal within rounding precision" at 3 decimal places
const HALF_ULP_3DP: f64 = 0.0005 + 1e-9;

fn bound_strategy() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

fn bounds_strategy() -> impl Strategy<Value = VariableBounds> {
    (bound_strategy(), bound_strategy()).prop_map(|(start, end)| VariableBounds::new(start, end))
}

/// Decimal places actually carried by a rounded value
fn has_at_most_three_places(value: f64) -> bool {
    let scaled = value * 1000.0;
    (scaled - scaled.round()).abs() < 1e-6 * scaled.abs().max(1.0)
}

// =============================================================================
// linspace
// =============================================================================

proptest! {
    /// Length is num, endpoints are start and end exactly
    #[test]
    fn linspace_endpoints(start in bound_strategy(), end in bound_strategy(), num in 2usize..200) {
        let values = linspace(start, end, num);
        prop_assert_eq!(values.len(), num);
        prop_assert_eq!(values[0], start);
        prop_assert_eq!(values[num - 1], end);
    }

    /// Values move monotonically in the direction of end - start
    #[test]
    fn linspace_monotonic(start in bound_strategy(), end in bound_strategy(), num in 2usize..200) {
        let values = linspace(start, end, num);
        for pair in values.windows(2) {
            if end >= start {
                prop_assert!(pair[0] <= pair[1], "{:?} not ascending", pair);
            } else {
                prop_assert!(pair[0] >= pair[1], "{:?} not descending", pair);
            }
        }
    }

    /// A single node sits on the start value
    #[test]
    fn linspace_single_point(start in bound_strategy(), end in bound_strategy()) {
        prop_assert_eq!(linspace(start, end, 1), vec![start]);
    }
}

// =============================================================================
// Center entries
// =============================================================================

proptest! {
    /// num entries, each with one rounded component per variable
    #[test]
    fn centers_shape_and_rounding(
        variables in prop::collection::vec(bounds_strategy(), 1..5),
        num in 1usize..64,
    ) {
        let sweep = SweepConfig::new(num, variables.clone());
        let centers = sweep.centers().unwrap();

        prop_assert_eq!(centers.len(), num);
        for center in &centers {
            prop_assert_eq!(center.len(), variables.len());
            for &value in center.values() {
                prop_assert!(has_at_most_three_places(value), "{} has extra digits", value);
            }
        }
    }

    /// First entry is the starts, last is the ends, within rounding
    #[test]
    fn centers_endpoints(
        variables in prop::collection::vec(bounds_strategy(), 1..5),
        num in 2usize..64,
    ) {
        let centers = SweepConfig::new(num, variables.clone()).centers().unwrap();
        let first: &CenterEntry = &centers[0];
        let last: &CenterEntry = &centers[num - 1];

        for (index, bounds) in variables.iter().enumerate() {
            prop_assert!((first.values()[index] - bounds.start).abs() <= HALF_ULP_3DP);
            prop_assert!((last.values()[index] - bounds.end).abs() <= HALF_ULP_3DP);
        }
    }

    /// Rounding is idempotent
    #[test]
    fn round_to_idempotent(value in bound_strategy()) {
        let once = round_to(value, 3);
        prop_assert_eq!(round_to(once, 3), once);
    }
}

// =============================================================================
// Output documents
// =============================================================================

proptest! {
    /// Output centers = template centers + num
    #[test]
    fn output_grows_by_num(existing in 0usize..10, num in 1usize..40) {
        let existing_centers: Vec<serde_json::Value> =
            (0..existing).map(|i| json!([i as f64, -(i as f64)])).collect();
        let template = TemplateDocument::from_value(json!({
            "methods": [{"type": "Swarm", "centers": existing_centers}]
        }))
        .unwrap();

        let sweep = SweepConfig::new(
            num,
            vec![VariableBounds::new(-1.8, -1.7), VariableBounds::new(2.6, -0.9)],
        );
        let output = generate(template, &sweep, MethodSelection::First).unwrap();

        prop_assert_eq!(output.centers_len(0).unwrap(), existing + num);
    }

    /// Parsing the output and serializing again gives identical bytes
    #[test]
    fn output_serialization_roundtrip(
        variables in prop::collection::vec(bounds_strategy(), 1..4),
        num in 1usize..30,
    ) {
        let template = TemplateDocument::from_value(json!({
            "driver": [{"type": "LAMMPS", "MDSteps": 5000, "logfile": "none"}],
            "methods": [{"type": "Swarm", "centers": []}],
            "CVs": [{"type": "Torsional", "atom ids": [5, 7, 9, 15]}]
        }))
        .unwrap();

        let output = generate(template, &SweepConfig::new(num, variables), MethodSelection::First)
            .unwrap();
        let bytes = output.to_pretty_bytes().unwrap();
        let reparsed: TemplateDocument = String::from_utf8(bytes.clone()).unwrap().parse().unwrap();

        prop_assert_eq!(bytes, reparsed.to_pretty_bytes().unwrap());
    }
}
