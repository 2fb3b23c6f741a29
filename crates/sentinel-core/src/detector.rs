// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Signal Detector Interface
// ─────────────────────────────────────────────────────────────────────
//! Common trait for the four reliability detectors.
//!
//! Detectors are total, pure functions of the trace: they never fail,
//! never mutate, and share no state with each other.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use sentinel_types::{clamp_unit, ExecutionTrace, Signal, SignalScore};

/// Trait for reliability signal detectors.
///
/// Returns risk ∈ [0, 1]:
/// - 0.0 = no evidence of the failure mode
/// - 1.0 = maximal risk
pub trait SignalDetector: Send + Sync {
    fn signal(&self) -> Signal;

    fn detect(&self, trace: &ExecutionTrace) -> f64;

    /// Human-readable summary for an already computed score.
    fn details(&self, score: f64, trace: &ExecutionTrace) -> String;

    fn evaluate(&self, trace: &ExecutionTrace) -> SignalScore {
        let score = clamp_unit(self.detect(trace));
        SignalScore::new(self.signal().name(), score).with_details(self.details(score, trace))
    }
}

/// Pick one of four messages by the 0.7 / 0.4 / 0.2 score tiers,
/// most severe first.
pub(crate) fn tiered_details(score: f64, messages: [&str; 4]) -> String {
    let idx = if score >= 0.7 {
        0
    } else if score >= 0.4 {
        1
    } else if score >= 0.2 {
        2
    } else {
        3
    };
    messages[idx].to_string()
}

/// Deterministic text rendering of a tool-call argument map: `key=value`
/// pairs in key order, values as compact JSON.
pub(crate) fn render_arguments(arguments: &Map<String, Value>) -> String {
    let sorted: BTreeMap<&String, &Value> = arguments.iter().collect();
    sorted
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}
