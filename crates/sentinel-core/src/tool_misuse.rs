// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Tool Misuse Signal
// ─────────────────────────────────────────────────────────────────────
//! Detects improper tool usage patterns.
//!
//! Unlike the other signals, triggered factors are averaged rather
//! than maxed: misuse accumulates across distinct bad practices.

use std::collections::HashMap;

use serde_json::{Map, Value};

use sentinel_types::{clamp_unit, ExecutionTrace, Signal, ToolCall};

use crate::detector::{ratio, render_arguments, tiered_details, SignalDetector};

const ERROR_RATE_LIMIT: f64 = 0.3;
const ERROR_RATE_SCALE: f64 = 1.5;

const BAD_ARGS_LIMIT: f64 = 0.2;
/// String argument values that stand in for "nothing".
const PLACEHOLDER_VALUES: [&str; 4] = ["", "null", "undefined", "None"];

const CONCENTRATION_MIN_CALLS: usize = 5;
const CONCENTRATION_SHARE: f64 = 0.7;
const CONCENTRATION_WEIGHT: f64 = 0.5;

const SUSPICIOUS_LIMIT: f64 = 0.3;
const SUSPICIOUS_WEIGHT: f64 = 0.7;
/// Fragments that suggest an error message leaked into arguments.
const SUSPICIOUS_FRAGMENTS: [&str; 5] = ["error", "failed", "undefined", "null", "none"];

fn has_placeholder_argument(arguments: &Map<String, Value>) -> bool {
    arguments.values().any(|value| match value {
        Value::Null => true,
        Value::String(s) => PLACEHOLDER_VALUES.contains(&s.trim()),
        _ => false,
    })
}

fn has_bad_arguments(call: &ToolCall) -> bool {
    call.arguments.is_empty() || has_placeholder_argument(&call.arguments)
}

fn has_suspicious_arguments(call: &ToolCall) -> bool {
    let text = render_arguments(&call.arguments).to_lowercase();
    SUSPICIOUS_FRAGMENTS.iter().any(|f| text.contains(f))
}

/// Tool misuse risk for a trace, in [0, 1].
pub fn detect_tool_misuse(trace: &ExecutionTrace) -> f64 {
    let calls: Vec<&ToolCall> = trace.tool_calls().collect();
    if calls.is_empty() {
        return 0.0;
    }
    let total_calls = calls.len();
    let mut factors: Vec<f64> = Vec::with_capacity(4);

    // Check 1: failure rate of tool results
    let (results, failures) = trace
        .tool_results()
        .fold((0usize, 0usize), |(n, failed), r| {
            (n + 1, failed + usize::from(!r.success))
        });
    if results > 0 {
        let error_rate = ratio(failures, results);
        if error_rate > ERROR_RATE_LIMIT {
            factors.push((error_rate * ERROR_RATE_SCALE).min(1.0));
        }
    }

    // Check 2: empty or placeholder arguments
    let bad = calls.iter().filter(|c| has_bad_arguments(c)).count();
    let bad_ratio = ratio(bad, total_calls);
    if bad_ratio > BAD_ARGS_LIMIT {
        factors.push(bad_ratio);
    }

    // Check 3: one tool dominating the run
    let mut usage: HashMap<&str, usize> = HashMap::new();
    for call in &calls {
        *usage.entry(call.tool_name.as_str()).or_insert(0) += 1;
    }
    let max_usage = usage.values().copied().max().unwrap_or(0);
    let share = ratio(max_usage, total_calls);
    if max_usage > CONCENTRATION_MIN_CALLS && share > CONCENTRATION_SHARE {
        factors.push(((share - 0.5) * 2.0).min(1.0) * CONCENTRATION_WEIGHT);
    }

    // Check 4: arguments that read like error output
    let suspicious = calls.iter().filter(|c| has_suspicious_arguments(c)).count();
    let suspicious_ratio = ratio(suspicious, total_calls);
    if suspicious_ratio > SUSPICIOUS_LIMIT {
        factors.push(suspicious_ratio * SUSPICIOUS_WEIGHT);
    }

    if factors.is_empty() {
        return 0.0;
    }
    clamp_unit(factors.iter().sum::<f64>() / factors.len() as f64)
}

pub struct ToolMisuseDetector;

impl SignalDetector for ToolMisuseDetector {
    fn signal(&self) -> Signal {
        Signal::ToolMisuse
    }

    fn detect(&self, trace: &ExecutionTrace) -> f64 {
        detect_tool_misuse(trace)
    }

    fn details(&self, score: f64, _trace: &ExecutionTrace) -> String {
        tiered_details(
            score,
            [
                "Severe tool misuse patterns detected",
                "Moderate tool usage issues found",
                "Minor tool usage concerns",
                "Tool usage appears appropriate",
            ],
        )
    }
}
