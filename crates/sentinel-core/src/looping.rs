// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Loop Signal
// ─────────────────────────────────────────────────────────────────────
//! Detects repetitive or runaway agent behaviour.
//!
//! Risk is the maximum of three independent factors, so any single
//! strong indicator is enough:
//! - identical tool calls (same name and arguments) repeated ≥3 times
//! - consecutive assistant messages that are near-duplicates
//! - a message count far beyond a normal interaction

use std::collections::{HashMap, HashSet};

use sentinel_types::{clamp_unit, ExecutionTrace, Signal, ToolCall};

use crate::detector::{ratio, render_arguments, tiered_details, SignalDetector};

const MIN_CALLS_FOR_REPEATS: usize = 3;
const MIN_REPEATS: usize = 3;
/// Repeat factor reaches 1.0 at 10 identical calls.
const REPEAT_SPAN: f64 = 8.0;

const MIN_ASSISTANT_MESSAGES: usize = 3;
const SIMILARITY_THRESHOLD: f64 = 0.7;
const SIMILAR_PAIR_RATIO: f64 = 0.5;

const MESSAGE_COUNT_LIMIT: usize = 50;
const MESSAGE_COUNT_SPAN: f64 = 100.0;

fn call_signature(call: &ToolCall) -> (&str, String) {
    (call.tool_name.as_str(), render_arguments(&call.arguments))
}

/// Jaccard overlap of the character sets of two texts, after trimming
/// and lowercasing. Identical normalised texts score 1.0; an empty
/// input scores 0.0.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a == b {
        return 1.0;
    }

    let set_a: HashSet<char> = a.chars().collect();
    let set_b: HashSet<char> = b.chars().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    ratio(intersection, union)
}

fn repeated_calls_factor(calls: &[&ToolCall]) -> Option<f64> {
    if calls.len() < MIN_CALLS_FOR_REPEATS {
        return None;
    }
    let mut counts: HashMap<(&str, String), usize> = HashMap::new();
    for &call in calls {
        *counts.entry(call_signature(call)).or_insert(0) += 1;
    }
    let max_repeats = counts.values().copied().max().unwrap_or(0);
    if max_repeats < MIN_REPEATS {
        return None;
    }
    Some(((max_repeats - 2) as f64 / REPEAT_SPAN).min(1.0))
}

fn similar_messages_factor(contents: &[&str]) -> Option<f64> {
    if contents.len() < MIN_ASSISTANT_MESSAGES {
        return None;
    }
    let total_pairs = contents.len() - 1;
    let similar_pairs = contents
        .windows(2)
        .filter(|pair| text_similarity(pair[0], pair[1]) > SIMILARITY_THRESHOLD)
        .count();
    let similar_ratio = ratio(similar_pairs, total_pairs);
    (similar_ratio > SIMILAR_PAIR_RATIO).then_some(similar_ratio)
}

fn message_count_factor(count: usize) -> Option<f64> {
    if count <= MESSAGE_COUNT_LIMIT {
        return None;
    }
    Some(((count - MESSAGE_COUNT_LIMIT) as f64 / MESSAGE_COUNT_SPAN).min(1.0))
}

/// Loop risk for a trace, in [0, 1].
pub fn detect_loop(trace: &ExecutionTrace) -> f64 {
    if trace.messages.is_empty() {
        return 0.0;
    }

    let calls: Vec<&ToolCall> = trace.tool_calls().collect();
    let contents: Vec<&str> = trace
        .assistant_messages()
        .map(|m| m.content.as_str())
        .collect();

    let risk = [
        repeated_calls_factor(&calls),
        similar_messages_factor(&contents),
        message_count_factor(trace.total_messages()),
    ]
    .into_iter()
    .flatten()
    .fold(0.0, f64::max);

    clamp_unit(risk)
}

pub struct LoopDetector;

impl SignalDetector for LoopDetector {
    fn signal(&self) -> Signal {
        Signal::Loop
    }

    fn detect(&self, trace: &ExecutionTrace) -> f64 {
        detect_loop(trace)
    }

    fn details(&self, score: f64, _trace: &ExecutionTrace) -> String {
        tiered_details(
            score,
            [
                "Strong evidence of looping or repetitive behavior",
                "Moderate repetition patterns detected",
                "Minor repetition observed",
                "No concerning repetition detected",
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use serde_json::json;

    fn repeated_calls(n: usize) -> Vec<ToolCall> {
        (0..n)
            .map(|i| {
                call(
                    "search",
                    args(&[("query", json!("same query"))]),
                    Some(format!("call-{i}").as_str()),
                )
            })
            .collect()
    }

    #[test]
    fn test_five_identical_calls() {
        let t = trace(vec![
            user("Find it"),
            assistant("Searching").with_tool_calls(repeated_calls(5)),
        ]);
        let score = detect_loop(&t);
        assert!((score - 3.0 / 8.0).abs() < 1e-9);
        assert!(score > 0.3);
    }

    #[test]
    fn test_repeats_saturate_at_ten() {
        let t = trace(vec![assistant("go").with_tool_calls(repeated_calls(10))]);
        assert_eq!(detect_loop(&t), 1.0);
        let t = trace(vec![assistant("go").with_tool_calls(repeated_calls(25))]);
        assert_eq!(detect_loop(&t), 1.0);
    }

    #[test]
    fn test_argument_order_irrelevant() {
        let calls = vec![
            call("s", args(&[("a", json!(1)), ("b", json!(2))]), None),
            call("s", args(&[("b", json!(2)), ("a", json!(1))]), None),
            call("s", args(&[("a", json!(1)), ("b", json!(2))]), None),
        ];
        let t = trace(vec![assistant("x").with_tool_calls(calls)]);
        assert!((detect_loop(&t) - 1.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_varied_calls() {
        let calls = (0..6)
            .map(|i| call("search", args(&[("query", json!(format!("topic {i}")))]), None))
            .collect();
        let t = trace(vec![user("research"), assistant("ok").with_tool_calls(calls)]);
        assert_eq!(detect_loop(&t), 0.0);
    }

    #[test]
    fn test_similar_messages() {
        let t = trace(vec![
            assistant("Processing request..."),
            assistant("Processing request..."),
            assistant("Processing request..."),
            assistant("Processing request..."),
        ]);
        // 3 of 3 consecutive pairs identical
        assert!((detect_loop(&t) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_distinct_messages_not_similar() {
        let t = trace(vec![
            assistant("abc"),
            assistant("xyz"),
            assistant("123"),
        ]);
        assert_eq!(detect_loop(&t), 0.0);
    }

    #[test]
    fn test_similar_pair_ratio_is_strict() {
        // 1 of 2 pairs similar: exactly at the ratio limit
        let t = trace(vec![
            assistant("Processing request..."),
            assistant("Processing request..."),
            assistant("123"),
        ]);
        assert_eq!(detect_loop(&t), 0.0);

        // 2 of 3 pairs similar
        let t = trace(vec![
            assistant("Processing request..."),
            assistant("Processing request..."),
            assistant("Processing request..."),
            assistant("123"),
        ]);
        assert!((detect_loop(&t) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_excessive_message_count() {
        let messages = (0..70)
            .map(|i| if i % 2 == 0 { user("q") } else { assistant(&format!("{i}")) })
            .collect();
        let t = trace(messages);
        assert!(detect_loop(&t) >= 0.2);
    }

    #[test]
    fn test_message_count_factor() {
        assert_eq!(message_count_factor(50), None);
        assert!((message_count_factor(100).unwrap() - 0.5).abs() < 1e-9);
        assert_eq!(message_count_factor(500), Some(1.0));
    }

    #[test]
    fn test_few_messages() {
        let t = trace(vec![user("Hello"), assistant("Hi")]);
        assert_eq!(detect_loop(&t), 0.0);
    }

    #[test]
    fn test_empty_trace() {
        assert_eq!(detect_loop(&trace(vec![])), 0.0);
    }

    #[test]
    fn test_text_similarity() {
        assert_eq!(text_similarity("Hello", "  hello "), 1.0);
        assert_eq!(text_similarity("", "x"), 0.0);
        assert_eq!(text_similarity("abc", "xyz"), 0.0);
        // {a,b} ∩ {a,c} = {a}; union {a,b,c}
        assert!((text_similarity("ab", "ac") - 1.0 / 3.0).abs() < 1e-9);
    }
}
