// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Hallucination Signal
// ─────────────────────────────────────────────────────────────────────
//! Detects fabricated tool activity in an execution trace.
//!
//! Up to three checks contribute to a running risk, normalised by the
//! number of checks whose precondition held:
//! - **Orphaned calls**: call ids that never received a result.
//! - **Orphaned results**: result ids with no originating call,
//!   weighted ×1.5 (stronger evidence of fabrication).
//! - **Unbacked claims**: an assistant message that talks about
//!   calling tools while carrying no tool calls (+0.5, counted once).

use std::collections::HashSet;

use sentinel_types::{clamp_unit, ExecutionTrace, Message, Signal};

use crate::detector::{ratio, tiered_details, SignalDetector};

const ORPHANED_RESULT_WEIGHT: f64 = 1.5;
const UNBACKED_CLAIM_PENALTY: f64 = 0.5;

/// Phrases that assert tool usage. Matched against lowercased content.
const TOOL_CLAIM_PHRASES: [&str; 6] = [
    "called",
    "using the tool",
    "tool call",
    "executed",
    "ran the",
    "invoked",
];

fn claims_tool_use_without_calls(message: &Message) -> bool {
    if !message.tool_calls.is_empty() {
        return false;
    }
    let content = message.content.to_lowercase();
    TOOL_CLAIM_PHRASES.iter().any(|p| content.contains(p))
}

/// Hallucination risk for a trace, in [0, 1].
pub fn detect_hallucination(trace: &ExecutionTrace) -> f64 {
    if trace.messages.is_empty() {
        return 0.0;
    }

    let call_ids: HashSet<&str> = trace
        .tool_calls()
        .filter_map(|c| c.call_id.as_deref())
        .collect();
    let result_ids: HashSet<&str> = trace
        .tool_results()
        .filter_map(|r| r.call_id.as_deref())
        .collect();

    let mut risk = 0.0;
    let mut applicable = 0u32;

    if !call_ids.is_empty() {
        applicable += 1;
        let orphaned = call_ids.difference(&result_ids).count();
        risk += ratio(orphaned, call_ids.len());
    }

    if !result_ids.is_empty() {
        applicable += 1;
        let orphaned = result_ids.difference(&call_ids).count();
        risk += ratio(orphaned, result_ids.len()) * ORPHANED_RESULT_WEIGHT;
    }

    let mut assistant = trace.assistant_messages().peekable();
    if assistant.peek().is_some() {
        applicable += 1;
        if assistant.any(claims_tool_use_without_calls) {
            risk += UNBACKED_CLAIM_PENALTY;
        }
    }

    if applicable == 0 {
        return 0.0;
    }
    clamp_unit(risk / f64::from(applicable))
}

pub struct HallucinationDetector;

impl SignalDetector for HallucinationDetector {
    fn signal(&self) -> Signal {
        Signal::Hallucination
    }

    fn detect(&self, trace: &ExecutionTrace) -> f64 {
        detect_hallucination(trace)
    }

    fn details(&self, score: f64, _trace: &ExecutionTrace) -> String {
        tiered_details(
            score,
            [
                "High risk of hallucinated outputs detected",
                "Moderate hallucination indicators found",
                "Some minor hallucination patterns detected",
                "No significant hallucination detected",
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use serde_json::json;

    #[test]
    fn test_orphaned_call() {
        let t = trace(vec![
            user("Fetch both pages"),
            assistant("Fetching").with_tool_calls(vec![
                call("fetch", args(&[("url", json!("a"))]), Some("call-1")),
                call("fetch", args(&[("url", json!("b"))]), Some("call-2")),
            ]),
            tool(vec![ok("call-1")]),
        ]);
        let score = detect_hallucination(&t);
        // (0.5 orphaned + 0.0 + 0.0) / 3 checks
        assert!((score - 0.5 / 3.0).abs() < 1e-9);
        assert!(score > 0.1);
    }

    #[test]
    fn test_orphaned_result_weighted() {
        let t = trace(vec![
            assistant("Looking it up")
                .with_tool_calls(vec![call("search", args(&[("q", json!("x"))]), Some("c1"))]),
            tool(vec![ok("c1"), ok("c-99")]),
        ]);
        // calls: 0 orphaned; results: 1/2 orphaned × 1.5; 3 checks
        let score = detect_hallucination(&t);
        assert!((score - 0.75 / 3.0).abs() < 1e-9);
        assert!(score > 0.2);
    }

    #[test]
    fn test_claim_without_calls() {
        let t = trace(vec![
            user("What is the weather?"),
            assistant("I called the weather API and it is sunny."),
        ]);
        // Only the claim check applies: 0.5 / 1
        assert!((detect_hallucination(&t) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_claim_counted_once() {
        let t = trace(vec![
            assistant("I invoked the search"),
            assistant("Then I executed the parser"),
            assistant("And ran the formatter"),
        ]);
        assert!((detect_hallucination(&t) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_claim_case_insensitive() {
        let t = trace(vec![assistant("TOOL CALL complete")]);
        assert!(detect_hallucination(&t) > 0.0);
    }

    #[test]
    fn test_claim_with_calls_is_fine() {
        let t = trace(vec![
            assistant("I called search")
                .with_tool_calls(vec![call("search", args(&[("q", json!("x"))]), Some("c1"))]),
            tool(vec![ok("c1")]),
        ]);
        assert_eq!(detect_hallucination(&t), 0.0);
    }

    #[test]
    fn test_clean_trace() {
        let t = trace(vec![
            user("Analyze"),
            assistant("On it")
                .with_tool_calls(vec![call("analyze", args(&[("data", json!("in"))]), Some("c1"))]),
            tool(vec![ok("c1")]),
            assistant("Here are the results"),
        ]);
        assert!(detect_hallucination(&t) < 0.3);
    }

    #[test]
    fn test_no_tools() {
        let t = trace(vec![user("Hello"), assistant("Hi! How can I help?")]);
        assert_eq!(detect_hallucination(&t), 0.0);
    }

    #[test]
    fn test_empty_trace() {
        assert_eq!(detect_hallucination(&trace(vec![])), 0.0);
    }

    #[test]
    fn test_calls_without_ids_do_not_apply() {
        let t = trace(vec![
            user("go"),
            Message::new(sentinel_types::Role::System, "sys")
                .with_tool_calls(vec![call("x", args(&[("a", json!(1))]), None)]),
        ]);
        assert_eq!(detect_hallucination(&t), 0.0);
    }

    #[test]
    fn test_all_fabricated_saturates() {
        let t = trace(vec![tool(vec![ok("ghost-1"), ok("ghost-2")])]);
        // Only the orphaned-result check applies: 1.0 × 1.5, clamped
        assert_eq!(detect_hallucination(&t), 1.0);
    }

    #[test]
    fn test_detector_details() {
        let d = HallucinationDetector;
        let t = trace(vec![]);
        assert_eq!(d.details(0.8, &t), "High risk of hallucinated outputs detected");
        assert_eq!(d.details(0.0, &t), "No significant hallucination detected");
        assert_eq!(d.evaluate(&t).signal_name, "hallucination");
    }
}
