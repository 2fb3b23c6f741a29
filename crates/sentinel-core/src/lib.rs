// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Reliability Sentinel Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Signal detectors, score aggregation, and verdict policy for
//! post-hoc reliability review of agent execution traces.
//!
//! # Invariants
//!
//! 1. **Detectors are total**: given a well-formed trace, no detector
//!    can fail. Only trace validation and aggregation return errors.
//!
//! 2. **Scores are bounded**: every signal score and the overall score
//!    lie in [0, 1]. Non-finite intermediates are clamped, never
//!    propagated.
//!
//! 3. **Evaluation is pure**: the trace is borrowed immutably, no state
//!    survives between calls, and the same trace always produces a
//!    bit-identical report.
//!
//! 4. **Signals are independent**: no detector reads another's output.
//!    Data flows detectors → aggregator → policy → report, never back.

pub mod cost;
pub mod detector;
pub mod evaluator;
pub mod hallucination;
pub mod looping;
pub mod policy;
pub mod report;
pub mod scorer;
pub mod tool_misuse;

#[cfg(test)]
mod fixtures;

pub use cost::{detect_cost, token_usage_summary, CostDetector, TokenUsageSummary};
pub use detector::SignalDetector;
pub use evaluator::{evaluate_trace, ReliabilityEvaluator};
pub use hallucination::{detect_hallucination, HallucinationDetector};
pub use looping::{detect_loop, text_similarity, LoopDetector};
pub use policy::{PolicyDecision, VerdictPolicy};
pub use report::assemble_report;
pub use scorer::ScoreAggregator;
pub use tool_misuse::{detect_tool_misuse, ToolMisuseDetector};
