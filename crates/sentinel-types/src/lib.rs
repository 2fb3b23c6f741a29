// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Reliability Sentinel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Trace model, report types, configuration, and error hierarchy for
//! the Reliability Sentinel, a post-hoc verdict engine for agent
//! execution traces.

pub mod config;
pub mod error;
pub mod report;
pub mod score;
pub mod trace;

pub use config::{
    CostThresholds, CriticalThresholds, SentinelConfig, SignalWeights, VerdictThresholds,
};
pub use error::{SentinelError, SentinelResult};
pub use report::{ReliabilityReport, ReportMetadata};
pub use score::{clamp_score, clamp_unit, ScoreLevel, Signal, SignalScore, Verdict};
pub use trace::{
    parse_trace, ExecutionTrace, Message, Role, TokenUsage, ToolCall, ToolResult,
};
