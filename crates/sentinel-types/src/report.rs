// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Reliability Sentinel Report Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{SentinelError, SentinelResult};
use crate::score::{SignalScore, Verdict};

/// Lightweight trace facts carried alongside the verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub total_messages: usize,
    pub total_tool_calls: usize,
    pub total_tokens: u64,
}

/// Complete reliability evaluation of one trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityReport {
    pub trace_id: String,
    pub verdict: Verdict,
    /// Weighted overall risk in [0, 1]: 1.0 = high risk.
    pub overall_score: f64,
    /// One entry per canonical signal, in canonical order.
    pub signal_scores: Vec<SignalScore>,
    pub reasoning: String,
    pub metadata: ReportMetadata,
}

impl ReliabilityReport {
    /// Look up a signal score by canonical name.
    pub fn signal(&self, name: &str) -> Option<&SignalScore> {
        self.signal_scores.iter().find(|s| s.signal_name == name)
    }

    pub fn to_json(&self) -> SentinelResult<String> {
        serde_json::to_string(self).map_err(serialization_error)
    }

    pub fn to_json_pretty(&self) -> SentinelResult<String> {
        serde_json::to_string_pretty(self).map_err(serialization_error)
    }
}

fn serialization_error(e: serde_json::Error) -> SentinelError {
    SentinelError::Serialization(e.to_string())
}
