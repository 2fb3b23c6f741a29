// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Report Assembly
// ─────────────────────────────────────────────────────────────────────

use sentinel_types::{ExecutionTrace, ReliabilityReport, ReportMetadata, SignalScore};

use crate::policy::PolicyDecision;

pub fn report_metadata(trace: &ExecutionTrace) -> ReportMetadata {
    ReportMetadata {
        total_messages: trace.total_messages(),
        total_tool_calls: trace.total_tool_calls(),
        total_tokens: trace.total_tokens(),
    }
}

/// Package the pipeline outputs for one trace.
pub fn assemble_report(
    trace: &ExecutionTrace,
    overall_score: f64,
    signal_scores: Vec<SignalScore>,
    decision: PolicyDecision,
) -> ReliabilityReport {
    ReliabilityReport {
        trace_id: trace.trace_id.clone(),
        verdict: decision.verdict,
        overall_score,
        signal_scores,
        reasoning: decision.reasoning,
        metadata: report_metadata(trace),
    }
}
