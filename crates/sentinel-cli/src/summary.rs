// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Human-Readable Output
// ─────────────────────────────────────────────────────────────────────

use std::io::{self, Write};

use serde_json::{json, Value};

use sentinel_core::TokenUsageSummary;
use sentinel_types::{ReliabilityReport, SentinelConfig, Signal};

const RULE_WIDTH: usize = 60;

/// Write the verbose evaluation summary.
pub fn write_summary(
    out: &mut impl Write,
    report: &ReliabilityReport,
    usage: &TokenUsageSummary,
) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "RELIABILITY SENTINEL EVALUATION SUMMARY")?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;

    writeln!(out, "Trace ID: {}", report.trace_id)?;
    writeln!(out, "Verdict: {}", report.verdict)?;
    writeln!(out, "Overall Score: {:.2}", report.overall_score)?;
    writeln!(out)?;

    writeln!(out, "Signal Scores:")?;
    for signal in &report.signal_scores {
        writeln!(out, "  {:15}: {:.2}", signal.signal_name, signal.score)?;
        if let Some(details) = &signal.details {
            writeln!(out, "    └─ {details}")?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Token Usage:")?;
    writeln!(
        out,
        "  total {} (prompt {}, completion {})",
        usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
    )?;
    writeln!(
        out,
        "  {:.2} tokens/message, completion ratio {:.2}",
        usage.tokens_per_message, usage.completion_ratio
    )?;
    writeln!(out)?;

    writeln!(out, "Reasoning:")?;
    writeln!(out, "  {}", report.reasoning)?;
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out)
}

/// Active weights and thresholds, with per-signal descriptions.
pub fn policy_json(config: &SentinelConfig) -> Value {
    let signals: Vec<Value> = Signal::ALL
        .iter()
        .map(|&signal| {
            json!({
                "name": signal.name(),
                "description": signal.description(),
                "weight": config.weights.weight_for(signal),
                "critical_threshold": config.critical.threshold_for(signal),
                "critical_verdict": signal.critical_verdict(),
            })
        })
        .collect();

    json!({
        "signals": signals,
        "weights_normalized": config.weights.is_normalized(),
        "config": config,
    })
}
