// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Verdict Policy
// ─────────────────────────────────────────────────────────────────────
//! Threshold-based verdict resolution and narrative.
//!
//! Resolution order, first match wins:
//! 1. a critical hallucination or loop signal → FAIL
//! 2. overall ≥ fail threshold → FAIL
//! 3. a critical tool-misuse or cost signal, or overall ≥ warn → WARN
//! 4. PASS
//!
//! Thresholds are fixed rules, never learned.

use sentinel_types::{
    CriticalThresholds, SentinelConfig, Signal, SignalScore, Verdict, VerdictThresholds,
};

/// Verdict plus the reasoning that justifies it.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDecision {
    pub verdict: Verdict,
    pub reasoning: String,
    /// Signals at or above their critical threshold, in input order.
    pub critical_signals: Vec<Signal>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VerdictPolicy {
    thresholds: VerdictThresholds,
    critical: CriticalThresholds,
}

impl VerdictPolicy {
    pub fn new(thresholds: VerdictThresholds, critical: CriticalThresholds) -> Self {
        Self {
            thresholds,
            critical,
        }
    }

    pub fn from_config(config: &SentinelConfig) -> Self {
        Self::new(config.verdict, config.critical)
    }

    /// Signals whose score reaches their critical threshold. Names
    /// outside the canonical four never count as critical.
    pub fn critical_signals(&self, scores: &[SignalScore]) -> Vec<Signal> {
        scores
            .iter()
            .filter_map(|s| {
                let signal = s.signal().ok()?;
                (s.score >= self.critical.threshold_for(signal)).then_some(signal)
            })
            .collect()
    }

    pub fn decide(&self, overall_score: f64, scores: &[SignalScore]) -> PolicyDecision {
        let critical_signals = self.critical_signals(scores);
        let forced = |level: Verdict| {
            critical_signals
                .iter()
                .any(|s| s.critical_verdict() == level)
        };

        let verdict = if forced(Verdict::Fail) || overall_score >= self.thresholds.fail {
            Verdict::Fail
        } else if forced(Verdict::Warn) || overall_score >= self.thresholds.warn {
            Verdict::Warn
        } else {
            Verdict::Pass
        };

        if !critical_signals.is_empty() {
            log::debug!("critical signals: {critical_signals:?}");
        }

        let reasoning = reasoning(verdict, overall_score, scores, &critical_signals);
        PolicyDecision {
            verdict,
            reasoning,
            critical_signals,
        }
    }
}

fn reasoning(
    verdict: Verdict,
    overall_score: f64,
    scores: &[SignalScore],
    critical_signals: &[Signal],
) -> String {
    let mut parts = Vec::with_capacity(4);
    parts.push(format!(
        "Overall reliability score: {overall_score:.2} (0.0=good, 1.0=bad)."
    ));

    if !critical_signals.is_empty() {
        let names: Vec<&str> = critical_signals.iter().map(|s| s.name()).collect();
        parts.push(format!("Critical issues detected: {}.", names.join(", ")));
    }

    let breakdown: Vec<String> = scores
        .iter()
        .map(|s| format!("{}: {:.2} ({})", s.signal_name, s.score, s.level()))
        .collect();
    parts.push(format!("Signal breakdown: {}.", breakdown.join("; ")));

    parts.push(
        match verdict {
            Verdict::Fail => {
                "This execution shows significant reliability issues and should not be trusted."
            }
            Verdict::Warn => "This execution shows some concerning patterns that warrant review.",
            Verdict::Pass => "This execution appears reliable with no major concerns.",
        }
        .to_string(),
    );

    parts.join(" ")
}
