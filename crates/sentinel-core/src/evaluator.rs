// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Reliability Evaluator
// ─────────────────────────────────────────────────────────────────────
//! Single entry point: trace in, report out.
//!
//! Data flows strictly forward: detectors → aggregator → policy →
//! report. Evaluation is stateless and deterministic; the same trace
//! always yields a bit-identical report.

use sentinel_types::{
    ExecutionTrace, ReliabilityReport, SentinelConfig, SentinelError, SentinelResult,
    SignalScore,
};

use crate::cost::CostDetector;
use crate::detector::SignalDetector;
use crate::hallucination::HallucinationDetector;
use crate::looping::LoopDetector;
use crate::policy::VerdictPolicy;
use crate::report::assemble_report;
use crate::scorer::ScoreAggregator;
use crate::tool_misuse::ToolMisuseDetector;

/// Runs the four detectors, aggregates, and resolves a verdict.
///
/// Holds only immutable configuration, so one instance can be shared
/// across threads evaluating distinct traces.
pub struct ReliabilityEvaluator {
    config: SentinelConfig,
    detectors: Vec<Box<dyn SignalDetector>>,
    aggregator: ScoreAggregator,
    policy: VerdictPolicy,
}

impl ReliabilityEvaluator {
    /// Build an evaluator after validating `config`.
    pub fn new(config: SentinelConfig) -> SentinelResult<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: SentinelConfig) -> Self {
        // Canonical report order.
        let detectors: Vec<Box<dyn SignalDetector>> = vec![
            Box::new(HallucinationDetector),
            Box::new(LoopDetector),
            Box::new(ToolMisuseDetector),
            Box::new(CostDetector::new(config.cost)),
        ];
        Self {
            config,
            detectors,
            aggregator: ScoreAggregator::new(config.weights),
            policy: VerdictPolicy::from_config(&config),
        }
    }

    /// Run every detector once, in canonical order.
    pub fn signal_scores(&self, trace: &ExecutionTrace) -> Vec<SignalScore> {
        self.detectors
            .iter()
            .map(|d| {
                let score = d.evaluate(trace);
                log::debug!(
                    "trace {}: {} = {:.4}",
                    trace.trace_id,
                    score.signal_name,
                    score.score
                );
                score
            })
            .collect()
    }

    /// Evaluate one trace.
    pub fn evaluate(&self, trace: &ExecutionTrace) -> SentinelResult<ReliabilityReport> {
        if trace.trace_id.is_empty() {
            return Err(SentinelError::MissingTraceId);
        }

        let signal_scores = self.signal_scores(trace);
        let overall_score = self.aggregator.aggregate(&signal_scores)?;
        let decision = self.policy.decide(overall_score, &signal_scores);

        log::info!(
            "trace {}: verdict {} (overall {overall_score:.4})",
            trace.trace_id,
            decision.verdict
        );

        Ok(assemble_report(trace, overall_score, signal_scores, decision))
    }

    /// Read-only access to config.
    pub fn config(&self) -> &SentinelConfig {
        &self.config
    }
}

impl Default for ReliabilityEvaluator {
    fn default() -> Self {
        Self::from_validated(SentinelConfig::default())
    }
}

/// Evaluate a possibly absent trace with the default configuration.
pub fn evaluate_trace(trace: Option<&ExecutionTrace>) -> SentinelResult<ReliabilityReport> {
    let trace = trace.ok_or(SentinelError::MissingTrace)?;
    ReliabilityEvaluator::default().evaluate(trace)
}
