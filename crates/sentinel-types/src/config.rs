// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Reliability Sentinel Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{SentinelError, SentinelResult};
use crate::score::Signal;

/// Tolerance for the weights-sum-to-one check.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Fixed linear weights for score aggregation. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    /// Default: 0.35. Ungrounded output is the most serious failure.
    pub hallucination: f64,
    /// Default: 0.25.
    #[serde(rename = "loop")]
    pub loop_: f64,
    /// Default: 0.25.
    pub tool_misuse: f64,
    /// Default: 0.15. Efficiency, not correctness.
    pub cost: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            hallucination: 0.35,
            loop_: 0.25,
            tool_misuse: 0.25,
            cost: 0.15,
        }
    }
}

impl SignalWeights {
    pub fn weight_for(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Hallucination => self.hallucination,
            Signal::Loop => self.loop_,
            Signal::ToolMisuse => self.tool_misuse,
            Signal::Cost => self.cost,
        }
    }

    pub fn total(&self) -> f64 {
        Signal::ALL.iter().map(|&s| self.weight_for(s)).sum()
    }

    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() < WEIGHT_SUM_TOLERANCE
    }
}

/// Overall-score cutoffs. Scores at or above a cutoff take that verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictThresholds {
    /// Default: 0.4.
    pub warn: f64,
    /// Default: 0.7.
    pub fail: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            warn: 0.4,
            fail: 0.7,
        }
    }
}

/// Per-signal cutoffs that override the overall-score verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalThresholds {
    /// Default: 0.8 (forces FAIL).
    pub hallucination: f64,
    /// Default: 0.8 (forces FAIL).
    #[serde(rename = "loop")]
    pub loop_: f64,
    /// Default: 0.7 (forces at least WARN).
    pub tool_misuse: f64,
    /// Default: 0.9 (forces at least WARN).
    pub cost: f64,
}

impl Default for CriticalThresholds {
    fn default() -> Self {
        Self {
            hallucination: 0.8,
            loop_: 0.8,
            tool_misuse: 0.7,
            cost: 0.9,
        }
    }
}

impl CriticalThresholds {
    pub fn threshold_for(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Hallucination => self.hallucination,
            Signal::Loop => self.loop_,
            Signal::ToolMisuse => self.tool_misuse,
            Signal::Cost => self.cost,
        }
    }
}

/// Token budgets for the cost detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostThresholds {
    /// Default: 10 000. Usage at or below this is not penalised.
    pub normal_tokens: u64,
    /// Default: 50 000. Midpoint of the 0.0–1.0 absolute-usage ramp.
    pub high_tokens: u64,
    /// Default: 100 000. Above this the absolute factor saturates.
    pub excessive_tokens: u64,
    /// Default: 1000.
    pub tokens_per_message: f64,
    /// Default: 2.0.
    pub completion_ratio: f64,
}

impl Default for CostThresholds {
    fn default() -> Self {
        Self {
            normal_tokens: 10_000,
            high_tokens: 50_000,
            excessive_tokens: 100_000,
            tokens_per_message: 1000.0,
            completion_ratio: 2.0,
        }
    }
}

/// Runtime configuration for the Reliability Sentinel.
///
/// Built once at startup and handed by value to the aggregator, the
/// policy and the cost detector. There is no mutation API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    pub weights: SignalWeights,
    pub verdict: VerdictThresholds,
    pub critical: CriticalThresholds,
    pub cost: CostThresholds,
}

fn check_unit(name: &str, value: f64) -> SentinelResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SentinelError::Config(format!(
            "{name} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}

impl SentinelConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> SentinelResult<()> {
        for signal in Signal::ALL {
            check_unit(
                &format!("weights.{}", signal.name()),
                self.weights.weight_for(signal),
            )?;
            check_unit(
                &format!("critical.{}", signal.name()),
                self.critical.threshold_for(signal),
            )?;
        }
        if !self.weights.is_normalized() {
            return Err(SentinelError::Config(format!(
                "signal weights must sum to 1.0, got {}",
                self.weights.total()
            )));
        }
        check_unit("verdict.warn", self.verdict.warn)?;
        check_unit("verdict.fail", self.verdict.fail)?;
        if self.verdict.warn >= self.verdict.fail {
            return Err(SentinelError::Config(format!(
                "verdict.warn must be below verdict.fail, got {} >= {}",
                self.verdict.warn, self.verdict.fail
            )));
        }
        let cost = &self.cost;
        if !(cost.normal_tokens < cost.high_tokens && cost.high_tokens < cost.excessive_tokens) {
            return Err(SentinelError::Config(format!(
                "cost thresholds must increase: normal {} < high {} < excessive {}",
                cost.normal_tokens, cost.high_tokens, cost.excessive_tokens
            )));
        }
        if cost.tokens_per_message <= 0.0 {
            return Err(SentinelError::Config(format!(
                "cost.tokens_per_message must be > 0, got {}",
                cost.tokens_per_message
            )));
        }
        if cost.completion_ratio <= 0.0 {
            return Err(SentinelError::Config(format!(
                "cost.completion_ratio must be > 0, got {}",
                cost.completion_ratio
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> SentinelResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SentinelError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
