// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Reliability Sentinel Score Types
// ─────────────────────────────────────────────────────────────────────

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{SentinelError, SentinelResult};

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to nearest bound.
#[inline]
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_score: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_score: Inf detected, clamping to {boundary:.4}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// Clamp to the unit risk interval.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    clamp_score(value, 0.0, 1.0)
}

/// The four canonical reliability signals, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Hallucination,
    Loop,
    ToolMisuse,
    Cost,
}

impl Signal {
    pub const ALL: [Signal; 4] = [
        Signal::Hallucination,
        Signal::Loop,
        Signal::ToolMisuse,
        Signal::Cost,
    ];

    /// Canonical wire name.
    pub fn name(self) -> &'static str {
        match self {
            Signal::Hallucination => "hallucination",
            Signal::Loop => "loop",
            Signal::ToolMisuse => "tool_misuse",
            Signal::Cost => "cost",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Signal::Hallucination => {
                "Critical reliability issue - agent producing ungrounded outputs"
            }
            Signal::Loop => "Agent stuck in repetitive behavior or runaway execution",
            Signal::ToolMisuse => "Incorrect or dangerous tool usage patterns",
            Signal::Cost => "Efficiency concern - excessive token/resource usage",
        }
    }

    /// Verdict forced when this signal crosses its critical threshold.
    ///
    /// Hallucination and loop are reliability failures; tool misuse and
    /// cost only demand a review.
    pub fn critical_verdict(self) -> Verdict {
        match self {
            Signal::Hallucination | Signal::Loop => Verdict::Fail,
            Signal::ToolMisuse | Signal::Cost => Verdict::Warn,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Signal {
    type Err = SentinelError;

    fn from_str(s: &str) -> SentinelResult<Self> {
        Signal::ALL
            .into_iter()
            .find(|signal| signal.name() == s)
            .ok_or_else(|| SentinelError::UnknownSignal(s.to_string()))
    }
}

fn clamped_unit<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_unit)
}

/// Score for an individual reliability signal.
///
/// `score` is a risk in [0, 1]: 1.0 = maximal risk. The name stays a
/// plain string on the wire; [`SignalScore::signal`] resolves it.
///
/// Both [`SignalScore::new`] and deserialization clamp `score`. The
/// field itself is public, so code that assigns it directly bypasses
/// the clamp; the aggregator clamps its own output for that reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalScore {
    pub signal_name: String,
    #[serde(deserialize_with = "clamped_unit")]
    pub score: f64,
    pub details: Option<String>,
}

impl SignalScore {
    pub fn new(signal_name: impl Into<String>, score: f64) -> Self {
        Self {
            signal_name: signal_name.into(),
            score: clamp_unit(score),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn signal(&self) -> SentinelResult<Signal> {
        self.signal_name.parse()
    }

    pub fn level(&self) -> ScoreLevel {
        ScoreLevel::from_score(self.score)
    }
}

/// Overall reliability verdict, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Warn => "WARN",
            Verdict::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative label for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoreLevel {
    Minimal,
    Low,
    Moderate,
    High,
    Critical,
}

impl ScoreLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ScoreLevel::Critical
        } else if score >= 0.6 {
            ScoreLevel::High
        } else if score >= 0.4 {
            ScoreLevel::Moderate
        } else if score >= 0.2 {
            ScoreLevel::Low
        } else {
            ScoreLevel::Minimal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreLevel::Minimal => "minimal",
            ScoreLevel::Low => "low",
            ScoreLevel::Moderate => "moderate",
            ScoreLevel::High => "high",
            ScoreLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
