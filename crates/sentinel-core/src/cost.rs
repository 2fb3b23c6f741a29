// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Cost Signal
// ─────────────────────────────────────────────────────────────────────
//! Token usage and efficiency risk.
//!
//! Risk is the maximum of four factors: absolute usage against the
//! configured budgets, tokens per message, completion/prompt ratio,
//! and a fixed data-quality flag for messages with zero recorded tokens.

use serde::{Deserialize, Serialize};

use sentinel_types::{clamp_unit, CostThresholds, ExecutionTrace, Signal};

use crate::detector::{tiered_details, SignalDetector};

/// Tokens-per-message excess at which the efficiency factor saturates.
const TOKENS_PER_MESSAGE_SPAN: f64 = 2000.0;
const TOKENS_PER_MESSAGE_WEIGHT: f64 = 0.7;
/// Completion-ratio excess at which the ratio factor saturates.
const COMPLETION_RATIO_SPAN: f64 = 3.0;
const COMPLETION_RATIO_WEIGHT: f64 = 0.5;
const ZERO_TOKEN_RISK: f64 = 0.3;

fn absolute_usage_factor(total: u64, t: &CostThresholds) -> Option<f64> {
    if total <= t.normal_tokens {
        return None;
    }
    let total_f = total as f64;
    let normal = t.normal_tokens as f64;
    let high = t.high_tokens as f64;
    let excessive = t.excessive_tokens as f64;

    let factor = if total > t.excessive_tokens {
        1.0
    } else if total > t.high_tokens {
        0.5 + (total_f - high) / (excessive - high) * 0.5
    } else {
        (total_f - normal) / (high - normal) * 0.5
    };
    Some(factor.min(1.0))
}

/// Cost risk for a trace under the given budgets, in [0, 1].
pub fn detect_cost(trace: &ExecutionTrace, thresholds: &CostThresholds) -> f64 {
    let usage = match trace.token_usage {
        Some(usage) if !trace.messages.is_empty() => usage,
        _ => return 0.0,
    };
    let message_count = trace.total_messages();
    let mut factors: Vec<f64> = Vec::with_capacity(4);

    if let Some(f) = absolute_usage_factor(usage.total_tokens, thresholds) {
        factors.push(f);
    }

    let tokens_per_message = usage.total_tokens as f64 / message_count as f64;
    if tokens_per_message > thresholds.tokens_per_message {
        let excess = (tokens_per_message - thresholds.tokens_per_message) / TOKENS_PER_MESSAGE_SPAN;
        factors.push(excess.min(1.0) * TOKENS_PER_MESSAGE_WEIGHT);
    }

    if usage.prompt_tokens > 0 {
        let completion_ratio = usage.completion_tokens as f64 / usage.prompt_tokens as f64;
        if completion_ratio > thresholds.completion_ratio {
            let excess = (completion_ratio - thresholds.completion_ratio) / COMPLETION_RATIO_SPAN;
            factors.push(excess.min(1.0) * COMPLETION_RATIO_WEIGHT);
        }
    }

    // Messages exist but nothing was counted: incomplete data.
    if usage.total_tokens == 0 {
        factors.push(ZERO_TOKEN_RISK);
    }

    clamp_unit(factors.into_iter().fold(0.0, f64::max))
}

/// Token usage figures for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsageSummary {
    pub total_tokens: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    /// Rounded to 2 decimals.
    pub tokens_per_message: f64,
    /// Rounded to 2 decimals.
    pub completion_ratio: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn token_usage_summary(trace: &ExecutionTrace) -> TokenUsageSummary {
    let Some(usage) = trace.token_usage else {
        return TokenUsageSummary::default();
    };
    let message_count = trace.total_messages();
    let tokens_per_message = if message_count > 0 {
        usage.total_tokens as f64 / message_count as f64
    } else {
        0.0
    };
    let completion_ratio = if usage.prompt_tokens > 0 {
        usage.completion_tokens as f64 / usage.prompt_tokens as f64
    } else {
        0.0
    };
    TokenUsageSummary {
        total_tokens: usage.total_tokens,
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        tokens_per_message: round2(tokens_per_message),
        completion_ratio: round2(completion_ratio),
    }
}

pub struct CostDetector {
    thresholds: CostThresholds,
}

impl CostDetector {
    pub fn new(thresholds: CostThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &CostThresholds {
        &self.thresholds
    }
}

impl Default for CostDetector {
    fn default() -> Self {
        Self::new(CostThresholds::default())
    }
}

impl SignalDetector for CostDetector {
    fn signal(&self) -> Signal {
        Signal::Cost
    }

    fn detect(&self, trace: &ExecutionTrace) -> f64 {
        detect_cost(trace, &self.thresholds)
    }

    fn details(&self, score: f64, trace: &ExecutionTrace) -> String {
        let total = trace.total_tokens();
        let prefix = tiered_details(
            score,
            [
                "Excessive resource usage detected",
                "High resource usage",
                "Moderate resource usage",
                "Resource usage within normal range",
            ],
        );
        format!("{prefix} ({total} tokens)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use sentinel_types::TokenUsage;

    fn cost(messages: usize, usage: TokenUsage) -> f64 {
        let msgs = (0..messages)
            .map(|i| if i % 2 == 0 { user("q") } else { assistant("a") })
            .collect();
        detect_cost(&trace_with_usage(msgs, usage), &CostThresholds::default())
    }

    #[test]
    fn test_excessive_tokens() {
        let score = cost(2, TokenUsage::new(50_000, 60_000, 110_000));
        assert!(score > 0.7);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_high_tokens_band() {
        // 75k over 100 messages: absolute 0.75, tokens/message under limit
        let score = cost(100, TokenUsage::new(60_000, 15_000, 75_000));
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_moderate_tokens_band() {
        // 30k over 40 messages: absolute (20k / 40k) × 0.5 = 0.25
        let score = cost(40, TokenUsage::new(20_000, 10_000, 30_000));
        assert!((score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_inefficient_usage() {
        // 5000 tokens in 1 message: (4000 / 2000) capped × 0.7
        let score = cost(1, TokenUsage::new(4_000, 1_000, 5_000));
        assert!((score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_high_completion_ratio() {
        // ratio 5.0 → (3.0 / 3.0) × 0.5
        let score = cost(4, TokenUsage::new(100, 500, 600));
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_normal_usage() {
        assert_eq!(cost(4, TokenUsage::new(800, 400, 1_200)), 0.0);
    }

    #[test]
    fn test_zero_tokens_with_messages() {
        let score = cost(2, TokenUsage::default());
        assert!((score - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_empty_trace() {
        assert_eq!(cost(0, TokenUsage::default()), 0.0);
        assert_eq!(cost(0, TokenUsage::new(0, 0, 500_000)), 0.0);
    }

    #[test]
    fn test_no_usage_data() {
        let t = sentinel_types::ExecutionTrace::new("t", vec![user("hi")], None);
        assert_eq!(detect_cost(&t, &CostThresholds::default()), 0.0);
    }

    #[test]
    fn test_total_trusted_over_parts() {
        // prompt + completion disagree with total; total wins
        let score = cost(20, TokenUsage::new(10, 10, 200_000));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = CostThresholds {
            normal_tokens: 100,
            high_tokens: 200,
            excessive_tokens: 300,
            ..CostThresholds::default()
        };
        let t = trace_with_usage(vec![user("q"); 10], TokenUsage::new(200, 150, 350));
        assert_eq!(detect_cost(&t, &thresholds), 1.0);
    }

    #[test]
    fn test_token_usage_summary() {
        let t = trace_with_usage(
            vec![user("q"), assistant("a")],
            TokenUsage::new(1_000, 500, 1_500),
        );
        let summary = token_usage_summary(&t);
        assert_eq!(summary.total_tokens, 1_500);
        assert_eq!(summary.prompt_tokens, 1_000);
        assert_eq!(summary.completion_tokens, 500);
        assert!((summary.tokens_per_message - 750.0).abs() < 1e-9);
        assert!((summary.completion_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_token_usage_summary_no_usage() {
        let t = sentinel_types::ExecutionTrace::new("t", vec![user("hi")], None);
        assert_eq!(token_usage_summary(&t), TokenUsageSummary::default());
    }

    #[test]
    fn test_details_include_total() {
        let d = CostDetector::default();
        let t = trace_with_usage(vec![user("q")], TokenUsage::new(1, 1, 110_000));
        let details = d.details(1.0, &t);
        assert_eq!(details, "Excessive resource usage detected (110000 tokens)");
    }
}
