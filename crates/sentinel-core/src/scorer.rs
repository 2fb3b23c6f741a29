// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Score Aggregator
// ─────────────────────────────────────────────────────────────────────
//! Linear weighted aggregation of signal scores.
//!
//! The overall score is `Σ(score × weight) / Σ(weight)` over the
//! signals present. With all four signals present the denominator is
//! 1.0 and this is the plain weighted sum; with a subset it remains a
//! true weighted average.

use sentinel_types::{clamp_unit, SentinelError, SentinelResult, SignalScore, SignalWeights};

/// Weighted linear score aggregator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAggregator {
    weights: SignalWeights,
}

impl ScoreAggregator {
    pub fn new(weights: SignalWeights) -> Self {
        Self { weights }
    }

    /// Combine signal scores into one overall risk in [0, 1].
    ///
    /// Fails on an empty list or on any non-canonical signal name.
    pub fn aggregate(&self, scores: &[SignalScore]) -> SentinelResult<f64> {
        if scores.is_empty() {
            return Err(SentinelError::NoSignalScores);
        }

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for score in scores {
            let weight = self.weights.weight_for(score.signal()?);
            weighted_sum += score.score * weight;
            total_weight += weight;
        }

        let overall = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        };
        Ok(clamp_unit(overall))
    }

    /// Read-only access to weights.
    pub fn weights(&self) -> &SignalWeights {
        &self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: &[(&str, f64)]) -> Vec<SignalScore> {
        values
            .iter()
            .map(|&(name, score)| SignalScore::new(name, score))
            .collect()
    }

    #[test]
    fn test_all_zeros() {
        let agg = ScoreAggregator::default();
        let s = scores(&[("hallucination", 0.0), ("loop", 0.0), ("tool_misuse", 0.0), ("cost", 0.0)]);
        assert_eq!(agg.aggregate(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_all_ones() {
        let agg = ScoreAggregator::default();
        let s = scores(&[("hallucination", 1.0), ("loop", 1.0), ("tool_misuse", 1.0), ("cost", 1.0)]);
        assert!((agg.aggregate(&s).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_hallucination_only() {
        let agg = ScoreAggregator::default();
        let s = scores(&[("hallucination", 1.0), ("loop", 0.0), ("tool_misuse", 0.0), ("cost", 0.0)]);
        assert!((agg.aggregate(&s).unwrap() - 0.35).abs() < 0.001);
    }

    #[test]
    fn test_mixed() {
        let agg = ScoreAggregator::default();
        let s = scores(&[("hallucination", 0.5), ("loop", 0.3), ("tool_misuse", 0.2), ("cost", 0.1)]);
        let expected = 0.5 * 0.35 + 0.3 * 0.25 + 0.2 * 0.25 + 0.1 * 0.15;
        assert!((agg.aggregate(&s).unwrap() - expected).abs() < 0.001);
    }

    #[test]
    fn test_subset_normalized() {
        let agg = ScoreAggregator::default();
        let s = scores(&[("hallucination", 0.8), ("loop", 0.4)]);
        let expected = (0.8 * 0.35 + 0.4 * 0.25) / (0.35 + 0.25);
        assert!((agg.aggregate(&s).unwrap() - expected).abs() < 0.001);
    }

    #[test]
    fn test_empty_rejected() {
        let agg = ScoreAggregator::default();
        assert_eq!(agg.aggregate(&[]).unwrap_err(), SentinelError::NoSignalScores);
    }

    #[test]
    fn test_unknown_signal_rejected() {
        let agg = ScoreAggregator::default();
        let s = scores(&[("hallucination", 0.5), ("latency", 0.5)]);
        assert_eq!(
            agg.aggregate(&s).unwrap_err(),
            SentinelError::UnknownSignal("latency".into())
        );
    }

    #[test]
    fn test_result_clamped() {
        let agg = ScoreAggregator::default();
        let mut s = scores(&[("hallucination", 1.0), ("loop", 1.0)]);
        // Bypass constructor clamping to feed an out-of-range value
        s[0].score = 7.5;
        let overall = agg.aggregate(&s).unwrap();
        assert!((0.0..=1.0).contains(&overall));
    }

    #[test]
    fn test_zero_weight_subset() {
        let weights = SignalWeights {
            hallucination: 0.0,
            loop_: 0.5,
            tool_misuse: 0.5,
            cost: 0.0,
        };
        let agg = ScoreAggregator::new(weights);
        assert_eq!(agg.aggregate(&scores(&[("cost", 0.9)])).unwrap(), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let agg = ScoreAggregator::default();
        let s = scores(&[("hallucination", 0.3), ("loop", 0.6), ("tool_misuse", 0.1), ("cost", 0.9)]);
        let a = agg.aggregate(&s).unwrap();
        let b = agg.aggregate(&s).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
