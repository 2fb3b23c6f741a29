// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Reliability Sentinel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Reliability Sentinel failures.
///
/// Every variant is a caller-input defect. Nothing here is transient,
/// so callers should not retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SentinelError {
    /// No trace document was supplied (empty input or JSON `null`).
    #[error("cannot evaluate: trace is missing")]
    MissingTrace,

    /// The trace identifier is empty or absent.
    #[error("cannot evaluate: trace_id is required")]
    MissingTraceId,

    /// Aggregator invoked with an empty score list.
    #[error("cannot calculate score: no signal scores provided")]
    NoSignalScores,

    /// A score names a signal outside the canonical four.
    #[error("unknown signal: {0}")]
    UnknownSignal(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Trace document could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// A report could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type SentinelResult<T> = Result<T, SentinelError>;
