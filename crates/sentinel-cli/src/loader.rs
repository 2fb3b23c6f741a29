// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Trace & Config Loading
// ─────────────────────────────────────────────────────────────────────

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use sentinel_types::{parse_trace, ExecutionTrace, SentinelConfig};

/// Read and decode a trace document from disk.
pub fn trace_from_file(path: &Path) -> Result<ExecutionTrace> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("trace file not found or unreadable: {}", path.display()))?;
    log::debug!("read {} bytes from {}", raw.len(), path.display());
    parse_trace(&raw).with_context(|| format!("invalid trace in {}", path.display()))
}

/// Read and decode a trace document from any reader (stdin in practice).
pub fn trace_from_reader(mut reader: impl Read) -> Result<ExecutionTrace> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .context("failed to read trace from stdin")?;
    parse_trace(&raw).context("invalid trace on stdin")
}

/// Load a configuration file, or the defaults when no path is given.
pub fn config_from(path: Option<&Path>) -> Result<SentinelConfig> {
    let Some(path) = path else {
        return Ok(SentinelConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("config file not found or unreadable: {}", path.display()))?;
    SentinelConfig::from_json(&raw).with_context(|| format!("invalid config in {}", path.display()))
}
