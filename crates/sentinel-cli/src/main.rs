// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Reliability Sentinel CLI
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Evaluate one agent execution trace and print its reliability report.
//!
//! Usage:
//! ```text
//! sentinel trace.json --pretty
//! cat trace.json | sentinel --stdin -v
//! sentinel --show-policy --config sentinel.json
//! ```
//!
//! The JSON report goes to stdout. The exit code carries the verdict:
//! 0 PASS, 1 WARN, 2 FAIL, 3 for any error.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use sentinel_core::{token_usage_summary, ReliabilityEvaluator};
use sentinel_types::Verdict;

mod loader;
mod summary;

const EXIT_ERROR: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "sentinel",
    version,
    about = "Reliability Sentinel: post-hoc reliability evaluation of agent execution traces"
)]
struct Cli {
    /// Path to an execution trace JSON file
    #[arg(conflicts_with = "stdin")]
    trace_file: Option<PathBuf>,

    /// Read the execution trace from stdin instead of a file
    #[arg(long)]
    stdin: bool,

    /// Print a human-readable summary to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// JSON configuration file (weights and thresholds)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the active weights and thresholds as JSON and exit
    #[arg(long)]
    show_policy: bool,
}

fn exit_code(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 1,
        Verdict::Fail => 2,
    }
}

/// Help and version requests succeed; every other usage error is an
/// error exit, never a verdict code.
fn usage_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => EXIT_ERROR,
    }
}

fn run(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> Result<u8> {
    let config = loader::config_from(cli.config.as_deref())?;

    if cli.show_policy {
        let policy = serde_json::to_string_pretty(&summary::policy_json(&config))
            .context("failed to serialise policy")?;
        writeln!(out, "{policy}")?;
        return Ok(0);
    }

    let trace = match (&cli.trace_file, cli.stdin) {
        (_, true) => loader::trace_from_reader(io::stdin().lock())?,
        (Some(path), false) => loader::trace_from_file(path)?,
        (None, false) => bail!("no trace supplied: pass a trace file path or --stdin"),
    };

    let evaluator = ReliabilityEvaluator::new(config)?;
    let report = evaluator.evaluate(&trace)?;

    let json = if cli.pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    writeln!(out, "{json}")?;

    if cli.verbose {
        summary::write_summary(err, &report, &token_usage_summary(&trace))?;
    }

    Ok(exit_code(report.verdict))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Printing can only fail if stderr is gone.
            let _ = e.print();
            return ExitCode::from(usage_exit_code(e.kind()));
        }
    };
    let stdout = io::stdout();
    let stderr = io::stderr();

    match run(&cli, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            log::debug!("evaluation aborted: {e:?}");
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
