//! # CLI
//!
//! `zero-probe run` checks a running zero and reports pass/fail through the
//! exit code, for CI pipelines and cluster bring-up scripts.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::StorageError;
use crate::storage;
use crate::testing::{DEFAULT_BASE_URL, ProbeCases, RunReport};

#[derive(Debug, Parser)]
#[command(name = "zero-probe", version, about = "Health and state probes for a zero node")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe the server; exits non-zero on the first failing case.
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// JSON case file. Defaults to `/health` and `/state`.
    #[arg(long)]
    pub cases: Option<PathBuf>,

    /// Base URL for the default cases and for `{{base_url}}` in case files.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the JSON report to this file.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Output format for CLI reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl RunArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn resolve_cases(&self) -> Result<ProbeCases, StorageError> {
        match &self.cases {
            Some(path) => storage::load_cases(path, self.base_url.as_deref()),
            None => Ok(ProbeCases::with_base_url(
                self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            )),
        }
    }
}

pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    for outcome in &report.outcomes {
        let _ = writeln!(out, "PASS {} {} ({} ms)", outcome.url, outcome.status, outcome.duration_ms);
    }
    match &report.failure {
        Some(failure) => {
            let url = failure.url.as_deref().unwrap_or("-");
            let _ = writeln!(out, "FAIL {url}: {}", failure.message);
            let _ = writeln!(
                out,
                "{}/{} passed, stopped at first failure ({} ms)",
                report.passed, report.total, report.duration_ms
            );
        }
        None => {
            let _ = writeln!(out, "{}/{} passed ({} ms)", report.passed, report.total, report.duration_ms);
        }
    }
    out
}
