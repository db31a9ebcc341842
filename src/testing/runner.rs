use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, error, info};

use super::{ProbeCases, ProbeFailure, ProbeOutcome, RunReport, TestCase, check_content, check_status};
use crate::error::ProbeError;
use crate::http::client::{build_client, read_body, send_get};
use crate::http::response::HttpResponse;

/// Runs probe cases through one shared client.
///
/// The runner owns the client, and with it the connection pool. [`run`]
/// consumes the runner so the pool is released exactly once, when the run
/// ends, whichever way it ends.
///
/// [`run`]: ProbeRunner::run
#[derive(Debug)]
pub struct ProbeRunner {
    client: Client,
}

impl ProbeRunner {
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }

    /// Execute a single case: GET, status check, body read, content check.
    pub async fn probe(&self, case: &TestCase) -> Result<ProbeOutcome, ProbeError> {
        debug!(url = %case.url, "sending probe");
        let started = Instant::now();

        let response = send_get(&self.client, &case.url).await?;
        let status = response.status().as_u16();
        // A mismatched status drops the unread response here.
        check_status(case, status)?;

        let body = read_body(&case.url, response).await?;
        let response = HttpResponse {
            status,
            duration_ms: started.elapsed().as_millis(),
            body,
        };
        check_content(case, &response.body_text())?;

        info!(
            url = %case.url,
            status,
            duration_ms = u64::try_from(response.duration_ms).unwrap_or(u64::MAX),
            "probe passed"
        );
        Ok(ProbeOutcome {
            url: case.url.clone(),
            status,
            duration_ms: response.duration_ms,
        })
    }

    /// Probe every case in order, stopping at the first failure.
    pub async fn run(self, cases: &ProbeCases) -> Result<Vec<ProbeOutcome>, ProbeError> {
        match self.run_until_failure(cases).await {
            (outcomes, None) => Ok(outcomes),
            (_, Some((_, err))) => Err(err),
        }
    }

    /// Passed outcomes, plus the index and error of the case that ended the
    /// run early. Consumes the runner, so the pool goes when this returns.
    async fn run_until_failure(self, cases: &ProbeCases) -> (Vec<ProbeOutcome>, Option<(usize, ProbeError)>) {
        let mut outcomes = Vec::with_capacity(cases.len());
        for (index, case) in cases.iter().enumerate() {
            match self.probe(case).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    error!(url = %case.url, index, kind = ?err.kind(), "probe failed: {err}");
                    return (outcomes, Some((index, err)));
                }
            }
        }
        (outcomes, None)
    }
}

/// Build a runner with `timeout` and run `cases` through it.
pub async fn run_cases(cases: &ProbeCases, timeout: Duration) -> Result<Vec<ProbeOutcome>, ProbeError> {
    ProbeRunner::new(timeout)?.run(cases).await
}

/// Like [`run_cases`], but folds the result into a [`RunReport`]. Still
/// stops at the first failure; later cases are neither sent nor counted as
/// passed.
pub async fn run_report(cases: &ProbeCases, timeout: Duration) -> RunReport {
    let started = Instant::now();
    let mut report = RunReport {
        total: cases.len(),
        ..Default::default()
    };

    match ProbeRunner::new(timeout) {
        Ok(runner) => {
            let (outcomes, failure) = runner.run_until_failure(cases).await;
            report.outcomes = outcomes;
            report.failure = failure.map(|(index, err)| ProbeFailure::from_error(Some(index), &err));
        }
        Err(err) => {
            error!("{err}");
            report.failure = Some(ProbeFailure::from_error(None, &err));
        }
    }

    report.passed = report.outcomes.len();
    report.duration_ms = started.elapsed().as_millis();
    report
}
