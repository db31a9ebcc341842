//! # Probe cases & assertions
//!
//! A probe case pairs a URL with the status code and body fragment the
//! server is expected to answer with. Cases are checked strictly in order
//! and the first failing check ends the run.

pub mod runner;

#[cfg(test)]
pub(crate) mod test_server;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ProbeError};

pub use runner::{ProbeRunner, run_cases, run_report};

/// Address of a zero started with default flags, plain HTTP.
pub const DEFAULT_BASE_URL: &str = "http://localhost:6180";

pub const HEALTH_PATH: &str = "/health";
pub const HEALTH_RESPONSE: &str = "OK";

pub const STATE_PATH: &str = "/state";
/// Fragment of the `/state` membership entry for a lone leader. Only
/// containment is checked, so no closing brace.
pub const STATE_RESPONSE: &str =
    r#""id":"1","groupId":0,"addr":"localhost:5080","leader":true,"amDead":false"#;

/// A single (URL, expected status, expected body substring) case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub url: String,
    pub status_code: u16,
    pub response: String,
}

impl TestCase {
    pub fn new(url: impl Into<String>, status_code: u16, response: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code,
            response: response.into(),
        }
    }
}

/// Ordered, immutable sequence of cases for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbeCases(Vec<TestCase>);

impl ProbeCases {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self(cases)
    }

    /// `/health` and `/state` against a local zero.
    pub fn zero_defaults() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// The default cases rooted at `base_url` instead.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self(vec![
            TestCase::new(format!("{base}{HEALTH_PATH}"), 200, HEALTH_RESPONSE),
            TestCase::new(format!("{base}{STATE_PATH}"), 200, STATE_RESPONSE),
        ])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[TestCase] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ProbeCases {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Record of a passed probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeOutcome {
    pub url: String,
    pub status: u16,
    pub duration_ms: u128,
}

/// The failure that ended a run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeFailure {
    /// Position of the failing case; `None` when the run failed before the
    /// first probe (client construction).
    pub index: Option<usize>,
    pub url: Option<String>,
    pub kind: ErrorKind,
    pub message: String,
}

impl ProbeFailure {
    pub fn from_error(index: Option<usize>, error: &ProbeError) -> Self {
        Self {
            index,
            url: error.url().map(str::to_string),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Summary of one run. At most one failure, since the run stops there.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub duration_ms: u128,
    pub outcomes: Vec<ProbeOutcome>,
    pub failure: Option<ProbeFailure>,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.failure.is_none()
    }
}

pub fn check_status(case: &TestCase, status: u16) -> Result<(), ProbeError> {
    if status != case.status_code {
        return Err(ProbeError::StatusMismatch {
            url: case.url.clone(),
            got: status,
            expected: case.status_code,
        });
    }
    Ok(())
}

pub fn check_content(case: &TestCase, body: &str) -> Result<(), ProbeError> {
    if !body.contains(&case.response) {
        return Err(ProbeError::ContentMismatch {
            url: case.url.clone(),
            got: body.to_string(),
            expected: case.response.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_zero() {
        let cases = ProbeCases::zero_defaults();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases.as_slice()[0].url, "http://localhost:6180/health");
        assert_eq!(cases.as_slice()[0].status_code, 200);
        assert_eq!(cases.as_slice()[0].response, "OK");
        assert_eq!(cases.as_slice()[1].url, "http://localhost:6180/state");
        assert_eq!(
            cases.as_slice()[1].response,
            "\"id\":\"1\",\"groupId\":0,\"addr\":\"localhost:5080\",\"leader\":true,\"amDead\":false"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let cases = ProbeCases::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(cases.as_slice()[0].url, "http://127.0.0.1:9000/health");
    }

    #[test]
    fn content_passes_on_substring() {
        let case = TestCase::new("http://localhost:6180/health", 200, "OK");
        assert!(check_status(&case, 200).is_ok());
        assert!(check_content(&case, "status: OK\n").is_ok());
    }

    #[test]
    fn state_fragment_inside_json() {
        let case = ProbeCases::zero_defaults().as_slice()[1].clone();
        let body = r#"{"counter":"5","groups":{"1":{"members":{"1":{"id":"1","groupId":0,"addr":"localhost:5080","leader":true,"amDead":false,"lastUpdate":"1"}}}}}"#;
        assert!(check_content(&case, body).is_ok());
    }

    #[test]
    fn wrong_status_reports_both_codes() {
        let case = TestCase::new("http://localhost:6180/health", 200, "OK");
        let err = check_status(&case, 500).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StatusMismatch);
        assert_eq!(err.to_string(), "status code is not same. Got: 500 Expected: 200");
    }

    #[test]
    fn missing_leader_flag_is_content_mismatch() {
        let case = ProbeCases::zero_defaults().as_slice()[1].clone();
        let body = r#"{"id":"1","groupId":0,"addr":"localhost:5080","leader":false,"amDead":false}"#;
        let err = check_content(&case, body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContentMismatch);
        let message = err.to_string();
        assert!(message.contains(&format!("Got: {body}")));
        assert!(message.contains(&format!("Expected: {STATE_RESPONSE}")));
    }

    #[test]
    fn case_json_uses_camel_case() {
        let case: TestCase =
            serde_json::from_str(r#"{"url":"http://h/health","statusCode":204,"response":""}"#).unwrap();
        assert_eq!(case, TestCase::new("http://h/health", 204, ""));
    }

    #[test]
    fn report_success_tracks_failure() {
        let mut report = RunReport::default();
        assert!(report.success());
        report.failure = Some(ProbeFailure::from_error(
            Some(0),
            &ProbeError::StatusMismatch {
                url: "http://h/health".into(),
                got: 404,
                expected: 200,
            },
        ));
        assert!(!report.success());
        assert_eq!(report.failure.as_ref().unwrap().url.as_deref(), Some("http://h/health"));
    }
}
