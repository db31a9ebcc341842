use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::environment::{interpolate, variables_for};
use crate::error::StorageError;
use crate::testing::{DEFAULT_BASE_URL, ProbeCases, RunReport, TestCase};

/// A case file is either a bare array of cases or a document that also
/// names the base URL its `{{base_url}}` placeholders expand to.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CaseFile {
    List(Vec<TestCase>),
    Document(CaseDocument),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaseDocument {
    #[serde(default)]
    base_url: Option<String>,
    cases: Vec<TestCase>,
}

/// Load cases from a JSON file. `base_url` overrides whatever the file
/// declares.
pub fn load_cases(path: &Path, base_url: Option<&str>) -> Result<ProbeCases, StorageError> {
    let raw = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cases = parse_cases(&raw, path, base_url)?;
    info!(path = %path.display(), count = cases.len(), "loaded probe cases");
    Ok(cases)
}

pub fn parse_cases(raw: &str, path: &Path, base_url: Option<&str>) -> Result<ProbeCases, StorageError> {
    let file: CaseFile = serde_json::from_str(raw).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let (declared, cases) = match file {
        CaseFile::List(cases) => (None, cases),
        CaseFile::Document(doc) => (doc.base_url, doc.cases),
    };
    if cases.is_empty() {
        return Err(StorageError::EmptyCases {
            path: path.to_path_buf(),
        });
    }

    let base = base_url
        .map(str::to_string)
        .or(declared)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let vars = variables_for(&base);

    let mut resolved = Vec::with_capacity(cases.len());
    for (index, case) in cases.into_iter().enumerate() {
        let url = interpolate(case.url.trim(), &vars);
        if url.is_empty() {
            return Err(StorageError::InvalidCase {
                path: path.to_path_buf(),
                index,
                reason: "URL cannot be empty".to_string(),
            });
        }
        if !(100..=599).contains(&case.status_code) {
            return Err(StorageError::InvalidCase {
                path: path.to_path_buf(),
                index,
                reason: format!("status code {} is not a valid HTTP status", case.status_code),
            });
        }
        debug!(index, url = %url, "resolved case");
        resolved.push(TestCase { url, ..case });
    }

    Ok(ProbeCases::new(resolved))
}

/// Write a run report as pretty JSON.
pub fn save_report(path: &Path, report: &RunReport) -> Result<(), StorageError> {
    let raw = serde_json::to_string_pretty(report).map_err(StorageError::Serialize)?;
    fs::write(path, raw).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}
