use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Failure of a single probe. Every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid request for `{url}`: {source}")]
    RequestBuild {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to `{url}` failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("status code is not same. Got: {got} Expected: {expected}")]
    StatusMismatch { url: String, got: u16, expected: u16 },

    #[error("Failed to read response from `{url}`: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response is not same. Got: {got} Expected: {expected}")]
    ContentMismatch {
        url: String,
        got: String,
        expected: String,
    },
}

/// Coarse classification of a [`ProbeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ClientBuild,
    RequestBuild,
    Transport,
    StatusMismatch,
    BodyRead,
    ContentMismatch,
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbeError::ClientBuild(_) => ErrorKind::ClientBuild,
            ProbeError::RequestBuild { .. } => ErrorKind::RequestBuild,
            ProbeError::Transport { .. } => ErrorKind::Transport,
            ProbeError::StatusMismatch { .. } => ErrorKind::StatusMismatch,
            ProbeError::BodyRead { .. } => ErrorKind::BodyRead,
            ProbeError::ContentMismatch { .. } => ErrorKind::ContentMismatch,
        }
    }

    /// URL of the case that failed, if the failure is tied to one.
    pub fn url(&self) -> Option<&str> {
        match self {
            ProbeError::ClientBuild(_) => None,
            ProbeError::RequestBuild { url, .. }
            | ProbeError::Transport { url, .. }
            | ProbeError::StatusMismatch { url, .. }
            | ProbeError::BodyRead { url, .. }
            | ProbeError::ContentMismatch { url, .. } => Some(url),
        }
    }
}

/// Errors raised while loading case files or writing reports.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read case file `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse case file `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Case file `{}` contains no cases", path.display())]
    EmptyCases { path: PathBuf },

    #[error("Invalid case #{index} in `{}`: {reason}", path.display())]
    InvalidCase {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write report file `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
