//! Health and state probes for a running zero node over plain HTTP.

pub mod cli;
pub mod environment;
pub mod error;
pub mod http;
pub mod logging;
pub mod storage;
pub mod testing;

pub use error::{ErrorKind, ProbeError, StorageError};
pub use http::client::DEFAULT_TIMEOUT;
pub use testing::{ProbeCases, ProbeOutcome, ProbeRunner, RunReport, TestCase, run_cases, run_report};
