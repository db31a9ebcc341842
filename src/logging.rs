use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "info";

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`. Stdout stays
/// free for the report. Safe to call more than once.
pub fn init() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .is_err()
        {
            tracing::debug!("global tracing subscriber already set");
        }
    });
}
