//! Tracing subscriber setup.
//!
//! Logs go to stderr so `--json` output on stdout stays machine-readable.
//! Filter precedence: `--log` flag, then `RUST_LOG`, then the config file,
//! then [`DEFAULT_DIRECTIVE`].

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "warn";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter `{directive}`: {message}")]
    InvalidFilter { directive: String, message: String },

    #[error("failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Pick the filter directive string to use.
pub fn select_directive(
    flag: Option<&str>,
    env: Option<&str>,
    config: Option<&str>,
) -> String {
    [flag, env, config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

pub fn init(flag: Option<&str>, config: Option<&str>) -> Result<(), LoggingError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = select_directive(flag, env.as_deref(), config);
    let filter = EnvFilter::try_new(&directive).map_err(|err| LoggingError::InvalidFilter {
        directive: directive.clone(),
        message: err.to_string(),
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|err| LoggingError::SubscriberInit(err.to_string()))
}
