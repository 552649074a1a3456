//! Log output for report runs.
//!
//! Logs go to stderr so `--format json` keeps stdout parseable.

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::{LevelFilter, ParseError};
use tracing_subscriber::EnvFilter;

/// Target prefix shared by the engine and the command-line front end.
const ENGINE_TARGET: &str = "recruit_reports";

/// Level kept for dependencies when only a bare level is configured.
const DEPENDENCY_LEVEL: &str = "warn";

#[derive(Debug)]
pub enum TelemetryError {
    Filter { directives: String, source: ParseError },
    Install(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { directives, .. } => {
                write!(f, "invalid log directives '{directives}'")
            }
            TelemetryError::Install(err) => {
                write!(f, "failed to install report logger: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Install(err) => Some(&**err),
        }
    }
}

/// Expands a bare level such as `debug` so it applies to the engine only.
/// Anything else is taken as full filter directives.
pub fn scoped_directives(configured: &str) -> String {
    let configured = configured.trim();
    if configured.parse::<LevelFilter>().is_ok() {
        format!("{DEPENDENCY_LEVEL},{ENGINE_TARGET}={configured}")
    } else {
        configured.to_string()
    }
}

/// Non-blank `overrides` (normally `RUST_LOG`) replace the configured level.
pub fn log_filter(
    configured: &str,
    overrides: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    let directives = match overrides.map(str::trim).filter(|value| !value.is_empty()) {
        Some(overrides) => overrides.to_string(),
        None => scoped_directives(configured),
    };

    EnvFilter::try_new(&directives)
        .map_err(|source| TelemetryError::Filter { directives, source })
}

/// Installs the global compact subscriber on stderr.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let overrides = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(&config.log_level, overrides.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}
