use crate::reports::ProfileStatus;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub reporting: ReportingConfig,
    pub sources: SourceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let data_dir = env::var("REPORT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let mut reporting = ReportingConfig::default();
        if let Ok(raw) = env::var("REPORT_ACTIVE_PROFILE_STATUSES") {
            reporting.active_profile_statuses = parse_statuses(&raw)?;
        }
        if let Ok(raw) = env::var("REPORT_STALE_PROFILE_DAYS") {
            reporting.stale_profile_days = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidStaleDays { value: raw })?;
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            reporting,
            sources: SourceConfig { data_dir },
        })
    }
}

fn parse_statuses(raw: &str) -> Result<Vec<ProfileStatus>, ConfigError> {
    let mut statuses = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let status = ProfileStatus::from_raw(entry);
        if status == ProfileStatus::Unknown {
            return Err(ConfigError::UnknownProfileStatus {
                value: entry.to_string(),
            });
        }
        if !statuses.contains(&status) {
            statuses.push(status);
        }
    }
    Ok(statuses)
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the file-backed record source looks for its feeds.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub data_dir: PathBuf,
}

/// Knobs the aggregation and alert stages read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingConfig {
    /// Profile statuses counted as "active" in rollups and summaries.
    pub active_profile_statuses: Vec<ProfileStatus>,
    /// Open profiles older than this many days raise a stale alert.
    pub stale_profile_days: u32,
}

impl ReportingConfig {
    /// `Unknown` is never active, whatever the configured set says.
    pub fn is_active_profile(&self, status: ProfileStatus) -> bool {
        status != ProfileStatus::Unknown && self.active_profile_statuses.contains(&status)
    }
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            active_profile_statuses: ProfileStatus::default_active().to_vec(),
            stale_profile_days: 30,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    UnknownProfileStatus { value: String },
    InvalidStaleDays { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownProfileStatus { value } => write!(
                f,
                "REPORT_ACTIVE_PROFILE_STATUSES contains unknown profile status '{value}'"
            ),
            ConfigError::InvalidStaleDays { value } => write!(
                f,
                "REPORT_STALE_PROFILE_DAYS must be a non-negative integer, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
