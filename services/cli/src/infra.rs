use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use recruit_reports::config::AppConfig;
use recruit_reports::error::AppError;
use recruit_reports::reports::resolver::parse_timestamp;
use recruit_reports::reports::{EntityId, ReportFilter};
use recruit_reports::telemetry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Filter and output options shared by every report-producing command.
#[derive(Args, Debug, Default)]
pub(crate) struct ViewArgs {
    /// Restrict the report to one client id
    #[arg(long, conflicts_with = "profile")]
    pub(crate) client: Option<String>,
    /// Restrict the report to one profile id
    #[arg(long)]
    pub(crate) profile: Option<String>,
    /// Evaluation instant (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_as_of)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

impl ViewArgs {
    pub(crate) fn filter(&self) -> ReportFilter {
        match (&self.client, &self.profile) {
            (Some(client), _) => ReportFilter::Client(EntityId::new(client.trim())),
            (None, Some(profile)) => ReportFilter::Profile(EntityId::new(profile.trim())),
            (None, None) => ReportFilter::None,
        }
    }

    pub(crate) fn as_of(&self) -> DateTime<Utc> {
        self.as_of.unwrap_or_else(Utc::now)
    }
}

pub(crate) fn parse_as_of(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as an RFC 3339 timestamp or YYYY-MM-DD"))
}

/// Loads configuration and installs logging; every command starts here.
pub(crate) fn bootstrap() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}
