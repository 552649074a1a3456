use super::alerts::AttentionAlert;
use super::diagnostics::DiagnosticSummary;
use super::domain::{CandidateStatus, EntityId, FunnelBucket, ProfileStatus};
use super::normalize::{CandidateEntity, ClientEntity, ProfileEntity};
use super::stats::{ClientRollup, ProfileStats, Scope, SummaryStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNRESOLVED_CLIENT_LABEL: &str = "N/A";
pub const UNASSIGNED_PROFILE_LABEL: &str = "Unassigned";

/// Restricts a report to one client or one profile. The variants are
/// mutually exclusive by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ReportFilter {
    #[default]
    None,
    Client(EntityId),
    Profile(EntityId),
}

impl ReportFilter {
    pub fn scope(&self) -> Scope {
        match self {
            ReportFilter::None => Scope::Global,
            ReportFilter::Client(id) => Scope::Client(id.clone()),
            ReportFilter::Profile(id) => Scope::Profile(id.clone()),
        }
    }
}

impl fmt::Display for ReportFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFilter::None => f.write_str("all"),
            ReportFilter::Client(id) => write!(f, "client {id}"),
            ReportFilter::Profile(id) => write!(f, "profile {id}"),
        }
    }
}

/// Display label that falls back to the upstream spelling for statuses the
/// engine does not recognize.
pub(crate) fn profile_status_label(status: ProfileStatus, raw: &str) -> String {
    match status {
        ProfileStatus::Unknown => raw.to_string(),
        known => known.label().to_string(),
    }
}

pub(crate) fn candidate_status_label(status: CandidateStatus, raw: &str) -> String {
    match status {
        CandidateStatus::Unknown => raw.to_string(),
        known => known.label().to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: ProfileEntity,
    pub client_name: String,
    pub status_label: String,
    pub priority_label: &'static str,
    pub stats: ProfileStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientView {
    #[serde(flatten)]
    pub client: ClientEntity,
    pub stats: ClientRollup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateView {
    #[serde(flatten)]
    pub candidate: CandidateEntity,
    pub status_label: String,
    pub funnel_bucket: Option<FunnelBucket>,
    pub profile_title: String,
    pub client_name: String,
    pub unassigned: bool,
}

/// Complete output of one report request. Plain data: presentation layers
/// read it and never call back into the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedView {
    pub generated_at: DateTime<Utc>,
    pub filter: ReportFilter,
    pub summary: SummaryStats,
    pub profiles: Vec<ProfileView>,
    pub clients: Vec<ClientView>,
    pub candidates: Vec<CandidateView>,
    pub alerts: Vec<AttentionAlert>,
    /// Covers the whole request, whatever the filter. Dropped records carry no
    /// id, so they cannot be attributed to a client or profile slice.
    pub data_quality: DiagnosticSummary,
    pub alias_table_version: u32,
}

impl ConsolidatedView {
    pub fn profile(&self, id: &EntityId) -> Option<&ProfileView> {
        self.profiles.iter().find(|view| &view.profile.id == id)
    }

    pub fn client(&self, id: &EntityId) -> Option<&ClientView> {
        self.clients.iter().find(|view| &view.client.id == id)
    }

    pub fn candidate(&self, id: &EntityId) -> Option<&CandidateView> {
        self.candidates.iter().find(|view| &view.candidate.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty() && self.clients.is_empty() && self.candidates.is_empty()
    }
}
