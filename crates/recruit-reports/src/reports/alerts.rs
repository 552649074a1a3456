use super::domain::{EntityId, ProfileStatus};
use super::linker::LinkedGraph;
use super::stats::GraphSlice;
use crate::config::ReportingConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Urgent,
    Important,
    Info,
}

impl AlertLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Important => "Important",
            Self::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    StaleProfiles,
    PendingApproval,
    ProfilesWithoutCandidates,
    UnassignedCandidates,
    ProfilesWithoutClient,
    ProfilesWithoutSupervisor,
}

impl AlertKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::StaleProfiles,
            Self::PendingApproval,
            Self::ProfilesWithoutCandidates,
            Self::UnassignedCandidates,
            Self::ProfilesWithoutClient,
            Self::ProfilesWithoutSupervisor,
        ]
    }

    pub const fn level(self) -> AlertLevel {
        match self {
            Self::StaleProfiles => AlertLevel::Urgent,
            Self::PendingApproval
            | Self::ProfilesWithoutCandidates
            | Self::UnassignedCandidates => AlertLevel::Important,
            Self::ProfilesWithoutClient | Self::ProfilesWithoutSupervisor => AlertLevel::Info,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::StaleProfiles => "Stale open profiles",
            Self::PendingApproval => "Profiles pending approval",
            Self::ProfilesWithoutCandidates => "Active profiles without candidates",
            Self::UnassignedCandidates => "Unassigned candidates",
            Self::ProfilesWithoutClient => "Profiles without a client",
            Self::ProfilesWithoutSupervisor => "Profiles without a supervisor",
        }
    }
}

/// One line of the attention panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttentionAlert {
    pub kind: AlertKind,
    pub level: AlertLevel,
    pub level_label: &'static str,
    pub title: &'static str,
    pub description: String,
    pub count: usize,
    pub entity_ids: Vec<EntityId>,
}

/// Evaluates every alert rule over `slice`, urgent first. Rules that match
/// nothing are left out.
pub fn attention_alerts(
    graph: &LinkedGraph,
    slice: &GraphSlice<'_>,
    config: &ReportingConfig,
) -> Vec<AttentionAlert> {
    let mut alerts: Vec<AttentionAlert> = AlertKind::ordered()
        .into_iter()
        .filter_map(|kind| {
            let entity_ids = matching_ids(kind, graph, slice, config);
            if entity_ids.is_empty() {
                return None;
            }

            Some(AttentionAlert {
                kind,
                level: kind.level(),
                level_label: kind.level().label(),
                title: kind.title(),
                description: describe(kind, entity_ids.len(), config),
                count: entity_ids.len(),
                entity_ids,
            })
        })
        .collect();

    alerts.sort_by_key(|alert| alert.level);
    alerts
}

fn matching_ids(
    kind: AlertKind,
    graph: &LinkedGraph,
    slice: &GraphSlice<'_>,
    config: &ReportingConfig,
) -> Vec<EntityId> {
    let profiles = slice.profiles.iter();
    match kind {
        AlertKind::StaleProfiles => profiles
            .filter(|profile| is_open(profile.status))
            .filter(|profile| {
                profile
                    .days_open
                    .is_some_and(|days| days > config.stale_profile_days)
            })
            .map(|profile| profile.id.clone())
            .collect(),
        AlertKind::PendingApproval => profiles
            .filter(|profile| profile.status == ProfileStatus::Pending)
            .map(|profile| profile.id.clone())
            .collect(),
        AlertKind::ProfilesWithoutCandidates => profiles
            .filter(|profile| config.is_active_profile(profile.status))
            .filter(|profile| graph.candidate_ids_for_profile(&profile.id).is_empty())
            .map(|profile| profile.id.clone())
            .collect(),
        AlertKind::UnassignedCandidates => slice
            .candidates
            .iter()
            .filter(|candidate| candidate.profile_id.is_none())
            .map(|candidate| candidate.id.clone())
            .collect(),
        AlertKind::ProfilesWithoutClient => profiles
            .filter(|profile| profile.client_id.is_none())
            .map(|profile| profile.id.clone())
            .collect(),
        AlertKind::ProfilesWithoutSupervisor => profiles
            .filter(|profile| is_open(profile.status))
            .filter(|profile| profile.supervisor.is_none())
            .map(|profile| profile.id.clone())
            .collect(),
    }
}

/// Profiles still in the pipeline. Unknown statuses are treated as closed.
fn is_open(status: ProfileStatus) -> bool {
    !matches!(
        status,
        ProfileStatus::Completed | ProfileStatus::Cancelled | ProfileStatus::Unknown
    )
}

fn describe(kind: AlertKind, count: usize, config: &ReportingConfig) -> String {
    let plural = if count == 1 { "" } else { "s" };
    match kind {
        AlertKind::StaleProfiles => format!(
            "{count} open profile{plural} older than {} days",
            config.stale_profile_days
        ),
        AlertKind::PendingApproval => {
            format!("{count} profile{plural} waiting for director review")
        }
        AlertKind::ProfilesWithoutCandidates => {
            format!("{count} active profile{plural} with no linked candidates")
        }
        AlertKind::UnassignedCandidates => {
            format!("{count} candidate{plural} not linked to any profile")
        }
        AlertKind::ProfilesWithoutClient => {
            format!("{count} profile{plural} with no resolved client")
        }
        AlertKind::ProfilesWithoutSupervisor => {
            format!("{count} open profile{plural} need a responsible supervisor")
        }
    }
}
