//! Statistics Aggregator: funnel counts, client rollups, and summary KPIs,
//! always recomputed from a slice of the linked graph.

use super::domain::{CandidateStatus, EntityId, FunnelBucket, Priority, ProfileStatus};
use super::linker::LinkedGraph;
use super::normalize::{CandidateEntity, ClientEntity, ProfileEntity};
use crate::config::ReportingConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Which part of the graph a computation covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Client(EntityId),
    Profile(EntityId),
}

/// Borrowed subset of a [`LinkedGraph`], each list in input order.
#[derive(Debug, Clone, Default)]
pub struct GraphSlice<'g> {
    pub profiles: Vec<&'g ProfileEntity>,
    pub clients: Vec<&'g ClientEntity>,
    pub candidates: Vec<&'g CandidateEntity>,
}

impl Scope {
    /// Resolves the scope against `graph`. An id that does not exist yields an
    /// empty slice.
    pub fn slice<'g>(&self, graph: &'g LinkedGraph) -> GraphSlice<'g> {
        match self {
            Scope::Global => GraphSlice {
                profiles: graph.profiles().iter().collect(),
                clients: graph.clients().iter().collect(),
                candidates: graph.candidates().iter().collect(),
            },
            Scope::Client(client_id) => {
                let Some(client) = graph.client(client_id) else {
                    return GraphSlice::default();
                };
                let profiles: Vec<_> = graph.profiles_for_client(client_id).collect();
                let profile_ids: HashSet<&EntityId> =
                    profiles.iter().map(|profile| &profile.id).collect();
                let candidates = graph
                    .candidates()
                    .iter()
                    .filter(|candidate| {
                        candidate
                            .profile_id
                            .as_ref()
                            .is_some_and(|id| profile_ids.contains(id))
                    })
                    .collect();

                GraphSlice {
                    profiles,
                    clients: vec![client],
                    candidates,
                }
            }
            Scope::Profile(profile_id) => {
                let Some(profile) = graph.profile(profile_id) else {
                    return GraphSlice::default();
                };

                GraphSlice {
                    profiles: vec![profile],
                    clients: graph.client_of(profile).into_iter().collect(),
                    candidates: graph.candidates_for_profile(profile_id).collect(),
                }
            }
        }
    }
}

/// Candidates bucketed by funnel stage. `unbucketed` holds withdrawn and
/// unknown statuses so that buckets plus `unbucketed` always equal `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FunnelCounts {
    pub applied: usize,
    pub screening: usize,
    pub shortlisted: usize,
    pub interviewing: usize,
    pub offered: usize,
    pub hired: usize,
    pub rejected: usize,
    pub unbucketed: usize,
    pub total: usize,
}

impl FunnelCounts {
    pub fn record(&mut self, status: CandidateStatus) {
        self.total += 1;
        match FunnelBucket::for_status(status) {
            Some(FunnelBucket::Applied) => self.applied += 1,
            Some(FunnelBucket::Screening) => self.screening += 1,
            Some(FunnelBucket::Shortlisted) => self.shortlisted += 1,
            Some(FunnelBucket::Interviewing) => self.interviewing += 1,
            Some(FunnelBucket::Offered) => self.offered += 1,
            Some(FunnelBucket::Hired) => self.hired += 1,
            Some(FunnelBucket::Rejected) => self.rejected += 1,
            None => self.unbucketed += 1,
        }
    }

    pub fn get(&self, bucket: FunnelBucket) -> usize {
        match bucket {
            FunnelBucket::Applied => self.applied,
            FunnelBucket::Screening => self.screening,
            FunnelBucket::Shortlisted => self.shortlisted,
            FunnelBucket::Interviewing => self.interviewing,
            FunnelBucket::Offered => self.offered,
            FunnelBucket::Hired => self.hired,
            FunnelBucket::Rejected => self.rejected,
        }
    }

    pub fn bucketed(&self) -> usize {
        FunnelBucket::ordered()
            .into_iter()
            .map(|bucket| self.get(bucket))
            .sum()
    }
}

impl<'c> FromIterator<&'c CandidateEntity> for FunnelCounts {
    fn from_iter<I: IntoIterator<Item = &'c CandidateEntity>>(iter: I) -> Self {
        let mut funnel = Self::default();
        for candidate in iter {
            funnel.record(candidate.status);
        }
        funnel
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStats {
    pub profile_id: EntityId,
    pub total_candidates: usize,
    pub funnel: FunnelCounts,
    pub shortlisted_count: usize,
    pub interviewed_count: usize,
    pub avg_match_percentage: Option<f64>,
    pub top_match_percentage: Option<f64>,
}

/// Compact per-profile line inside a client rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientProfileEntry {
    pub id: EntityId,
    pub title: String,
    pub status: ProfileStatus,
    pub status_label: &'static str,
    pub priority: Priority,
    pub candidates_count: usize,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRollup {
    pub client_id: EntityId,
    pub total_profiles: usize,
    pub active_profiles: usize,
    pub completed_profiles: usize,
    /// `round(completed / total * 100)`, `0` when the client has no profiles.
    pub success_rate: u32,
    pub total_candidates: usize,
    pub total_candidates_hired: usize,
    pub profiles_by_status: BTreeMap<&'static str, usize>,
    pub avg_days_open: Option<f64>,
    pub profiles: Vec<ClientProfileEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_profiles: usize,
    pub total_clients: usize,
    pub total_candidates: usize,
    pub profiles_by_status: BTreeMap<&'static str, usize>,
    pub candidates_by_status: BTreeMap<&'static str, usize>,
    pub funnel: FunnelCounts,
    pub active_profiles: usize,
    pub profiles_completed: usize,
    pub completion_rate: u32,
    pub active_candidates: usize,
    pub candidates_hired: usize,
    /// Mean over candidates that carry a score; unscored candidates are
    /// excluded, not counted as zero.
    pub avg_match_percentage: Option<f64>,
    pub avg_days_open: Option<f64>,
    pub unassigned_candidates: usize,
    pub profiles_without_client: usize,
}

/// Fresh statistics for one scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedStats {
    pub summary: SummaryStats,
    pub profiles: Vec<ProfileStats>,
    pub clients: Vec<ClientRollup>,
}

impl AggregatedStats {
    pub fn profile(&self, id: &EntityId) -> Option<&ProfileStats> {
        self.profiles.iter().find(|stats| &stats.profile_id == id)
    }

    pub fn client(&self, id: &EntityId) -> Option<&ClientRollup> {
        self.clients.iter().find(|rollup| &rollup.client_id == id)
    }
}

pub fn aggregate(graph: &LinkedGraph, scope: &Scope, config: &ReportingConfig) -> AggregatedStats {
    aggregate_slice(graph, &scope.slice(graph), config)
}

pub fn aggregate_slice(
    graph: &LinkedGraph,
    slice: &GraphSlice<'_>,
    config: &ReportingConfig,
) -> AggregatedStats {
    let profiles = slice
        .profiles
        .iter()
        .map(|profile| profile_stats(graph, profile))
        .collect();

    let mut by_client: HashMap<&EntityId, Vec<&ProfileEntity>> = HashMap::new();
    for profile in slice.profiles.iter().copied() {
        if let Some(client_id) = profile.client_id.as_ref() {
            by_client.entry(client_id).or_default().push(profile);
        }
    }

    let clients = slice
        .clients
        .iter()
        .map(|client| {
            let client_profiles = by_client
                .get(&client.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            client_rollup(graph, client, client_profiles, config)
        })
        .collect();

    AggregatedStats {
        summary: summary(slice, config),
        profiles,
        clients,
    }
}

pub fn profile_stats(graph: &LinkedGraph, profile: &ProfileEntity) -> ProfileStats {
    let candidates: Vec<&CandidateEntity> = graph.candidates_for_profile(&profile.id).collect();
    let funnel: FunnelCounts = candidates.iter().copied().collect();
    let scores: Vec<f64> = candidates
        .iter()
        .filter_map(|candidate| candidate.matching_score)
        .collect();

    ProfileStats {
        profile_id: profile.id.clone(),
        total_candidates: candidates.len(),
        funnel,
        shortlisted_count: funnel.shortlisted,
        interviewed_count: funnel.interviewing,
        avg_match_percentage: mean(scores.iter().copied()),
        top_match_percentage: scores.iter().copied().reduce(f64::max),
    }
}

fn client_rollup(
    graph: &LinkedGraph,
    client: &ClientEntity,
    profiles: &[&ProfileEntity],
    config: &ReportingConfig,
) -> ClientRollup {
    let completed_profiles = profiles
        .iter()
        .filter(|profile| profile.status == ProfileStatus::Completed)
        .count();

    let mut total_candidates = 0;
    let mut total_candidates_hired = 0;
    let entries: Vec<ClientProfileEntry> = profiles
        .iter()
        .map(|profile| {
            let candidates = graph.candidate_ids_for_profile(&profile.id).len();
            total_candidates += candidates;
            total_candidates_hired += graph
                .candidates_for_profile(&profile.id)
                .filter(|candidate| candidate.status == CandidateStatus::Hired)
                .count();

            ClientProfileEntry {
                id: profile.id.clone(),
                title: profile.title.clone(),
                status: profile.status,
                status_label: profile.status.label(),
                priority: profile.priority,
                candidates_count: candidates,
                created_at: profile.created_at,
            }
        })
        .collect();

    ClientRollup {
        client_id: client.id.clone(),
        total_profiles: profiles.len(),
        active_profiles: profiles
            .iter()
            .filter(|profile| config.is_active_profile(profile.status))
            .count(),
        completed_profiles,
        success_rate: percentage(completed_profiles, profiles.len()),
        total_candidates,
        total_candidates_hired,
        profiles_by_status: count_by(profiles.iter().map(|profile| profile.status.key())),
        avg_days_open: mean(
            profiles
                .iter()
                .filter_map(|profile| profile.days_open)
                .map(f64::from),
        ),
        profiles: entries,
    }
}

fn summary(slice: &GraphSlice<'_>, config: &ReportingConfig) -> SummaryStats {
    let profiles_completed = slice
        .profiles
        .iter()
        .filter(|profile| profile.status == ProfileStatus::Completed)
        .count();

    SummaryStats {
        total_profiles: slice.profiles.len(),
        total_clients: slice.clients.len(),
        total_candidates: slice.candidates.len(),
        profiles_by_status: count_by(slice.profiles.iter().map(|profile| profile.status.key())),
        candidates_by_status: count_by(
            slice
                .candidates
                .iter()
                .map(|candidate| candidate.status.key()),
        ),
        funnel: slice.candidates.iter().copied().collect(),
        active_profiles: slice
            .profiles
            .iter()
            .filter(|profile| config.is_active_profile(profile.status))
            .count(),
        profiles_completed,
        completion_rate: percentage(profiles_completed, slice.profiles.len()),
        active_candidates: slice
            .candidates
            .iter()
            .filter(|candidate| candidate.status.is_active())
            .count(),
        candidates_hired: slice
            .candidates
            .iter()
            .filter(|candidate| candidate.status == CandidateStatus::Hired)
            .count(),
        avg_match_percentage: mean(
            slice
                .candidates
                .iter()
                .filter_map(|candidate| candidate.matching_score),
        ),
        avg_days_open: mean(
            slice
                .profiles
                .iter()
                .filter_map(|profile| profile.days_open)
                .map(f64::from),
        ),
        unassigned_candidates: slice
            .candidates
            .iter()
            .filter(|candidate| candidate.profile_id.is_none())
            .count(),
        profiles_without_client: slice
            .profiles
            .iter()
            .filter(|profile| profile.client_id.is_none())
            .count(),
    }
}

fn count_by(keys: impl Iterator<Item = &'static str>) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Whole-number percentage with a zero denominator mapped to `0`.
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// Arithmetic mean rounded to one decimal place; `None` without samples.
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        return None;
    }
    Some(((sum / count as f64) * 10.0).round() / 10.0)
}
