//! Filter/View Projector: restricts the linked graph to a filter and attaches
//! statistics recomputed for that restricted scope.

use super::alerts::attention_alerts;
use super::domain::FunnelBucket;
use super::linker::LinkedGraph;
use super::normalize::{CandidateEntity, ProfileEntity, ALIAS_TABLE_VERSION};
use super::stats::aggregate_slice;
use super::views::{
    candidate_status_label, profile_status_label, CandidateView, ClientView, ConsolidatedView,
    ProfileView, ReportFilter, UNASSIGNED_PROFILE_LABEL, UNRESOLVED_CLIENT_LABEL,
};
use crate::config::ReportingConfig;

pub fn project(
    graph: &LinkedGraph,
    filter: &ReportFilter,
    config: &ReportingConfig,
) -> ConsolidatedView {
    let slice = filter.scope().slice(graph);
    let stats = aggregate_slice(graph, &slice, config);

    let profiles = slice
        .profiles
        .iter()
        .zip(&stats.profiles)
        .map(|(profile, profile_stats)| ProfileView {
            profile: (*profile).clone(),
            client_name: client_name(graph, profile),
            status_label: profile_status_label(profile.status, &profile.status_raw),
            priority_label: profile.priority.label(),
            stats: profile_stats.clone(),
        })
        .collect();

    let clients = slice
        .clients
        .iter()
        .zip(&stats.clients)
        .map(|(client, rollup)| ClientView {
            client: (*client).clone(),
            stats: rollup.clone(),
        })
        .collect();

    let candidates = slice
        .candidates
        .iter()
        .map(|candidate| candidate_view(graph, candidate))
        .collect();

    ConsolidatedView {
        generated_at: graph.as_of(),
        filter: filter.clone(),
        alerts: attention_alerts(graph, &slice, config),
        summary: stats.summary,
        profiles,
        clients,
        candidates,
        data_quality: graph.diagnostics().summary(),
        alias_table_version: ALIAS_TABLE_VERSION,
    }
}

/// Resolved client name, then the name embedded in the profile feed, then
/// the fixed placeholder.
fn client_name(graph: &LinkedGraph, profile: &ProfileEntity) -> String {
    graph
        .client_of(profile)
        .map(|client| client.company_name.clone())
        .or_else(|| profile.client_name_hint.clone())
        .unwrap_or_else(|| UNRESOLVED_CLIENT_LABEL.to_string())
}

fn candidate_view(graph: &LinkedGraph, candidate: &CandidateEntity) -> CandidateView {
    let profile = graph.profile_of(candidate);

    CandidateView {
        candidate: candidate.clone(),
        status_label: candidate_status_label(candidate.status, &candidate.status_raw),
        funnel_bucket: FunnelBucket::for_status(candidate.status),
        profile_title: profile.map_or_else(
            || UNASSIGNED_PROFILE_LABEL.to_string(),
            |profile| profile.title.clone(),
        ),
        client_name: profile.map_or_else(
            || UNRESOLVED_CLIENT_LABEL.to_string(),
            |profile| client_name(graph, profile),
        ),
        unassigned: profile.is_none(),
    }
}
