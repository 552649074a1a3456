use super::common::*;
use serde_json::json;
use std::collections::HashSet;

use crate::config::ReportingConfig;
use crate::reports::alerts::{AlertKind, AlertLevel};
use crate::reports::diagnostics::DiagnosticKind;
use crate::reports::domain::FunnelBucket;
use crate::reports::normalize::ALIAS_TABLE_VERSION;
use crate::reports::projector::project;
use crate::reports::views::ReportFilter;

#[test]
fn unfiltered_view_is_the_whole_graph() {
    let view = scenario_view(ReportFilter::None);

    assert_eq!(view.generated_at, now());
    assert_eq!(view.profiles.len(), 5);
    assert_eq!(view.clients.len(), 3);
    assert_eq!(view.candidates.len(), 10);
    assert_eq!(view.alias_table_version, ALIAS_TABLE_VERSION);

    let warehouse = view.profile(&id("10")).expect("profile 10");
    assert_eq!(warehouse.client_name, "Acme Logistics");
    assert_eq!(warehouse.status_label, "In Progress");
    assert_eq!(warehouse.priority_label, "High");
    assert_eq!(warehouse.stats.total_candidates, 3);
    assert_eq!(warehouse.stats.shortlisted_count, 1);
    assert_eq!(warehouse.stats.top_match_percentage, Some(90.0));

    let elena = view.candidate(&id("103")).expect("candidate 103");
    assert_eq!(elena.profile_title, "Warehouse Supervisor");
    assert_eq!(elena.client_name, "Acme Logistics");
    assert_eq!(elena.funnel_bucket, Some(FunnelBucket::Hired));
    assert!(!elena.unassigned);
}

#[test]
fn client_filter_returns_exactly_its_profiles_and_candidates() {
    let view = scenario_view(ReportFilter::Client(id("2")));

    let profile_ids: HashSet<_> = view
        .profiles
        .iter()
        .map(|profile| profile.profile.id.clone())
        .collect();
    assert_eq!(profile_ids, HashSet::from([id("20"), id("21")]));
    assert!(view
        .profiles
        .iter()
        .all(|profile| profile.profile.client_id == Some(id("2"))));

    assert_eq!(view.clients.len(), 1);
    assert_eq!(view.clients[0].client.company_name, "Borealis Foods");
    assert_eq!(view.candidates.len(), 5);
    assert!(view.candidates.iter().all(|candidate| {
        candidate
            .candidate
            .profile_id
            .as_ref()
            .is_some_and(|profile_id| profile_ids.contains(profile_id))
    }));

    assert_eq!(view.summary.total_profiles, 2);
    assert_eq!(view.summary.total_candidates, 5);
    assert_eq!(view.summary.avg_match_percentage, Some(60.0));
}

#[test]
fn profile_filter_includes_its_client_and_candidates() {
    let view = scenario_view(ReportFilter::Profile(id("11")));

    assert_eq!(view.profiles.len(), 1);
    assert_eq!(view.clients.len(), 1);
    assert_eq!(view.clients[0].client.id, id("1"));
    assert_eq!(view.candidates.len(), 2);
    assert_eq!(view.summary.candidates_hired, 1);
    assert_eq!(view.summary.avg_match_percentage, Some(85.0));
}

#[test]
fn client_without_candidates_projects_zeroed_stats() {
    let view = scenario_view(ReportFilter::Client(id("3")));

    assert_eq!(view.profiles.len(), 1);
    assert!(view.candidates.is_empty());
    assert_eq!(view.clients[0].stats.success_rate, 0);
    assert_eq!(view.summary.avg_match_percentage, None);
    assert_eq!(view.summary.candidates_hired, 0);
}

#[test]
fn broken_references_render_with_placeholders() {
    let graph = graph_from(
        json!([
            { "id": 1, "position_title": "Orphan", "client_id": 404 },
            { "id": 2, "position_title": "Embedded name", "client_name": "Walk-in Co" }
        ]),
        json!([{ "id": 5, "company_name": "Real Co" }]),
        json!([
            { "id": "x", "full_name": "Lost Soul", "profile_id": 999, "status": "Pending Docs" }
        ]),
    );
    let view = project(&graph, &ReportFilter::None, &ReportingConfig::default());

    let orphan = view.profile(&id("1")).expect("orphan kept");
    assert_eq!(orphan.client_name, "N/A");
    assert_eq!(orphan.profile.client_id, None);
    assert_eq!(view.profile(&id("2")).expect("kept").client_name, "Walk-in Co");

    let client = view.client(&id("5")).expect("client kept");
    assert_eq!(client.stats.total_profiles, 0);
    assert!(client.stats.profiles.is_empty());

    let lost = view.candidate(&id("x")).expect("candidate kept");
    assert!(lost.unassigned);
    assert_eq!(lost.profile_title, "Unassigned");
    assert_eq!(lost.client_name, "N/A");
    assert_eq!(lost.status_label, "Pending Docs");
    assert_eq!(lost.funnel_bucket, None);

    assert_eq!(view.summary.unassigned_candidates, 1);
    assert_eq!(view.summary.profiles_without_client, 2);
    assert_eq!(view.data_quality.count(DiagnosticKind::DanglingReference), 2);
    assert_eq!(view.data_quality.count(DiagnosticKind::InvalidEnumValue), 1);
}

#[test]
fn data_quality_covers_the_whole_request_under_any_filter() {
    let graph = graph_from(
        json!([
            { "id": 1, "position_title": "Picker", "client_id": 5 },
            { "id": 2, "position_title": "Orphan", "client_id": 404 }
        ]),
        json!([{ "id": 5, "company_name": "Acme" }]),
        json!([{ "id": "x", "full_name": "Lost Soul", "profile_id": 999 }]),
    );
    let config = ReportingConfig::default();

    let unfiltered = project(&graph, &ReportFilter::None, &config);
    let by_client = project(&graph, &ReportFilter::Client(id("5")), &config);

    assert_eq!(by_client.profiles.len(), 1);
    assert!(by_client.candidates.is_empty());
    assert_eq!(by_client.data_quality, unfiltered.data_quality);
    assert_eq!(
        by_client.data_quality.count(DiagnosticKind::DanglingReference),
        2
    );
    assert!(by_client
        .data_quality
        .warnings
        .iter()
        .any(|warning| warning.record_id == Some(id("2"))));
}

#[test]
fn projection_is_idempotent() {
    let graph = scenario_graph();
    let config = ReportingConfig::default();

    for filter in [
        ReportFilter::None,
        ReportFilter::Client(id("1")),
        ReportFilter::Profile(id("21")),
    ] {
        let first = project(&graph, &filter, &config);
        let second = project(&graph, &filter, &config);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_value(&first).expect("serializes"),
            serde_json::to_value(&second).expect("serializes")
        );
    }

    assert_eq!(
        scenario_view(ReportFilter::None),
        scenario_view(ReportFilter::None)
    );
}

#[test]
fn alerts_surface_scenario_attention_points() {
    let view = scenario_view(ReportFilter::None);

    let kinds: Vec<_> = view.alerts.iter().map(|alert| alert.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AlertKind::StaleProfiles,
            AlertKind::PendingApproval,
            AlertKind::ProfilesWithoutCandidates,
            AlertKind::ProfilesWithoutSupervisor,
        ]
    );

    let stale = &view.alerts[0];
    assert_eq!(stale.level, AlertLevel::Urgent);
    assert_eq!(stale.entity_ids, vec![id("30")]);

    let unsupervised = &view.alerts[3];
    assert_eq!(unsupervised.level, AlertLevel::Info);
    assert_eq!(unsupervised.count, 2);
    assert_eq!(unsupervised.entity_ids, vec![id("20"), id("30")]);
}

#[test]
fn alerts_follow_the_filter_scope() {
    let view = scenario_view(ReportFilter::Client(id("1")));
    assert!(view.alerts.is_empty());
}

#[test]
fn view_serializes_flat_entities_with_attached_stats() {
    let view = scenario_view(ReportFilter::Profile(id("10")));
    let value = serde_json::to_value(&view).expect("serializes");

    assert_eq!(value["filter"], json!({ "kind": "profile", "id": "10" }));
    assert_eq!(value["profiles"][0]["title"], json!("Warehouse Supervisor"));
    assert_eq!(value["profiles"][0]["client_name"], json!("Acme Logistics"));
    assert_eq!(value["profiles"][0]["stats"]["funnel"]["applied"], json!(1));
    assert_eq!(value["clients"][0]["company_name"], json!("Acme Logistics"));
    assert_eq!(value["candidates"][1]["status"], json!("shortlisted"));
    assert_eq!(value["summary"]["candidates_by_status"]["hired"], json!(1));
}
