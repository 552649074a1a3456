use super::common::*;
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use crate::reports::diagnostics::{DiagnosticKind, Diagnostics};
use crate::reports::domain::{CandidateStatus, EntityKind, Priority, ProfileStatus};
use crate::reports::normalize::{
    days_open, normalize_batch, normalize_candidate, normalize_client, normalize_profile,
    LanguageSkill, NormalizeError,
};

#[test]
fn profile_fields_resolve_through_aliases() {
    let raw = record(json!({
        "profile_id": "P-7",
        "title": "Data Engineer",
        "client": { "id": 4 },
        "client_name": "Northwind",
        "status": "In Progress",
        "priority": "normal",
        "created_at": "2025-06-10T12:00:00Z",
        "city": "Guadalajara",
        "location": { "state": "JAL" },
        "salary_range": { "min": 30000, "max": "45000", "currency": "MXN" },
        "position_description": "Own the batch pipelines.",
        "job_requirements": "SQL, Rust",
        "vacancies": "3",
        "modality": "hybrid",
        "supervisor": { "email": "lead@northwind.example" }
    }));
    let mut diagnostics = Diagnostics::new();

    let profile = normalize_profile(&raw, now(), &mut diagnostics).expect("profile normalizes");

    assert_eq!(profile.id, id("P-7"));
    assert_eq!(profile.title, "Data Engineer");
    assert_eq!(profile.client_id, Some(id("4")));
    assert_eq!(profile.client_name_hint.as_deref(), Some("Northwind"));
    assert_eq!(profile.status, ProfileStatus::InProgress);
    assert_eq!(profile.priority, Priority::Medium);
    assert_eq!(profile.days_open, Some(20));
    assert_eq!(profile.location.as_deref(), Some("Guadalajara, JAL"));

    let salary = profile.salary_range.expect("salary resolved");
    assert_eq!(salary.min, Some(30000.0));
    assert_eq!(salary.max, Some(45000.0));
    assert_eq!(salary.currency.as_deref(), Some("MXN"));
    assert_eq!(salary.period, None);

    assert_eq!(profile.description, "Own the batch pipelines.");
    assert_eq!(profile.requirements, "SQL, Rust");
    assert_eq!(profile.positions_available, 3);
    assert_eq!(profile.work_modality.as_deref(), Some("hybrid"));
    let supervisor = profile.supervisor.expect("supervisor resolved");
    assert_eq!(supervisor.email.as_deref(), Some("lead@northwind.example"));
    assert_eq!(supervisor.name, None);

    assert_eq!(diagnostics.count(DiagnosticKind::CoercionFailure), 0);
    assert_eq!(diagnostics.count(DiagnosticKind::InvalidEnumValue), 0);
}

#[test]
fn profile_defaults_apply_when_fields_are_missing() {
    let raw = record(json!({ "id": 1, "title": "   ", "status": null }));
    let mut diagnostics = Diagnostics::new();

    let profile = normalize_profile(&raw, now(), &mut diagnostics).expect("profile normalizes");

    assert_eq!(profile.title, "Untitled position");
    assert_eq!(profile.status, ProfileStatus::Draft);
    assert_eq!(profile.priority, Priority::Medium);
    assert_eq!(profile.positions_available, 1);
    assert_eq!(profile.days_open, None);
    assert_eq!(profile.client_id, None);
    assert!(profile.supervisor.is_none());
    assert!(profile.salary_range.is_none());
    assert_eq!(diagnostics.count(DiagnosticKind::FieldResolutionMiss), 7);
    assert!(diagnostics.entries().is_empty());
}

#[test]
fn missing_creation_date_and_client_are_counted_as_misses() {
    let raw = record(json!({ "id": 1, "position_title": "T", "status": "approved" }));
    let mut diagnostics = Diagnostics::new();

    let profile = normalize_profile(&raw, now(), &mut diagnostics).expect("profile normalizes");

    assert_eq!(profile.days_open, None);
    assert_eq!(profile.client_id, None);
    // description, requirements, positions_available, created_at, client_id
    assert_eq!(diagnostics.count(DiagnosticKind::FieldResolutionMiss), 5);
    assert_eq!(diagnostics.total(), 5);
}

#[test]
fn zero_or_negative_seat_counts_fall_back_to_one() {
    let mut diagnostics = Diagnostics::new();

    let zero = normalize_profile(
        &record(json!({ "id": 1, "vacancies": 0 })),
        now(),
        &mut diagnostics,
    )
    .expect("profile normalizes");
    let negative = normalize_profile(
        &record(json!({ "id": 2, "positions_available": "-2" })),
        now(),
        &mut diagnostics,
    )
    .expect("profile normalizes");
    let fractional = normalize_profile(
        &record(json!({ "id": 3, "positions_available": 2.6 })),
        now(),
        &mut diagnostics,
    )
    .expect("profile normalizes");

    assert_eq!(zero.positions_available, 1);
    assert_eq!(negative.positions_available, 1);
    assert_eq!(fractional.positions_available, 3);
    assert_eq!(diagnostics.count(DiagnosticKind::CoercionFailure), 2);
}

#[test]
fn unknown_status_is_preserved_and_flagged() {
    let raw = record(json!({ "id": 5, "status": "On Hold", "priority": "asap" }));
    let mut diagnostics = Diagnostics::new();

    let profile = normalize_profile(&raw, now(), &mut diagnostics).expect("profile normalizes");

    assert_eq!(profile.status, ProfileStatus::Unknown);
    assert_eq!(profile.status_raw, "On Hold");
    assert_eq!(profile.priority, Priority::Medium);
    assert_eq!(diagnostics.count(DiagnosticKind::InvalidEnumValue), 2);
    assert!(diagnostics
        .entries()
        .iter()
        .all(|entry| entry.record_id == Some(id("5"))));
}

#[test]
fn unparsable_creation_date_leaves_days_open_empty() {
    let raw = record(json!({ "id": 9, "created_at": "31/02/2025" }));
    let mut diagnostics = Diagnostics::new();

    let profile = normalize_profile(&raw, now(), &mut diagnostics).expect("profile normalizes");

    assert_eq!(profile.created_at, None);
    assert_eq!(profile.days_open, None);
    assert_eq!(diagnostics.count(DiagnosticKind::CoercionFailure), 1);
}

#[test]
fn days_open_floors_and_never_goes_negative() {
    let created = Utc
        .with_ymd_and_hms(2025, 6, 1, 18, 0, 0)
        .single()
        .expect("valid");
    assert_eq!(days_open(created, now()), 28);
    assert_eq!(days_open(now() + Duration::days(3), now()), 0);
    assert_eq!(days_open(now(), now()), 0);
}

#[test]
fn record_without_id_is_rejected() {
    let raw = record(json!({ "position_title": "Ghost", "id": "  " }));
    let mut diagnostics = Diagnostics::new();

    let err = normalize_profile(&raw, now(), &mut diagnostics).expect_err("id is required");

    assert_eq!(
        err,
        NormalizeError::MissingId {
            entity: EntityKind::Profile
        }
    );
}

#[test]
fn client_contact_and_flags_resolve() {
    let raw = record(json!({
        "client_id": 77,
        "business_name": "Helios Energy",
        "contact": { "name": "Marco Diaz", "email": "marco@helios.example" },
        "phone": "+52 55 0000 0000",
        "url": "https://helios.example",
        "active": 0
    }));
    let mut diagnostics = Diagnostics::new();

    let client = normalize_client(&raw, &mut diagnostics).expect("client normalizes");

    assert_eq!(client.id, id("77"));
    assert_eq!(client.company_name, "Helios Energy");
    assert_eq!(client.contact.name.as_deref(), Some("Marco Diaz"));
    assert_eq!(client.contact.email.as_deref(), Some("marco@helios.example"));
    assert_eq!(client.contact.phone.as_deref(), Some("+52 55 0000 0000"));
    assert_eq!(client.website.as_deref(), Some("https://helios.example"));
    assert!(!client.active);
}

#[test]
fn candidate_name_falls_back_to_first_and_last() {
    let raw = record(json!({
        "candidate_id": 3,
        "first_name": "Ana",
        "last_name": " Lopez ",
        "application_status": "Interview",
        "profile": { "id": "12" },
        "technical_skills": "Rust, SQL , Rust",
        "languages": [
            "Spanish",
            { "language": "English", "proficiency": "C1" },
            { "level": "B2" },
            42
        ]
    }));
    let mut diagnostics = Diagnostics::new();

    let candidate = normalize_candidate(&raw, &mut diagnostics).expect("candidate normalizes");

    assert_eq!(candidate.full_name, "Ana Lopez");
    assert_eq!(candidate.status, CandidateStatus::Interviewing);
    assert_eq!(candidate.profile_id, Some(id("12")));
    assert_eq!(
        candidate.skills.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["Rust", "SQL"]
    );
    assert_eq!(
        candidate.languages,
        vec![
            LanguageSkill {
                name: "Spanish".to_string(),
                level: None
            },
            LanguageSkill {
                name: "English".to_string(),
                level: Some("C1".to_string())
            },
        ]
    );
    assert_eq!(candidate.matching_score, None);
}

#[test]
fn candidate_without_any_name_gets_placeholder() {
    let raw = record(json!({ "id": 8 }));
    let mut diagnostics = Diagnostics::new();

    let candidate = normalize_candidate(&raw, &mut diagnostics).expect("candidate normalizes");

    assert_eq!(candidate.full_name, "Unnamed candidate");
    assert_eq!(candidate.status, CandidateStatus::New);
    assert_eq!(candidate.profile_id, None);
    assert!(candidate.skills.is_empty());
    assert!(candidate.languages.is_empty());
    // full_name, status, profile_id
    assert_eq!(diagnostics.count(DiagnosticKind::FieldResolutionMiss), 3);
}

#[test]
fn out_of_range_scores_are_clamped() {
    let mut diagnostics = Diagnostics::new();

    let high = normalize_candidate(
        &record(json!({ "id": 1, "matching_score": 140 })),
        &mut diagnostics,
    )
    .expect("candidate normalizes");
    let low = normalize_candidate(
        &record(json!({ "id": 2, "match_score": "-5" })),
        &mut diagnostics,
    )
    .expect("candidate normalizes");

    assert_eq!(high.matching_score, Some(100.0));
    assert_eq!(low.matching_score, Some(0.0));
    assert_eq!(diagnostics.count(DiagnosticKind::CoercionFailure), 2);
}

#[test]
fn batch_drops_malformed_entries_and_keeps_the_rest() {
    let profiles = collection(json!([
        { "id": 1, "position_title": "Kept" },
        "not an object",
        { "position_title": "No id" }
    ]));
    let clients = collection(json!([]));
    let candidates = collection(json!({ "results": [{ "id": "c-1" }] }));

    let batch = normalize_batch(&profiles, &clients, &candidates, now());

    assert_eq!(batch.as_of, now());
    assert_eq!(batch.profiles.len(), 1);
    assert_eq!(batch.profiles[0].title, "Kept");
    assert_eq!(batch.candidates.len(), 1);
    assert!(batch.clients.is_empty());
    assert_eq!(batch.diagnostics.count(DiagnosticKind::MalformedRecord), 2);
}

#[test]
fn normalization_is_deterministic_for_a_fixed_clock() {
    let raw = record(scenario_profiles()["results"][0].clone());
    let mut first_sink = Diagnostics::new();
    let mut second_sink = Diagnostics::new();

    let first = normalize_profile(&raw, now(), &mut first_sink).expect("normalizes");
    let second = normalize_profile(&raw, now(), &mut second_sink).expect("normalizes");

    assert_eq!(first, second);
    assert_eq!(first_sink.total(), second_sink.total());
}
