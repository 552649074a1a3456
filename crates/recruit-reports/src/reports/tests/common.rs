use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::config::ReportingConfig;
use crate::reports::domain::EntityId;
use crate::reports::linker::{link, LinkedGraph};
use crate::reports::normalize::normalize_batch;
use crate::reports::projector::project;
use crate::reports::raw::{RawCollection, RawRecord};
use crate::reports::views::{ConsolidatedView, ReportFilter};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

pub(super) fn id(value: &str) -> EntityId {
    EntityId::from(value)
}

pub(super) fn record(value: Value) -> RawRecord {
    RawRecord::from_value(value).expect("fixture is a JSON object")
}

pub(super) fn collection(value: Value) -> RawCollection {
    RawCollection::from_json_value(value).expect("fixture is an array or results page")
}

/// Three clients spelled three different ways upstream.
pub(super) fn scenario_clients() -> Value {
    json!([
        {
            "id": 1,
            "company_name": "Acme Logistics",
            "industry": "Logistics",
            "contact_name": "Laura Mendez",
            "contact_email": "laura@acme.example",
            "created_at": "2024-11-02T09:00:00Z"
        },
        {
            "id": "2",
            "name": "Borealis Foods",
            "primary_contact_name": "Iker Sola",
            "primary_contact_phone": "+34 600 000 000",
            "is_active": "yes"
        },
        {
            "id": 3.0,
            "company_name": "Cobalt Health",
            "sector": "Healthcare",
            "is_active": false
        }
    ])
}

/// Five profiles: two for client 1, two for client 2, one for client 3.
pub(super) fn scenario_profiles() -> Value {
    json!({
        "count": 5,
        "results": [
            {
                "id": 10,
                "position_title": "Warehouse Supervisor",
                "client_id": 1,
                "status": "in_progress",
                "priority": "high",
                "created_at": "2025-06-01T00:00:00Z",
                "location_city": "Monterrey",
                "location_state": "NL",
                "salary_min": "18000",
                "salary_max": 22000,
                "salary_period": "monthly",
                "supervisor_name": "Ana Ruiz"
            },
            {
                "id": 11,
                "title": "Fleet Coordinator",
                "client": { "id": 1, "company_name": "Acme Logistics" },
                "status": "Completed",
                "created_at": "2025-04-01",
                "job_description": "Coordinate the regional fleet."
            },
            {
                "id": 20,
                "position_title": "Quality Analyst",
                "client": 2,
                "status": "pending",
                "priority": "urgent",
                "created_at": "2025-06-20T08:00:00Z"
            },
            {
                "id": 21,
                "position_title": "Plant Chemist",
                "client_id": "2",
                "status": "approved",
                "created_at": "not a date",
                "assigned_supervisor_name": "Marta Gil"
            },
            {
                "id": 30,
                "position_title": "Nurse Recruiter",
                "client_id": 3,
                "status": "approved",
                "priority": "low",
                "created_at": "2025-05-01T00:00:00Z"
            }
        ]
    })
}

/// Ten candidates: applied x3, shortlisted x2, interviewing x1, hired x2,
/// rejected x2. Nobody applied to profile 30.
pub(super) fn scenario_candidates() -> Value {
    json!([
        { "id": 101, "full_name": "Sofia Herrera", "profile_id": 10, "status": "applied", "matching_score": 80 },
        { "id": 102, "first_name": "Diego", "last_name": "Paz", "profile_id": 10, "status": "shortlisted", "matching_score": 90 },
        { "id": 103, "full_name": "Elena Cruz", "profile": 10, "status": "hired", "match_score": "70" },
        { "id": 104, "full_name": "Tomas Vidal", "profile_id": 11, "status": "hired", "matching_score": 85 },
        { "id": 105, "full_name": "Irene Soto", "profile_id": 11, "status": "rejected" },
        { "id": 106, "full_name": "Pablo Leon", "profile_id": 20, "status": "applied", "matching_score": 60 },
        { "id": 107, "full_name": "Lucia Mar", "profile_id": 20, "status": "interviewing", "match_percentage": "75%" },
        { "id": 108, "full_name": "Hugo Rey", "profile_id": "21", "status": "shortlisted", "matching_score": 65 },
        { "id": 109, "full_name": "Nora Gil", "profile_id": 21, "status": "rejected", "matching_score": 40 },
        { "id": 110, "full_name": "Raul Ibanez", "profile_id": 21, "status": "applied" }
    ])
}

pub(super) fn scenario_graph() -> LinkedGraph {
    link(normalize_batch(
        &collection(scenario_profiles()),
        &collection(scenario_clients()),
        &collection(scenario_candidates()),
        now(),
    ))
}

pub(super) fn graph_from(profiles: Value, clients: Value, candidates: Value) -> LinkedGraph {
    link(normalize_batch(
        &collection(profiles),
        &collection(clients),
        &collection(candidates),
        now(),
    ))
}

pub(super) fn scenario_view(filter: ReportFilter) -> ConsolidatedView {
    project(&scenario_graph(), &filter, &ReportingConfig::default())
}
