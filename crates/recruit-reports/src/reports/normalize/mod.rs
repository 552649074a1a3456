//! Raw record to canonical entity conversion.
//!
//! Every function here is pure over its inputs (record, `now`, and the
//! request's diagnostics sink): no I/O and no shared state, so tests pin `now`
//! to a fixed instant.

mod aliases;
mod entities;

pub use aliases::ALIAS_TABLE_VERSION;
pub use entities::{
    CandidateEntity, ClientEntity, ContactInfo, LanguageSkill, ProfileEntity, SalaryRange,
};

use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::domain::{CandidateStatus, EntityId, EntityKind, Priority, ProfileStatus};
use super::raw::{RawCollection, RawRecord};
use super::resolver::{resolve, RecordFields};
use chrono::{DateTime, Utc};
use serde_json::Value;

const UNTITLED_PROFILE: &str = "Untitled position";
const UNNAMED_CLIENT: &str = "Unnamed company";
const UNNAMED_CANDIDATE: &str = "Unnamed candidate";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("{entity} record has no resolvable id")]
    MissingId { entity: EntityKind },
}

/// Whole days elapsed since `created_at`, never negative.
pub fn days_open(created_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let days = (now - created_at).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

fn require_id(
    fields: &mut RecordFields<'_>,
    entity: EntityKind,
    keys: &[&str],
) -> Result<EntityId, NormalizeError> {
    let id = fields
        .id("id", keys)
        .ok_or(NormalizeError::MissingId { entity })?;
    fields.set_record_id(&id);
    Ok(id)
}

pub fn normalize_profile(
    raw: &RawRecord,
    now: DateTime<Utc>,
    diagnostics: &mut Diagnostics,
) -> Result<ProfileEntity, NormalizeError> {
    use aliases::profile as alias;

    let mut fields = RecordFields::new(raw, EntityKind::Profile, diagnostics);
    let id = require_id(&mut fields, EntityKind::Profile, alias::ID)?;

    let status_raw = fields.string_or("status", alias::STATUS, ProfileStatus::Draft.key());
    let status = ProfileStatus::from_raw(&status_raw);
    if status == ProfileStatus::Unknown {
        fields.note(
            DiagnosticKind::InvalidEnumValue,
            format!("unrecognized profile status `{status_raw}`"),
        );
    }

    let priority = match fields.string("priority", alias::PRIORITY) {
        Some(raw_priority) => Priority::from_raw(&raw_priority).unwrap_or_else(|| {
            fields.note(
                DiagnosticKind::InvalidEnumValue,
                format!("unrecognized priority `{raw_priority}`"),
            );
            Priority::default()
        }),
        None => Priority::default(),
    };

    let created_at = fields.timestamp("created_at", alias::CREATED_AT);
    let created_at = fields.expected("created_at", created_at);
    let updated_at = fields.timestamp("updated_at", alias::UPDATED_AT);

    let location = {
        let city = fields.string("location_city", alias::LOCATION_CITY);
        let state = fields.string("location_state", alias::LOCATION_STATE);
        match (city, state) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            (Some(single), None) | (None, Some(single)) => Some(single),
            (None, None) => fields.string("location", alias::LOCATION),
        }
    };

    let salary_min = fields.number("salary_min", alias::SALARY_MIN);
    let salary_max = fields.number("salary_max", alias::SALARY_MAX);
    let salary_range = if salary_min.is_some() || salary_max.is_some() {
        Some(SalaryRange {
            min: salary_min,
            max: salary_max,
            period: fields.string("salary_period", alias::SALARY_PERIOD),
            currency: fields.string("salary_currency", alias::SALARY_CURRENCY),
        })
    } else {
        None
    };

    let positions_available = positions_available(&mut fields);
    let client_id = fields.id("client_id", alias::CLIENT_ID);
    let client_id = fields.expected("client_id", client_id);

    let supervisor = ContactInfo {
        name: fields.string("supervisor_name", alias::SUPERVISOR_NAME),
        email: fields.string("supervisor_email", alias::SUPERVISOR_EMAIL),
        phone: None,
    };

    Ok(ProfileEntity {
        title: fields.string_or("title", alias::TITLE, UNTITLED_PROFILE),
        client_id,
        client_name_hint: fields.string("client_name", alias::CLIENT_NAME),
        status,
        status_raw,
        priority,
        created_at,
        updated_at,
        days_open: created_at.map(|created| days_open(created, now)),
        location,
        salary_range,
        description: fields.string_or("description", alias::DESCRIPTION, ""),
        requirements: fields.string_or("requirements", alias::REQUIREMENTS, ""),
        positions_available,
        work_modality: fields.string("work_modality", alias::WORK_MODALITY),
        supervisor: (!supervisor.is_empty()).then_some(supervisor),
        id,
    })
}

pub fn normalize_client(
    raw: &RawRecord,
    diagnostics: &mut Diagnostics,
) -> Result<ClientEntity, NormalizeError> {
    use aliases::client as alias;

    let mut fields = RecordFields::new(raw, EntityKind::Client, diagnostics);
    let id = require_id(&mut fields, EntityKind::Client, alias::ID)?;

    Ok(ClientEntity {
        company_name: fields.string_or("company_name", alias::COMPANY_NAME, UNNAMED_CLIENT),
        industry: fields.string("industry", alias::INDUSTRY),
        contact: ContactInfo {
            name: fields.string("contact_name", alias::CONTACT_NAME),
            email: fields.string("contact_email", alias::CONTACT_EMAIL),
            phone: fields.string("contact_phone", alias::CONTACT_PHONE),
        },
        website: fields.string("website", alias::WEBSITE),
        active: fields.boolean_or("active", alias::ACTIVE, true),
        created_at: fields.timestamp("created_at", alias::CREATED_AT),
        id,
    })
}

pub fn normalize_candidate(
    raw: &RawRecord,
    diagnostics: &mut Diagnostics,
) -> Result<CandidateEntity, NormalizeError> {
    use aliases::candidate as alias;

    let mut fields = RecordFields::new(raw, EntityKind::Candidate, diagnostics);
    let id = require_id(&mut fields, EntityKind::Candidate, alias::ID)?;

    let full_name = match fields.string("full_name", alias::FULL_NAME) {
        Some(name) => name,
        None => {
            let first = fields.string("first_name", alias::FIRST_NAME);
            let last = fields.string("last_name", alias::LAST_NAME);
            let joined = [first, last]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            if joined.is_empty() {
                fields.note(DiagnosticKind::FieldResolutionMiss, "full_name");
                UNNAMED_CANDIDATE.to_string()
            } else {
                joined
            }
        }
    };

    let status_raw = fields.string_or("status", alias::STATUS, CandidateStatus::New.key());
    let status = CandidateStatus::from_raw(&status_raw);
    if status == CandidateStatus::Unknown {
        fields.note(
            DiagnosticKind::InvalidEnumValue,
            format!("unrecognized candidate status `{status_raw}`"),
        );
    }

    let matching_score = fields
        .number("matching_score", alias::MATCHING_SCORE)
        .map(|score| {
            if !(0.0..=100.0).contains(&score) {
                fields.note(
                    DiagnosticKind::CoercionFailure,
                    format!("matching_score {score} outside 0-100, clamped"),
                );
            }
            score.clamp(0.0, 100.0)
        });

    let profile_id = fields.id("profile_id", alias::PROFILE_ID);
    let profile_id = fields.expected("profile_id", profile_id);

    let skills = fields
        .string_list("skills", alias::SKILLS)
        .into_iter()
        .collect();
    let languages = languages(&mut fields);

    Ok(CandidateEntity {
        full_name,
        email: fields.string("email", alias::EMAIL),
        phone: fields.string("phone", alias::PHONE),
        status,
        status_raw,
        profile_id,
        matching_score,
        years_experience: fields.number("years_experience", alias::YEARS_EXPERIENCE),
        skills,
        languages,
        source: fields.string("source", alias::SOURCE),
        current_position: fields.string("current_position", alias::CURRENT_POSITION),
        created_at: fields.timestamp("created_at", alias::CREATED_AT),
        id,
    })
}

/// Seat counts that are missing or below 1 fall back to 1.
fn positions_available(fields: &mut RecordFields<'_>) -> u32 {
    use aliases::profile as alias;

    let seats = fields
        .number_or("positions_available", alias::POSITIONS_AVAILABLE, 1.0)
        .round();
    if seats < 1.0 {
        fields.note(
            DiagnosticKind::CoercionFailure,
            format!("positions_available {seats} below 1, using 1"),
        );
        return 1;
    }
    seats.min(f64::from(u32::MAX)) as u32
}

/// Languages arrive as plain names, `{name, level}` objects, or a
/// comma-separated string. Order is preserved.
fn languages(fields: &mut RecordFields<'_>) -> Vec<LanguageSkill> {
    use aliases::candidate as alias;

    let Some(value) = resolve(fields.record(), alias::LANGUAGES) else {
        return Vec::new();
    };

    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(entry) => {
                    let entry = RawRecord::new(entry.clone());
                    let name = resolve(&entry, alias::LANGUAGE_NAME)?.as_str()?.trim();
                    Some(LanguageSkill {
                        name: name.to_string(),
                        level: resolve(&entry, alias::LANGUAGE_LEVEL)
                            .and_then(Value::as_str)
                            .map(|level| level.trim().to_string()),
                    })
                }
                Value::String(name) if !name.trim().is_empty() => Some(LanguageSkill {
                    name: name.trim().to_string(),
                    level: None,
                }),
                _ => None,
            })
            .collect(),
        Value::String(_) => fields
            .string_list("languages", alias::LANGUAGES)
            .into_iter()
            .map(|name| LanguageSkill { name, level: None })
            .collect(),
        other => {
            fields.note(
                DiagnosticKind::CoercionFailure,
                format!("languages: expected list, found {other}"),
            );
            Vec::new()
        }
    }
}

/// The three feeds after normalization, plus everything noted on the way.
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    pub as_of: DateTime<Utc>,
    pub profiles: Vec<ProfileEntity>,
    pub clients: Vec<ClientEntity>,
    pub candidates: Vec<CandidateEntity>,
    pub diagnostics: Diagnostics,
}

pub fn normalize_batch(
    profiles: &RawCollection,
    clients: &RawCollection,
    candidates: &RawCollection,
    now: DateTime<Utc>,
) -> NormalizedBatch {
    let mut diagnostics = Diagnostics::new();

    let profiles = normalize_all(profiles, EntityKind::Profile, &mut diagnostics, |raw, sink| {
        normalize_profile(raw, now, sink)
    });
    let clients = normalize_all(clients, EntityKind::Client, &mut diagnostics, normalize_client);
    let candidates = normalize_all(
        candidates,
        EntityKind::Candidate,
        &mut diagnostics,
        normalize_candidate,
    );

    NormalizedBatch {
        as_of: now,
        profiles,
        clients,
        candidates,
        diagnostics,
    }
}

fn normalize_all<T>(
    collection: &RawCollection,
    entity: EntityKind,
    diagnostics: &mut Diagnostics,
    normalize: impl Fn(&RawRecord, &mut Diagnostics) -> Result<T, NormalizeError>,
) -> Vec<T> {
    if collection.skipped > 0 {
        diagnostics.record(
            DiagnosticKind::MalformedRecord,
            entity,
            None,
            format!("{} non-object entries skipped", collection.skipped),
        );
    }

    collection
        .records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match normalize(raw, diagnostics) {
            Ok(normalized) => Some(normalized),
            Err(err) => {
                diagnostics.record(
                    DiagnosticKind::MalformedRecord,
                    entity,
                    None,
                    format!("record #{index} dropped: {err}"),
                );
                None
            }
        })
        .collect()
}
