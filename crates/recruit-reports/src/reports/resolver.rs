//! Single chokepoint for "guess the field name" lookups against raw records.

use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::domain::{EntityId, EntityKind};
use super::raw::RawRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Returns the first value under `keys` (tried in order, dotted paths allowed)
/// that is present, not null, and not a blank string.
pub fn resolve<'r>(record: &'r RawRecord, keys: &[&str]) -> Option<&'r Value> {
    keys.iter()
        .filter_map(|key| record.get_path(key))
        .find(|value| is_present(value))
}

/// Like [`resolve`] but falls back to `default` when nothing is present.
pub fn resolve_or<'r>(record: &'r RawRecord, keys: &[&str], default: &'r Value) -> &'r Value {
    resolve(record, keys).unwrap_or(default)
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        _ => true,
    }
}

/// Typed accessors over one record that report misses and coercion failures
/// into the request's [`Diagnostics`].
///
/// A key whose value cannot be coerced to the requested type is recorded as a
/// coercion failure and resolution moves on to the next key.
pub struct RecordFields<'a> {
    record: &'a RawRecord,
    entity: EntityKind,
    record_id: Option<EntityId>,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> RecordFields<'a> {
    pub fn new(
        record: &'a RawRecord,
        entity: EntityKind,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            record,
            entity,
            record_id: None,
            diagnostics,
        }
    }

    pub fn record(&self) -> &'a RawRecord {
        self.record
    }

    /// Attaches the record's id to every diagnostic raised afterwards.
    pub fn set_record_id(&mut self, id: &EntityId) {
        self.record_id = Some(id.clone());
    }

    pub fn record_id(&self) -> Option<&EntityId> {
        self.record_id.as_ref()
    }

    pub fn note(&mut self, kind: DiagnosticKind, detail: impl Into<String>) {
        self.diagnostics
            .record(kind, self.entity, self.record_id.as_ref(), detail);
    }

    pub fn string(&mut self, field: &str, keys: &[&str]) -> Option<String> {
        self.first_coerced(field, keys, "string", coerce_string)
    }

    pub fn string_or(&mut self, field: &str, keys: &[&str], default: &str) -> String {
        match self.string(field, keys) {
            Some(value) => value,
            None => {
                self.miss(field);
                default.to_string()
            }
        }
    }

    pub fn number(&mut self, field: &str, keys: &[&str]) -> Option<f64> {
        self.first_coerced(field, keys, "number", coerce_number)
    }

    pub fn number_or(&mut self, field: &str, keys: &[&str], default: f64) -> f64 {
        match self.number(field, keys) {
            Some(value) => value,
            None => {
                self.miss(field);
                default
            }
        }
    }

    pub fn boolean_or(&mut self, field: &str, keys: &[&str], default: bool) -> bool {
        match self.first_coerced(field, keys, "boolean", coerce_boolean) {
            Some(value) => value,
            None => {
                self.miss(field);
                default
            }
        }
    }

    pub fn id(&mut self, field: &str, keys: &[&str]) -> Option<EntityId> {
        self.first_coerced(field, keys, "identifier", coerce_id)
    }

    pub fn timestamp(&mut self, field: &str, keys: &[&str]) -> Option<DateTime<Utc>> {
        self.first_coerced(field, keys, "timestamp", |value| {
            value.as_str().and_then(parse_timestamp)
        })
    }

    /// Passes `value` through, noting a miss for `field` when it is absent.
    ///
    /// For optional fields a report still expects, such as a creation date.
    pub fn expected<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.miss(field);
        }
        value
    }

    /// Accepts a JSON array of scalars or a single comma-separated string.
    pub fn string_list(&mut self, field: &str, keys: &[&str]) -> Vec<String> {
        self.first_coerced(field, keys, "list", coerce_string_list)
            .unwrap_or_default()
    }

    fn miss(&mut self, field: &str) {
        self.note(DiagnosticKind::FieldResolutionMiss, field);
    }

    fn first_coerced<T>(
        &mut self,
        field: &str,
        keys: &[&str],
        expected: &str,
        coerce: impl Fn(&Value) -> Option<T>,
    ) -> Option<T> {
        let record = self.record;
        for key in keys {
            let Some(value) = record.get_path(key).filter(|value| is_present(value)) else {
                continue;
            };

            match coerce(value) {
                Some(coerced) => return Some(coerced),
                None => self.note(
                    DiagnosticKind::CoercionFailure,
                    format!("{field}: `{key}` holds {value}, expected {expected}"),
                ),
            }
        }
        None
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite()),
        _ => None,
    }
}

fn coerce_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_i64().map(|int| int != 0),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Scalars are ids; an embedded object contributes its own `id`.
fn coerce_id(value: &Value) -> Option<EntityId> {
    match value {
        Value::Object(fields) => fields.get("id").and_then(EntityId::from_value),
        other => EntityId::from_value(other),
    }
}

fn coerce_string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(coerce_string)
                .filter(|item| !item.is_empty())
                .collect(),
        ),
        Value::String(text) => Some(
            text.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// Parses the timestamp spellings seen upstream: RFC 3339, naive ISO
/// date-times (taken as UTC), and bare dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
