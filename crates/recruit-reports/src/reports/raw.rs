use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Untyped key/value bag exactly as an upstream feed delivered it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wraps a JSON object. Any other JSON shape is not a record.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Looks up a top-level key first, then walks `a.b.c` through nested objects.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.0.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// One feed's worth of raw records.
///
/// Feeds arrive either as a bare JSON array or as a paginated envelope with a
/// `results` array; both are accepted. Array entries that are not objects are
/// counted in `skipped` instead of failing the whole feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawCollection {
    pub records: Vec<RawRecord>,
    pub skipped: usize,
}

impl RawCollection {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            skipped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn from_json_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    fn from_entries(entries: Vec<Value>) -> Self {
        let total = entries.len();
        let records: Vec<RawRecord> = entries
            .into_iter()
            .filter_map(RawRecord::from_value)
            .collect();
        Self {
            skipped: total - records.len(),
            records,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedPayload {
    List(Vec<Value>),
    Paged { results: Vec<Value> },
}

impl<'de> Deserialize<'de> for RawCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = match FeedPayload::deserialize(deserializer).map_err(|_| {
            serde::de::Error::custom("expected a JSON array or an object with a `results` array")
        })? {
            FeedPayload::List(entries) => entries,
            FeedPayload::Paged { results } => results,
        };
        Ok(Self::from_entries(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_bare_arrays_and_paged_envelopes() {
        let bare = RawCollection::from_json_value(json!([{ "id": 1 }, { "id": 2 }]))
            .expect("array payload parses");
        assert_eq!(bare.len(), 2);

        let paged = RawCollection::from_json_value(json!({
            "count": 1,
            "next": null,
            "results": [{ "id": 3 }]
        }))
        .expect("paged payload parses");
        assert_eq!(paged.len(), 1);
        assert_eq!(paged.records[0].get_path("id"), Some(&json!(3)));
    }

    #[test]
    fn rejects_other_payload_shapes() {
        assert!(RawCollection::from_json_value(json!({ "items": [] })).is_err());
        assert!(RawCollection::from_json_value(json!("profiles")).is_err());
    }

    #[test]
    fn non_object_entries_are_skipped_and_counted() {
        let collection = RawCollection::from_json_value(json!([{ "id": 1 }, 42, null]))
            .expect("payload parses");
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.skipped, 2);
    }

    #[test]
    fn dotted_paths_walk_nested_objects() {
        let record = RawRecord::from_value(json!({
            "client": { "id": 9, "contact": { "email": "ops@acme.test" } },
            "client.name": "flat key wins"
        }))
        .expect("object record");

        assert_eq!(record.get_path("client.id"), Some(&json!(9)));
        assert_eq!(
            record.get_path("client.contact.email"),
            Some(&json!("ops@acme.test"))
        );
        assert_eq!(record.get_path("client.name"), Some(&json!("flat key wins")));
        assert_eq!(record.get_path("client.missing"), None);
    }
}
