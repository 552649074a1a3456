use super::domain::{EntityId, EntityKind};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Non-fatal data-quality findings raised while building a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    FieldResolutionMiss,
    CoercionFailure,
    DanglingReference,
    DuplicateIdentity,
    InvalidEnumValue,
    MalformedRecord,
}

impl DiagnosticKind {
    pub const fn severity(self) -> Severity {
        match self {
            Self::FieldResolutionMiss | Self::CoercionFailure | Self::InvalidEnumValue => {
                Severity::Low
            }
            Self::DanglingReference | Self::DuplicateIdentity | Self::MalformedRecord => {
                Severity::Warning
            }
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FieldResolutionMiss => "Field resolution miss",
            Self::CoercionFailure => "Coercion failure",
            Self::DanglingReference => "Dangling reference",
            Self::DuplicateIdentity => "Duplicate identity",
            Self::InvalidEnumValue => "Invalid enum value",
            Self::MalformedRecord => "Malformed record",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub entity: EntityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<EntityId>,
    pub detail: String,
}

/// Request-scoped accumulator. Field misses are only counted; every other
/// kind also keeps its detail entry.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    counts: BTreeMap<DiagnosticKind, usize>,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        kind: DiagnosticKind,
        entity: EntityKind,
        record_id: Option<&EntityId>,
        detail: impl Into<String>,
    ) {
        *self.counts.entry(kind).or_default() += 1;
        if kind == DiagnosticKind::FieldResolutionMiss {
            return;
        }

        let detail = detail.into();
        debug!(?kind, %entity, record_id = ?record_id, %detail, "report diagnostic");
        self.entries.push(Diagnostic {
            kind,
            entity,
            record_id: record_id.cloned(),
            detail,
        });
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|entry| entry.kind.severity() == Severity::Warning)
    }

    pub fn summary(&self) -> DiagnosticSummary {
        DiagnosticSummary {
            total: self.total(),
            counts: self
                .counts
                .iter()
                .map(|(kind, count)| DiagnosticCount {
                    kind: *kind,
                    kind_label: kind.label(),
                    severity: kind.severity(),
                    count: *count,
                })
                .collect(),
            warnings: self.warnings().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticCount {
    pub kind: DiagnosticKind,
    pub kind_label: &'static str,
    pub severity: Severity,
    pub count: usize,
}

/// Data-quality section attached to every consolidated view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagnosticSummary {
    pub total: usize,
    pub counts: Vec<DiagnosticCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Diagnostic>,
}

impl DiagnosticSummary {
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.counts
            .iter()
            .find(|entry| entry.kind == kind)
            .map_or(0, |entry| entry.count)
    }
}
