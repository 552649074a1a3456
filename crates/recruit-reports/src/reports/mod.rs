//! Consolidated report pipeline: resolve, normalize, link, aggregate, project.
//!
//! Every stage takes its inputs by argument and returns a fresh value, so
//! concurrent report requests share no mutable state.

pub mod alerts;
mod assembler;
pub mod diagnostics;
pub mod domain;
pub mod linker;
pub mod normalize;
mod projector;
pub mod raw;
pub mod resolver;
pub mod source;
pub mod stats;
pub mod views;

#[cfg(test)]
mod tests;

pub use alerts::{AlertKind, AlertLevel, AttentionAlert};
pub use assembler::{build_consolidated_view, ReportAssembler, ReportError};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSummary, Diagnostics, Severity};
pub use domain::{CandidateStatus, EntityId, EntityKind, FunnelBucket, Priority, ProfileStatus};
pub use linker::{link, LinkedGraph};
pub use normalize::{
    normalize_batch, normalize_candidate, normalize_client, normalize_profile, CandidateEntity,
    ClientEntity, NormalizeError, NormalizedBatch, ProfileEntity, ALIAS_TABLE_VERSION,
};
pub use projector::project;
pub use raw::{RawCollection, RawRecord};
pub use source::{InMemorySource, JsonDirectorySource, RecordSource, SourceError};
pub use stats::{aggregate, AggregatedStats, ClientRollup, FunnelCounts, ProfileStats, Scope};
pub use views::{CandidateView, ClientView, ConsolidatedView, ProfileView, ReportFilter};
