use super::diagnostics::DiagnosticKind;
use super::domain::EntityKind;
use super::linker::link;
use super::normalize::normalize_batch;
use super::projector::project;
use super::raw::RawCollection;
use super::source::{RecordSource, SourceError};
use super::views::{ConsolidatedView, ReportFilter};
use crate::config::ReportingConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Fatal report failures. Everything recoverable is a diagnostic instead.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("{source_kind} feed could not be fetched: {error}")]
    SourceFetch {
        source_kind: EntityKind,
        #[source]
        error: SourceError,
    },
}

impl ReportError {
    fn fetch(source_kind: EntityKind) -> impl FnOnce(SourceError) -> Self {
        move |error| Self::SourceFetch { source_kind, error }
    }
}

/// Runs the full pipeline for one request against a [`RecordSource`].
pub struct ReportAssembler<S> {
    source: Arc<S>,
    config: ReportingConfig,
}

impl<S> Clone for ReportAssembler<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: self.config.clone(),
        }
    }
}

impl<S: RecordSource> ReportAssembler<S> {
    pub fn new(source: Arc<S>, config: ReportingConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ReportingConfig {
        &self.config
    }

    pub async fn generate_consolidated_view(
        &self,
        filter: ReportFilter,
    ) -> Result<ConsolidatedView, ReportError> {
        self.generate_at(filter, Utc::now()).await
    }

    /// Fetches all three feeds concurrently and fails the whole request if any
    /// one of them fails; no partial view is ever built.
    pub async fn generate_at(
        &self,
        filter: ReportFilter,
        now: DateTime<Utc>,
    ) -> Result<ConsolidatedView, ReportError> {
        info!(%filter, "generating consolidated report");

        let fetched = tokio::try_join!(
            async {
                self.source
                    .fetch_profiles()
                    .await
                    .map_err(ReportError::fetch(EntityKind::Profile))
            },
            async {
                self.source
                    .fetch_clients()
                    .await
                    .map_err(ReportError::fetch(EntityKind::Client))
            },
            async {
                self.source
                    .fetch_candidates()
                    .await
                    .map_err(ReportError::fetch(EntityKind::Candidate))
            },
        );
        let (profiles, clients, candidates) = match fetched {
            Ok(feeds) => feeds,
            Err(err) => {
                warn!(error = %err, "report request aborted");
                return Err(err);
            }
        };

        info!(
            profiles = profiles.len(),
            clients = clients.len(),
            candidates = candidates.len(),
            "fetched report feeds"
        );

        Ok(build_consolidated_view(
            &profiles,
            &clients,
            &candidates,
            &filter,
            &self.config,
            now,
        ))
    }
}

/// The synchronous pipeline: normalize, link, then project under `filter`.
pub fn build_consolidated_view(
    profiles: &RawCollection,
    clients: &RawCollection,
    candidates: &RawCollection,
    filter: &ReportFilter,
    config: &ReportingConfig,
    now: DateTime<Utc>,
) -> ConsolidatedView {
    let graph = link(normalize_batch(profiles, clients, candidates, now));
    let view = project(&graph, filter, config);

    let quality = &view.data_quality;
    if !quality.warnings.is_empty() {
        warn!(
            warnings = quality.warnings.len(),
            dangling = quality.count(DiagnosticKind::DanglingReference),
            duplicates = quality.count(DiagnosticKind::DuplicateIdentity),
            malformed = quality.count(DiagnosticKind::MalformedRecord),
            "report built with data-quality warnings"
        );
    }

    info!(
        profiles = view.profiles.len(),
        clients = view.clients.len(),
        candidates = view.candidates.len(),
        alerts = view.alerts.len(),
        diagnostics = quality.total,
        "consolidated view ready"
    );

    view
}
