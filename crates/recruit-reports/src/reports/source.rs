//! Contract for the external collaborator that supplies the three raw feeds.

use super::domain::EntityKind;
use super::raw::RawCollection;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Error enumeration for fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unexpected payload shape: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Supplies raw records for each entity kind. Implementations own transport,
/// caching, and timeouts; the engine only awaits the results.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_profiles(&self) -> Result<RawCollection, SourceError>;
    async fn fetch_clients(&self) -> Result<RawCollection, SourceError>;
    async fn fetch_candidates(&self) -> Result<RawCollection, SourceError>;
}

/// Reads `profiles.json`, `clients.json`, and `candidates.json` from one
/// directory. Each file may hold a bare array or a `{ "results": [...] }`
/// page.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn feed_path(&self, kind: EntityKind) -> PathBuf {
        self.root.join(format!("{}.json", kind.label()))
    }

    async fn read_feed(&self, kind: EntityKind) -> Result<RawCollection, SourceError> {
        let path = self.feed_path(kind);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
        let collection = RawCollection::from_slice(&bytes)?;
        debug!(
            path = %path.display(),
            records = collection.len(),
            skipped = collection.skipped,
            "loaded {kind} feed"
        );
        Ok(collection)
    }
}

#[async_trait]
impl RecordSource for JsonDirectorySource {
    async fn fetch_profiles(&self) -> Result<RawCollection, SourceError> {
        self.read_feed(EntityKind::Profile).await
    }

    async fn fetch_clients(&self) -> Result<RawCollection, SourceError> {
        self.read_feed(EntityKind::Client).await
    }

    async fn fetch_candidates(&self) -> Result<RawCollection, SourceError> {
        self.read_feed(EntityKind::Candidate).await
    }
}

/// Feeds held in memory, for bundled sample data and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub profiles: RawCollection,
    pub clients: RawCollection,
    pub candidates: RawCollection,
}

impl InMemorySource {
    pub fn new(profiles: RawCollection, clients: RawCollection, candidates: RawCollection) -> Self {
        Self {
            profiles,
            clients,
            candidates,
        }
    }

    /// Builds the source from three JSON payloads, each an array or a
    /// `results` page.
    pub fn from_json(
        profiles: serde_json::Value,
        clients: serde_json::Value,
        candidates: serde_json::Value,
    ) -> Result<Self, SourceError> {
        Ok(Self::new(
            RawCollection::from_json_value(profiles)?,
            RawCollection::from_json_value(clients)?,
            RawCollection::from_json_value(candidates)?,
        ))
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    async fn fetch_profiles(&self) -> Result<RawCollection, SourceError> {
        Ok(self.profiles.clone())
    }

    async fn fetch_clients(&self) -> Result<RawCollection, SourceError> {
        Ok(self.clients.clone())
    }

    async fn fetch_candidates(&self) -> Result<RawCollection, SourceError> {
        Ok(self.candidates.clone())
    }
}
