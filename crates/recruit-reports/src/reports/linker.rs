//! Builds the relational edges between the three normalized collections.

use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::domain::{EntityId, EntityKind};
use super::normalize::{CandidateEntity, ClientEntity, NormalizedBatch, ProfileEntity};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Entities that can be indexed by id.
pub trait Identified {
    const KIND: EntityKind;

    fn id(&self) -> &EntityId;
}

impl Identified for ProfileEntity {
    const KIND: EntityKind = EntityKind::Profile;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for ClientEntity {
    const KIND: EntityKind = EntityKind::Client;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for CandidateEntity {
    const KIND: EntityKind = EntityKind::Candidate;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Entities in first-seen order plus a hash index into them.
#[derive(Debug, Clone)]
pub struct IndexedCollection<T> {
    items: Vec<T>,
    index: HashMap<EntityId, usize>,
}

impl<T: Identified> IndexedCollection<T> {
    /// Later duplicates replace the earlier entry in its original position.
    fn build(items: Vec<T>, diagnostics: &mut Diagnostics) -> Self {
        let mut collection = Self {
            items: Vec::with_capacity(items.len()),
            index: HashMap::with_capacity(items.len()),
        };

        for item in items {
            match collection.index.get(item.id()) {
                Some(&position) => {
                    diagnostics.record(
                        DiagnosticKind::DuplicateIdentity,
                        T::KIND,
                        Some(item.id()),
                        "duplicate id, later record kept",
                    );
                    collection.items[position] = item;
                }
                None => {
                    collection
                        .index
                        .insert(item.id().clone(), collection.items.len());
                    collection.items.push(item);
                }
            }
        }

        collection
    }

    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The reconciled graph for one report request.
///
/// Every id held in `profiles_by_client` or `candidates_by_profile` exists in
/// the corresponding collection: references that did not resolve were nulled
/// on the entity during linking.
#[derive(Debug, Clone)]
pub struct LinkedGraph {
    as_of: DateTime<Utc>,
    profiles: IndexedCollection<ProfileEntity>,
    clients: IndexedCollection<ClientEntity>,
    candidates: IndexedCollection<CandidateEntity>,
    profiles_by_client: HashMap<EntityId, Vec<EntityId>>,
    candidates_by_profile: HashMap<EntityId, Vec<EntityId>>,
    diagnostics: Diagnostics,
}

pub fn link(batch: NormalizedBatch) -> LinkedGraph {
    let NormalizedBatch {
        as_of,
        profiles,
        clients,
        candidates,
        mut diagnostics,
    } = batch;

    let clients = IndexedCollection::build(clients, &mut diagnostics);
    let mut profiles = IndexedCollection::build(profiles, &mut diagnostics);
    let mut candidates = IndexedCollection::build(candidates, &mut diagnostics);

    let mut profiles_by_client: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
    for profile in profiles.items.iter_mut() {
        let Some(client_id) = profile.client_id.take() else {
            continue;
        };

        if clients.contains(&client_id) {
            profiles_by_client
                .entry(client_id.clone())
                .or_default()
                .push(profile.id.clone());
            profile.client_id = Some(client_id);
        } else {
            diagnostics.record(
                DiagnosticKind::DanglingReference,
                EntityKind::Profile,
                Some(&profile.id),
                format!("client {client_id} not found"),
            );
            profile.client_name_hint = None;
        }
    }

    let mut candidates_by_profile: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
    for candidate in candidates.items.iter_mut() {
        let Some(profile_id) = candidate.profile_id.take() else {
            continue;
        };

        if profiles.contains(&profile_id) {
            candidates_by_profile
                .entry(profile_id.clone())
                .or_default()
                .push(candidate.id.clone());
            candidate.profile_id = Some(profile_id);
        } else {
            diagnostics.record(
                DiagnosticKind::DanglingReference,
                EntityKind::Candidate,
                Some(&candidate.id),
                format!("profile {profile_id} not found"),
            );
        }
    }

    debug!(
        profiles = profiles.len(),
        clients = clients.len(),
        candidates = candidates.len(),
        linked_clients = profiles_by_client.len(),
        linked_profiles = candidates_by_profile.len(),
        "linked report graph"
    );

    LinkedGraph {
        as_of,
        profiles,
        clients,
        candidates,
        profiles_by_client,
        candidates_by_profile,
        diagnostics,
    }
}

impl LinkedGraph {
    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    pub fn profiles(&self) -> &IndexedCollection<ProfileEntity> {
        &self.profiles
    }

    pub fn clients(&self) -> &IndexedCollection<ClientEntity> {
        &self.clients
    }

    pub fn candidates(&self) -> &IndexedCollection<CandidateEntity> {
        &self.candidates
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn profile(&self, id: &EntityId) -> Option<&ProfileEntity> {
        self.profiles.get(id)
    }

    pub fn client(&self, id: &EntityId) -> Option<&ClientEntity> {
        self.clients.get(id)
    }

    /// Ids of the profiles linked to `client_id`, in profile input order.
    pub fn profile_ids_for_client(&self, client_id: &EntityId) -> &[EntityId] {
        self.profiles_by_client
            .get(client_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids of the candidates linked to `profile_id`, in candidate input order.
    pub fn candidate_ids_for_profile(&self, profile_id: &EntityId) -> &[EntityId] {
        self.candidates_by_profile
            .get(profile_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn profiles_for_client<'g>(
        &'g self,
        client_id: &EntityId,
    ) -> impl Iterator<Item = &'g ProfileEntity> + 'g {
        self.profile_ids_for_client(client_id)
            .iter()
            .filter_map(|id| self.profiles.get(id))
    }

    pub fn candidates_for_profile<'g>(
        &'g self,
        profile_id: &EntityId,
    ) -> impl Iterator<Item = &'g CandidateEntity> + 'g {
        self.candidate_ids_for_profile(profile_id)
            .iter()
            .filter_map(|id| self.candidates.get(id))
    }

    pub fn client_of(&self, profile: &ProfileEntity) -> Option<&ClientEntity> {
        profile
            .client_id
            .as_ref()
            .and_then(|client_id| self.clients.get(client_id))
    }

    pub fn profile_of(&self, candidate: &CandidateEntity) -> Option<&ProfileEntity> {
        candidate
            .profile_id
            .as_ref()
            .and_then(|profile_id| self.profiles.get(profile_id))
    }
}
