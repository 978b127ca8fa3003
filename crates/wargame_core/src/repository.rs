//! Persistence port and the in-memory adapter.
//!
//! The combat rules never touch storage directly. They go through
//! [`Repository`], which creates, fetches, updates, lists and deletes
//! [`Entity`] records by identity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind, NewEntity};
use crate::error::{Result, WargameError};

/// Selection criteria for [`Repository::list`].
///
/// Unset fields match everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityFilter {
    /// Only records of this kind.
    pub kind: Option<EntityKind>,
    /// Only records directly owned by this army.
    pub owner: Option<EntityId>,
}

impl EntityFilter {
    /// Match every record.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            kind: None,
            owner: None,
        }
    }

    /// Match records of one kind.
    #[must_use]
    pub const fn of_kind(kind: EntityKind) -> Self {
        Self {
            kind: Some(kind),
            owner: None,
        }
    }

    /// Match direct members of an army.
    #[must_use]
    pub const fn owned_by(army: EntityId) -> Self {
        Self {
            kind: None,
            owner: Some(army),
        }
    }

    /// Builder method to restrict to one kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Check a record against the filter.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        self.kind.map_or(true, |kind| entity.kind() == kind)
            && self
                .owner
                .map_or(true, |owner| entity.owner() == Some(owner))
    }
}

/// Storage collaborator for entities.
pub trait Repository {
    /// Store a new record and return its identity.
    fn create(&mut self, record: NewEntity) -> EntityId;

    /// Fetch a record.
    ///
    /// # Errors
    ///
    /// Returns [`WargameError::EntityNotFound`] if no record has this identity.
    fn get(&self, id: EntityId) -> Result<Entity>;

    /// Overwrite an existing record, keyed by its identity.
    ///
    /// # Errors
    ///
    /// Returns [`WargameError::EntityNotFound`] if the record was never created
    /// or has been deleted.
    fn update(&mut self, entity: Entity) -> Result<()>;

    /// Records matching `filter`, in ascending identity order.
    fn list(&self, filter: &EntityFilter) -> Vec<Entity>;

    /// Remove a record and return it.
    ///
    /// # Errors
    ///
    /// Returns [`WargameError::EntityNotFound`] if no record has this identity.
    fn delete(&mut self, id: EntityId) -> Result<Entity>;
}

/// `BTreeMap`-backed repository.
///
/// Identities start at 1 and are never reused, so a deleted record cannot be
/// confused with a later one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRepository {
    entities: BTreeMap<EntityId, Entity>,
    next_id: EntityId,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MemoryRepository {
    fn create(&mut self, record: NewEntity) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.insert(id, record.into_entity(id));
        id
    }

    fn get(&self, id: EntityId) -> Result<Entity> {
        self.entities
            .get(&id)
            .cloned()
            .ok_or(WargameError::EntityNotFound(id))
    }

    fn update(&mut self, entity: Entity) -> Result<()> {
        let id = entity.id();
        let slot = self
            .entities
            .get_mut(&id)
            .ok_or(WargameError::EntityNotFound(id))?;
        *slot = entity;
        Ok(())
    }

    fn list(&self, filter: &EntityFilter) -> Vec<Entity> {
        self.entities
            .values()
            .filter(|entity| filter.matches(entity))
            .cloned()
            .collect()
    }

    fn delete(&mut self, id: EntityId) -> Result<Entity> {
        self.entities
            .remove(&id)
            .ok_or(WargameError::EntityNotFound(id))
    }
}
