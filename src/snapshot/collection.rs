//! Entity collection
//!
//! An id counter plus an ordered map of allocated ids to entities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::error::{Result, StoreError};

/// A group of entities of one kind
///
/// ## Invariants
/// - every key in `items` is `< next_id`
/// - `next_id` never decreases, so ids are never reused after a delete
///
/// Uniqueness of allocations across concurrent callers is the store's job
/// (see `LockScope`), not the collection's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCollection<T> {
    #[serde(rename = "id_count")]
    next_id: EntityId,
    items: BTreeMap<EntityId, T>,
}

impl<T> EntityCollection<T> {
    /// First id handed out by an empty collection
    pub const FIRST_ID: EntityId = 1;

    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            next_id: Self::FIRST_ID,
            items: BTreeMap::new(),
        }
    }

    /// Id the next insert will receive
    pub fn next_id(&self) -> EntityId {
        self.next_id
    }

    /// Allocate the next id, build the entity for it and store it
    ///
    /// Fails with `Corruption` once the counter cannot advance; nothing is
    /// inserted in that case.
    pub fn insert_with(&mut self, build: impl FnOnce(EntityId) -> T) -> Result<&T> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Corruption(format!("id counter exhausted at {}", id)))?;

        Ok(self.items.entry(id).or_insert(build(id)))
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.items.contains_key(&id)
    }

    /// Remove an entity; the id is not released
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.items.remove(&id)
    }

    /// Iterate entities in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    /// Consume the collection, returning entities in ascending id order
    pub fn into_values(self) -> Vec<T> {
        self.items.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check the counter/key invariants of a decoded collection
    pub(crate) fn validate(&self, name: &str) -> std::result::Result<(), String> {
        if self.next_id < Self::FIRST_ID {
            return Err(format!("{}: id_count must be at least {}", name, Self::FIRST_ID));
        }

        if let Some((&max_id, _)) = self.items.last_key_value() {
            if max_id >= self.next_id {
                return Err(format!(
                    "{}: item id {} is not below id_count {}",
                    name, max_id, self.next_id
                ));
            }
        }

        if self.items.contains_key(&0) {
            return Err(format!("{}: item id 0 is reserved", name));
        }

        Ok(())
    }
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}
