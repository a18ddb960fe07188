//! # Requirement Store
//!
//! The authoritative in-memory collection of requirements for the lifetime
//! of the process. Requirements are kept in insertion order; removal shifts
//! later elements down without touching their identities.
//!
//! Every operation, read or write, takes the same `parking_lot::Mutex` for
//! its whole duration. ID allocation happens under that guard too, so two
//! concurrent creates can never observe the same sequence number. The lock
//! is never held across an `.await`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::StoreError;
use crate::id::{IdGenerator, IdKind};
use crate::requirement::{Requirement, SubItem};

#[derive(Debug, Default)]
struct Inner {
    requirements: Vec<Requirement>,
    ids: IdGenerator,
}

impl Inner {
    fn position(&self, id: &str) -> Option<usize> {
        self.requirements.iter().position(|r| r.id == id)
    }

    fn requirement_mut(&mut self, id: &str) -> Option<&mut Requirement> {
        self.requirements.iter_mut().find(|r| r.id == id)
    }
}

/// Thread-safe, cloneable handle to the requirement collection.
///
/// Clones share the same underlying data. Construct one per process (or per
/// test) and hand clones to whoever needs access.
#[derive(Debug, Clone, Default)]
pub struct RequirementStore {
    inner: Arc<Mutex<Inner>>,
}

impl RequirementStore {
    /// Create an empty store with a fresh ID sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// All requirements in store order.
    pub fn list(&self) -> Vec<Requirement> {
        self.inner.lock().requirements.clone()
    }

    /// Requirements whose status string equals `status` exactly, in store order.
    pub fn list_by_status(&self, status: &str) -> Vec<Requirement> {
        self.inner
            .lock()
            .requirements
            .iter()
            .filter(|r| r.status.as_str() == status)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<Requirement, StoreError> {
        let guard = self.inner.lock();
        guard
            .requirements
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::RequirementNotFound(id.to_string()))
    }

    /// Append a new requirement.
    ///
    /// Assigns a fresh `req-N` ID (any client-supplied ID is discarded) and
    /// sets an unset status to `pending`. Sub-items in the payload are kept
    /// as given.
    pub fn insert(&self, mut requirement: Requirement) -> Requirement {
        let mut guard = self.inner.lock();
        requirement.id = guard.ids.next(IdKind::Requirement);
        requirement.status = requirement.status.or_pending();
        guard.requirements.push(requirement.clone());
        tracing::debug!(requirement_id = %requirement.id, "requirement created");
        requirement
    }

    /// Overwrite every field of requirement `id` with `replacement`, keeping the ID.
    pub fn replace(
        &self,
        id: &str,
        mut replacement: Requirement,
    ) -> Result<Requirement, StoreError> {
        let mut guard = self.inner.lock();
        let slot = guard
            .requirement_mut(id)
            .ok_or_else(|| StoreError::RequirementNotFound(id.to_string()))?;
        replacement.id = slot.id.clone();
        *slot = replacement.clone();
        tracing::debug!(requirement_id = %id, "requirement replaced");
        Ok(replacement)
    }

    /// Remove requirement `id` together with its sub-items.
    pub fn remove(&self, id: &str) -> Result<Requirement, StoreError> {
        let mut guard = self.inner.lock();
        let index = guard
            .position(id)
            .ok_or_else(|| StoreError::RequirementNotFound(id.to_string()))?;
        let removed = guard.requirements.remove(index);
        tracing::debug!(requirement_id = %id, "requirement removed");
        Ok(removed)
    }

    /// Append a sub-item to requirement `requirement_id`.
    ///
    /// Assigns a fresh `sub-N` ID from the shared sequence and sets an unset
    /// status to `pending`. No ID is consumed when the parent is missing.
    pub fn add_sub_item(
        &self,
        requirement_id: &str,
        mut sub_item: SubItem,
    ) -> Result<SubItem, StoreError> {
        let mut guard = self.inner.lock();
        let index = guard
            .position(requirement_id)
            .ok_or_else(|| StoreError::RequirementNotFound(requirement_id.to_string()))?;
        sub_item.id = guard.ids.next(IdKind::SubItem);
        sub_item.status = sub_item.status.or_pending();
        guard.requirements[index].sub_items.push(sub_item.clone());
        tracing::debug!(
            requirement_id = %requirement_id,
            sub_item_id = %sub_item.id,
            "sub-item added"
        );
        Ok(sub_item)
    }

    /// Overwrite sub-item `sub_item_id` of requirement `requirement_id`, keeping its ID.
    pub fn replace_sub_item(
        &self,
        requirement_id: &str,
        sub_item_id: &str,
        mut replacement: SubItem,
    ) -> Result<SubItem, StoreError> {
        let mut guard = self.inner.lock();
        let slot = guard
            .requirement_mut(requirement_id)
            .and_then(|r| r.sub_items.iter_mut().find(|s| s.id == sub_item_id))
            .ok_or_else(|| sub_item_not_found(requirement_id, sub_item_id))?;
        replacement.id = slot.id.clone();
        *slot = replacement.clone();
        tracing::debug!(
            requirement_id = %requirement_id,
            sub_item_id = %sub_item_id,
            "sub-item replaced"
        );
        Ok(replacement)
    }

    /// Remove sub-item `sub_item_id` from requirement `requirement_id`.
    pub fn remove_sub_item(
        &self,
        requirement_id: &str,
        sub_item_id: &str,
    ) -> Result<SubItem, StoreError> {
        let mut guard = self.inner.lock();
        let sub_items = &mut guard
            .requirement_mut(requirement_id)
            .ok_or_else(|| sub_item_not_found(requirement_id, sub_item_id))?
            .sub_items;
        let index = sub_items
            .iter()
            .position(|s| s.id == sub_item_id)
            .ok_or_else(|| sub_item_not_found(requirement_id, sub_item_id))?;
        let removed = sub_items.remove(index);
        tracing::debug!(
            requirement_id = %requirement_id,
            sub_item_id = %sub_item_id,
            "sub-item removed"
        );
        Ok(removed)
    }

    /// Number of requirements currently stored.
    pub fn len(&self) -> usize {
        self.inner.lock().requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn sub_item_not_found(requirement_id: &str, sub_item_id: &str) -> StoreError {
    StoreError::SubItemNotFound {
        requirement_id: requirement_id.to_string(),
        sub_item_id: sub_item_id.to_string(),
    }
}
