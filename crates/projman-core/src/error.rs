//! # Store Errors
//!
//! The store has exactly one failure mode: the addressed record is absent.
//! Sub-item lookups report [`StoreError::SubItemNotFound`] whether the parent
//! requirement or the sub-item itself is missing.

use thiserror::Error;

/// Error returned by [`crate::RequirementStore`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No requirement with this ID exists.
    #[error("requirement {0} not found")]
    RequirementNotFound(String),

    /// The parent requirement or the sub-item within it does not exist.
    #[error("sub-item {sub_item_id} not found in requirement {requirement_id}")]
    SubItemNotFound {
        requirement_id: String,
        sub_item_id: String,
    },
}
