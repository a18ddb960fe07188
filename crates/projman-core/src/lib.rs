//! # projman-core -- Requirements, Sub-Items, and the In-Memory Store
//!
//! This crate holds everything the projman service knows about its data,
//! independent of HTTP:
//!
//! - [`Requirement`] and [`SubItem`], the two nested entities, with their
//!   lenient JSON wire format.
//! - [`Status`], a typed status that still round-trips arbitrary strings.
//! - [`IdGenerator`], one monotonically increasing sequence shared by both
//!   entity kinds (`req-1`, `sub-2`, `req-3`, ...).
//! - [`RequirementStore`], the process-lifetime collection guarded by a
//!   single exclusive lock.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `projman-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod id;
pub mod requirement;
pub mod store;

pub use error::StoreError;
pub use id::{IdGenerator, IdKind};
pub use requirement::{Requirement, Status, SubItem};
pub use store::RequirementStore;
