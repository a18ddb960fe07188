//! # Route Modules
//!
//! [`dispatch`] classifies requirement paths and hands them to the
//! operation functions in [`requirements`]. Assembled into the application
//! by [`crate::app`].

pub mod dispatch;
pub mod requirements;
