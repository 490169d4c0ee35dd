//! Shared domain types for Hashery.
//!
//! This crate contains the types exchanged between the registry, the
//! completion scheduler, and the HTTP layer: entry identifiers and states,
//! stats snapshots, service configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod entry;
pub mod error;
pub mod stats;
