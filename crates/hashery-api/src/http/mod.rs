//! HTTP layer for Hashery.
//!
//! Axum routes for submitting secrets, retrieving digests, reading stats,
//! and triggering shutdown. Digests and identifiers are returned as plain
//! text; errors use a JSON envelope.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
