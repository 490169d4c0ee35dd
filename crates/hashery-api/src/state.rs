//! Application state shared by the HTTP handlers.
//!
//! `HashService` is generic over the digest; AppState pins it to the
//! SHA-512/base64 implementation from hashery-infra.

use std::sync::Arc;

use hashery_core::service::hash::HashService;
use hashery_infra::crypto::hash::Sha512Base64Digest;
use hashery_types::config::{ServiceConfig, SubmitMode};

/// Concrete type alias for the service pinned to the infra digest.
pub type ConcreteHashService = HashService<Sha512Base64Digest>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub hash_service: Arc<ConcreteHashService>,
    /// How `POST /hash` responds.
    pub mode: SubmitMode,
}

impl AppState {
    /// Wire a fresh service (empty registry and stats) from `config`.
    pub fn new(config: &ServiceConfig) -> Self {
        let hash_service = HashService::from_config(Sha512Base64Digest::new(), config);
        Self {
            hash_service: Arc::new(hash_service),
            mode: config.mode,
        }
    }
}
