//! Infrastructure layer for Hashery.
//!
//! Contains the implementations behind the ports defined in `hashery-core`:
//! the SHA-512/base64 secret digest, plus configuration file loading and
//! config directory resolution.

pub mod config;
pub mod crypto;
