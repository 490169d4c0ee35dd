//! Cryptographic operations for Hashery.
//!
//! - `hash`: SHA-512 digest of secrets, base64 encoded

pub mod hash;
