//! SHA-512 secret digests.
//!
//! Implements the `SecretDigest` trait from `hashery-core` using the `sha2`
//! crate (RustCrypto ecosystem) and standard, padded base64 from `base64`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha512};

use hashery_core::digest::SecretDigest;

/// SHA-512 implementation of `SecretDigest`.
///
/// Produces the standard base64 encoding (88 characters, `=` padded) of the
/// 64-byte SHA-512 digest of the secret's UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512Base64Digest;

impl Sha512Base64Digest {
    /// Create a new digest.
    pub fn new() -> Self {
        Self
    }
}

impl SecretDigest for Sha512Base64Digest {
    fn digest(&self, secret: &str) -> String {
        let hash = Sha512::digest(secret.as_bytes());
        STANDARD.encode(hash)
    }
}
