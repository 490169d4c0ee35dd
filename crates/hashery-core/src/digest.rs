//! SecretDigest trait for turning a secret into its published digest.
//!
//! Defined in hashery-core so the scheduler can hash secrets without coupling
//! to a specific algorithm. The SHA-512/base64 adapter lives in hashery-infra.

/// Pure, deterministic `secret -> digest` transform.
///
/// Implementations must be infallible and hold no shared mutable state; the
/// completion scheduler calls them from many tasks at once.
pub trait SecretDigest: Send + Sync + 'static {
    /// Compute the encoded digest of `secret`.
    fn digest(&self, secret: &str) -> String;
}
