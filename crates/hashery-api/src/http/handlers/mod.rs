//! HTTP request handlers.

pub mod hash;
pub mod shutdown;
pub mod stats;
