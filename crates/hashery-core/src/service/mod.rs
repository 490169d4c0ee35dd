//! Service layer for Hashery.

pub mod hash;
