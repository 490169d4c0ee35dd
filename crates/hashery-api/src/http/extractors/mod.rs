//! Request extractors.

pub mod password;
