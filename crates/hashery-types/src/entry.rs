use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Identifier handed out for a pending digest.
///
/// Allocated densely from zero in reservation order and never reused for the
/// lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl EntryId {
    /// Position of this entry in the registry arena, if addressable on this platform.
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// The identifier allocated right after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// State of a reserved registry entry.
///
/// An entry starts `Pending` and moves to `Ready` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    /// Reserved; the completion has not written its digest yet.
    Pending,
    /// Final digest.
    Ready(String),
}
