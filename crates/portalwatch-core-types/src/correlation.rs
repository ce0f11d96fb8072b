//! Correlation identifiers for check cycles
//!
//! Every scheduled or one-shot run gets a `CycleId` so that the log lines of
//! one cycle (authentication, both domains, notification, persistence) can be
//! grouped together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single check cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleId(String);

impl CycleId {
    /// Generate a new CycleId using UUIDv7 (time ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
