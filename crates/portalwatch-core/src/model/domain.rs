//! Portal domains

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two independently tracked portal pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Results,
    Attendance,
}

impl Domain {
    /// Both domains, in the order a check cycle processes them
    pub const CHECK_ORDER: [Domain; 2] = [Domain::Attendance, Domain::Results];

    /// Stable lowercase name used in logs and error context
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Results => "results",
            Domain::Attendance => "attendance",
        }
    }

    /// File name of the persisted baseline for this domain
    pub fn state_file_name(&self) -> &'static str {
        match self {
            Domain::Results => "state.json",
            Domain::Attendance => "attendance_state.json",
        }
    }

    /// Noun used for a single entry in notification text
    pub fn entry_label(&self) -> &'static str {
        match self {
            Domain::Results => "result",
            Domain::Attendance => "attendance entry",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
