//! Change detector output types.
//!
//! Field-level changes use `BTreeMap` so serialized output is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{Domain, Record};

/// One difference between a baseline and a current snapshot for one key
///
/// Serialized with a `type` tag (`"new"` / `"updated"`); the record of a
/// `New` entry is stored under `new`, matching the persisted change format
/// used in notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChangeEntry {
    /// Key present in the current snapshot only
    New {
        key: String,
        #[serde(rename = "new")]
        record: Record,
    },
    /// Key present on both sides with at least one differing field
    Updated {
        key: String,
        changes: BTreeMap<String, FieldChange>,
    },
}

impl ChangeEntry {
    /// Identity key this entry refers to
    pub fn key(&self) -> &str {
        match self {
            ChangeEntry::New { key, .. } | ChangeEntry::Updated { key, .. } => key,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, ChangeEntry::New { .. })
    }
}

/// Old and new value of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub old: String,
    pub new: String,
}

impl FieldChange {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}

/// Changes of both domains collected during one check cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    pub results: Vec<ChangeEntry>,
    pub attendance: Vec<ChangeEntry>,
}

impl ChangeReport {
    /// Changes recorded for `domain`
    pub fn for_domain(&self, domain: Domain) -> &[ChangeEntry] {
        match domain {
            Domain::Results => &self.results,
            Domain::Attendance => &self.attendance,
        }
    }

    /// Replace the changes recorded for `domain`
    pub fn set(&mut self, domain: Domain, changes: Vec<ChangeEntry>) {
        match domain {
            Domain::Results => self.results = changes,
            Domain::Attendance => self.attendance = changes,
        }
    }

    /// True when neither domain has anything to report
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.attendance.is_empty()
    }

    pub fn total(&self) -> usize {
        self.results.len() + self.attendance.len()
    }
}
