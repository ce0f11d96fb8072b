//! Full-snapshot captures for the one-shot snapshot email

use super::domain::Domain;
use super::record::Snapshot;

/// What one domain produced during a snapshot run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainCapture {
    /// The page was fetched and parsed
    Records(Snapshot),
    /// Fetching or parsing failed; carries the error text for the email
    Failed(String),
}

/// Captures of both domains, reported together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotReport {
    pub results: DomainCapture,
    pub attendance: DomainCapture,
}

impl Default for SnapshotReport {
    fn default() -> Self {
        Self {
            results: DomainCapture::Records(Vec::new()),
            attendance: DomainCapture::Records(Vec::new()),
        }
    }
}

impl SnapshotReport {
    /// Store the capture of `domain`, replacing any earlier one
    pub fn set(&mut self, domain: Domain, capture: DomainCapture) {
        match domain {
            Domain::Results => self.results = capture,
            Domain::Attendance => self.attendance = capture,
        }
    }

    pub fn for_domain(&self, domain: Domain) -> &DomainCapture {
        match domain {
            Domain::Results => &self.results,
            Domain::Attendance => &self.attendance,
        }
    }
}
