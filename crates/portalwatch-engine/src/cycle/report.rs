use portalwatch_core::core_types::CycleId;
use portalwatch_core::diff::{ChangeEntry, ChangeReport};
use portalwatch_core::errors::PwError;
use portalwatch_core::model::{Domain, Snapshot};

/// What one domain contributed to a cycle
#[derive(Debug, Clone)]
pub enum DomainOutcome {
    /// Fetch, parse or baseline save failed; nothing was reported or stored
    Failed(PwError),
    /// First successful run: the snapshot became the baseline
    BaselineSaved { record_count: usize },
    /// Snapshot matches the baseline
    Unchanged,
    /// Changes found; `snapshot` replaces the baseline once notified
    Changed {
        changes: Vec<ChangeEntry>,
        snapshot: Snapshot,
    },
}

impl DomainOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, DomainOutcome::Failed(_))
    }

    pub fn changes(&self) -> &[ChangeEntry] {
        match self {
            DomainOutcome::Changed { changes, .. } => changes,
            _ => &[],
        }
    }
}

/// Fate of the combined change email
#[derive(Debug, Clone)]
pub enum NotificationStatus {
    /// Nothing changed, nothing sent
    NotNeeded,
    Sent,
    /// Sending failed; no baseline was advanced
    Failed(PwError),
}

/// Everything one check cycle did
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle_id: CycleId,
    /// Set when the session could not be opened or login failed
    pub login_error: Option<PwError>,
    /// Per-domain outcomes in processing order
    pub outcomes: Vec<(Domain, DomainOutcome)>,
    pub notification: NotificationStatus,
    /// Domains whose baseline was replaced after a successful notification
    pub advanced: Vec<Domain>,
}

impl CycleReport {
    pub(crate) fn new(cycle_id: CycleId) -> Self {
        Self {
            cycle_id,
            login_error: None,
            outcomes: Vec::new(),
            notification: NotificationStatus::NotNeeded,
            advanced: Vec::new(),
        }
    }

    /// True when login failed and no domain was checked
    pub fn aborted(&self) -> bool {
        self.login_error.is_some()
    }

    pub fn outcome(&self, domain: Domain) -> Option<&DomainOutcome> {
        self.outcomes
            .iter()
            .find(|(d, _)| *d == domain)
            .map(|(_, outcome)| outcome)
    }

    /// Combined changes of every domain that reported some
    pub fn change_report(&self) -> ChangeReport {
        let mut report = ChangeReport::default();
        for (domain, outcome) in &self.outcomes {
            report.set(*domain, outcome.changes().to_vec());
        }
        report
    }

    pub fn notification_sent(&self) -> bool {
        matches!(self.notification, NotificationStatus::Sent)
    }
}
