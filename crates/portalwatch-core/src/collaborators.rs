//! Collaborator seams for the check cycle
//!
//! The orchestrator only talks to the outside world through these traits, so
//! the cycle can be exercised end to end with in-memory fakes. Concrete
//! implementations live in `portalwatch-portal`, `portalwatch-notify` and
//! `portalwatch-store`.

use crate::config::PortalCredentials;
use crate::diff::ChangeReport;
use crate::errors::Result;
use crate::model::{Domain, Record, Snapshot, SnapshotReport};
use async_trait::async_trait;

/// Opens a fresh authenticated-capable session per cycle
pub trait Portal: Send + Sync {
    fn open_session(&self) -> Result<Box<dyn PortalSession>>;
}

/// One cookie-holding conversation with the portal
#[async_trait]
pub trait PortalSession: Send {
    /// Log in; any failure aborts the cycle
    async fn authenticate(&mut self, credentials: &PortalCredentials) -> Result<()>;

    /// Raw HTML of the page that holds `domain`'s table
    async fn fetch(&mut self, domain: Domain) -> Result<String>;
}

/// Turns a fetched page into an ordered snapshot
pub trait RecordParser: Send + Sync {
    fn parse(&self, domain: Domain, html: &str) -> Result<Snapshot>;
}

/// Outgoing email
#[async_trait]
pub trait Notifier: Send + Sync {
    /// One combined email for every domain that changed
    async fn notify_changes(&self, report: &ChangeReport) -> Result<()>;

    /// Full listing of both domains
    async fn send_snapshot(&self, report: &SnapshotReport) -> Result<()>;

    /// Login confirmation; callers treat failures as non-fatal
    async fn notify_login(&self) -> Result<()>;
}

/// Last-known snapshot per domain
///
/// `load` never fails: a missing or unreadable baseline is reported as an
/// empty snapshot, which the cycle treats as "first run".
pub trait SnapshotStore: Send + Sync {
    fn load(&self, domain: Domain) -> Snapshot;

    fn save(&self, domain: Domain, records: &[Record]) -> Result<()>;
}
