//! PortalWatch Engine - cycle orchestration
//!
//! Drives fetch → parse → diff → notify → persist for both domains, and
//! repeats that on a fixed interval with at most one cycle in flight.

pub mod cycle;
pub mod scheduler;

pub use cycle::{CycleReport, DomainOutcome, NotificationStatus, Orchestrator};
pub use scheduler::{CycleGuard, CyclePermit, Scheduler, SchedulerStats};
