//! One check cycle and the one-shot snapshot command.
//!
//! ## Cycle (per domain, attendance first)
//! 1. Fetch and parse; a failure is logged and isolates that domain
//! 2. No baseline yet: save the snapshot, report nothing
//! 3. Otherwise diff against the baseline
//!
//! After both domains, one combined email covers every change. Only when
//! it is sent are the changed domains' snapshots replaced. A login failure
//! aborts the cycle before any domain work.

mod orchestrator;
mod report;

pub use orchestrator::Orchestrator;
pub use report::{CycleReport, DomainOutcome, NotificationStatus};
