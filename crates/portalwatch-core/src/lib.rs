//! PortalWatch Core - record model and change detection
//!
//! This crate holds everything about a portal check that does not do I/O:
//! - Record and snapshot model for results and attendance
//! - Change detection between a baseline and a fresh snapshot
//! - Plain-text rendering of change and snapshot emails
//! - Error and logging facilities shared by every crate
//! - Configuration loading and the collaborator traits the engine drives

pub use portalwatch_core_types as core_types;

pub mod collaborators;
pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod render;

pub use collaborators::{Notifier, Portal, PortalSession, RecordParser, SnapshotStore};
pub use config::{AppConfig, EmailSettings, PortalCredentials, PortalSettings};
pub use diff::{ChangeEntry, ChangeReport, FieldChange};
pub use errors::{ErrorKind, PwError, Result};
pub use model::{Domain, DomainCapture, Record, Snapshot, SnapshotReport};
