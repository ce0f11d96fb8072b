//! Record model
//!
//! One parsed portal table row is a [`Record`]: an open map from normalized
//! column name to string value. Results and attendance share the map shape
//! but differ in which columns exist and how row identity is derived.

pub mod capture;
pub mod domain;
pub mod record;
pub mod result_field;

pub use capture::{DomainCapture, SnapshotReport};
pub use domain::Domain;
pub use record::{
    attendance_key, clean_text, normalize_header, result_key, Record, Snapshot,
    ATTENDANCE_KEY_FIELD,
};
pub use result_field::{ResultField, RESULT_TRACKED_FIELDS};
