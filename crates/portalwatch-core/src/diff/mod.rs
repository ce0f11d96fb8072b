//! Snapshot change detection.
//!
//! Compares a freshly parsed snapshot against the persisted baseline of the
//! same domain and produces an ordered list of [`ChangeEntry`] values.
//!
//! ## Entry points
//!
//! ```
//! use portalwatch_core::diff::{diff_results, render_changes};
//! use portalwatch_core::model::{Domain, Record};
//!
//! let before: Vec<Record> = vec![[("semester", "3"), ("course_code", "CS301"), ("grade", "B")]
//!     .into_iter()
//!     .collect()];
//! let after: Vec<Record> = vec![[("semester", "3"), ("course_code", "CS301"), ("grade", "A")]
//!     .into_iter()
//!     .collect()];
//!
//! let changes = diff_results(&before, &after);
//! assert_eq!(changes.len(), 1);
//! let text = render_changes(Domain::Results, &changes);
//! assert!(text.contains("grade: B -> A"));
//! ```
//!
//! ## Guarantees
//!
//! - **Order**: entries follow the first-seen key order of the current snapshot.
//! - **Self-diff is empty**: `diff(s, s)` never reports anything.
//! - **No removals**: keys that exist only in the baseline are not reported.
//! - **Fixed vs open comparison**: results compare only `grade` and `result`;
//!   attendance compares the union of all non-identity fields.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{diff, diff_attendance, diff_results};
pub use human_summary::{render_change, render_changes};
pub use model::{ChangeEntry, ChangeReport, FieldChange};
