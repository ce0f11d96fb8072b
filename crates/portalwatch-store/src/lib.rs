//! PortalWatch Store - persisted baselines
//!
//! Provides:
//! - File-backed snapshot store, one pretty-printed JSON file per domain
//! - Atomic temp→rename writes so a crash never leaves a half-written file
//! - In-memory store for tests and dry runs

pub mod errors;
pub mod fs_store;
pub mod memory;

mod atomic;

pub use errors::Result;
pub use fs_store::FsSnapshotStore;
pub use memory::MemorySnapshotStore;
