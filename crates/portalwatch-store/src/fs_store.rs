//! File-backed snapshot store
//!
//! Each domain lives in its own JSON file under the state directory
//! (`state.json` for results, `attendance_state.json` for attendance). The
//! file holds the literal record list, pretty-printed, `_key` included.

use crate::atomic::atomic_write;
use crate::errors::{io_error, save_failed, Result};
use portalwatch_core::model::{Domain, Record, Snapshot};
use portalwatch_core::SnapshotStore;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

/// Snapshot store rooted at one directory
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds `domain`'s baseline
    pub fn path_for(&self, domain: Domain) -> PathBuf {
        self.root.join(domain.state_file_name())
    }

    fn read_snapshot(&self, domain: Domain) -> Option<Snapshot> {
        let path = self.path_for(domain);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                tracing::debug!(domain = %domain, path = %path.display(), "No baseline yet");
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    domain = %domain,
                    path = %path.display(),
                    error = %io_error("load_snapshot", e),
                    "State file unreadable. Reinitializing baseline state."
                );
                return None;
            }
        };

        match serde_json::from_slice::<Snapshot>(&bytes) {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::warn!(
                    domain = %domain,
                    path = %path.display(),
                    error = %e,
                    "State file corrupted. Reinitializing baseline state."
                );
                None
            }
        }
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn load(&self, domain: Domain) -> Snapshot {
        let records = self.read_snapshot(domain).unwrap_or_default();
        tracing::debug!(domain = %domain, record_count = records.len(), "Loaded baseline");
        records
    }

    fn save(&self, domain: Domain, records: &[Record]) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| save_failed(domain, e.into()))?;
        let path = self.path_for(domain);
        atomic_write(&path, &json).map_err(|e| save_failed(domain, e))?;

        tracing::info!(
            domain = %domain,
            record_count = records.len(),
            digest = %hex::encode(Sha256::digest(&json)),
            path = %path.display(),
            "Saved baseline"
        );
        Ok(())
    }
}
