//! In-memory snapshot store

use crate::errors::Result;
use portalwatch_core::errors::{ErrorKind, PwError};
use portalwatch_core::model::{Domain, Record, Snapshot};
use portalwatch_core::SnapshotStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Snapshot store backed by a map, with an optional write failure switch
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshots: Mutex<HashMap<Domain, Snapshot>>,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a baseline for one domain
    pub fn with_baseline(domain: Domain, records: Snapshot) -> Self {
        let store = Self::new();
        store.put(domain, records);
        store
    }

    pub fn put(&self, domain: Domain, records: Snapshot) {
        if let Ok(mut snapshots) = self.snapshots.lock() {
            snapshots.insert(domain, records);
        }
    }

    /// Make every subsequent `save` fail with a persistence error
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, domain: Domain) -> Snapshot {
        self.snapshots
            .lock()
            .ok()
            .and_then(|snapshots| snapshots.get(&domain).cloned())
            .unwrap_or_default()
    }

    fn save(&self, domain: Domain, records: &[Record]) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PwError::new(ErrorKind::Persistence)
                .with_op("save_snapshot")
                .with_domain(domain.as_str())
                .with_message("save disabled"));
        }
        self.put(domain, records.to_vec());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
