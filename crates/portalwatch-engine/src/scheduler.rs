//! Fixed-interval runner with a single-flight guard
//!
//! The first tick fires immediately. A tick that arrives while the previous
//! job is still running is dropped, never queued. On shutdown the loop stops
//! taking ticks and waits for the in-flight job, so a cycle is never cut off
//! halfway through writing a snapshot.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Busy flag allowing at most one job at a time
#[derive(Debug, Clone, Default)]
pub struct CycleGuard {
    busy: Arc<AtomicBool>,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the flag, or `None` if a job already holds it
    pub fn try_acquire(&self) -> Option<CyclePermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CyclePermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Held for the duration of one job; releases the guard on drop
#[derive(Debug)]
pub struct CyclePermit {
    busy: Arc<AtomicBool>,
}

impl Drop for CyclePermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Tick counters reported when the scheduler stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub started: u64,
    pub skipped: u64,
}

/// Owned interval scheduler
#[derive(Debug)]
pub struct Scheduler {
    interval: Duration,
    guard: CycleGuard,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            guard: CycleGuard::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn guard(&self) -> &CycleGuard {
        &self.guard
    }

    /// Run `job` every interval until `shutdown` is cancelled
    ///
    /// Each job runs on its own task so ticks keep being observed (and
    /// skipped) while it is in flight.
    pub async fn run<F, Fut>(&self, job: F, shutdown: CancellationToken) -> SchedulerStats
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut stats = SchedulerStats::default();
        let mut in_flight: Option<JoinHandle<()>> = None;

        tracing::info!(interval_secs = self.interval.as_secs(), "Scheduler started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    tracing::info!("Scheduler shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    match self.guard.try_acquire() {
                        Some(permit) => {
                            stats.started += 1;
                            let fut = job();
                            in_flight = Some(tokio::spawn(async move {
                                fut.await;
                                drop(permit);
                            }));
                        }
                        None => {
                            stats.skipped += 1;
                            tracing::warn!("Previous cycle still running; skipping this tick");
                        }
                    }
                }
            }
        }

        if let Some(handle) = in_flight {
            if !handle.is_finished() {
                tracing::info!("Waiting for the running cycle to finish");
            }
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Cycle task ended abnormally");
            }
        }

        tracing::info!(
            started = stats.started,
            skipped = stats.skipped,
            "Scheduler stopped"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_single_flight() {
        let guard = CycleGuard::new();

        let permit = guard.try_acquire().expect("first acquire succeeds");
        assert!(guard.is_busy());
        assert!(guard.try_acquire().is_none());

        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn test_cloned_guard_shares_flag() {
        let guard = CycleGuard::new();
        let other = guard.clone();

        let _permit = guard.try_acquire().unwrap();
        assert!(other.try_acquire().is_none());
    }
}
