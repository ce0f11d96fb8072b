use super::report::{CycleReport, DomainOutcome, NotificationStatus};
use portalwatch_core::config::PortalCredentials;
use portalwatch_core::core_types::CycleId;
use portalwatch_core::diff::{diff, ChangeReport};
use portalwatch_core::errors::Result;
use portalwatch_core::model::{Domain, DomainCapture, Snapshot, SnapshotReport};
use portalwatch_core::{
    log_op_end, log_op_error, log_op_start, Notifier, Portal, PortalSession, RecordParser,
    SnapshotStore,
};
use std::sync::Arc;
use std::time::Instant;

/// Owns the collaborators of a check cycle
///
/// Cheap to share behind an `Arc`; each cycle opens its own portal session,
/// so nothing but the on-disk snapshots carries over between cycles.
pub struct Orchestrator {
    portal: Arc<dyn Portal>,
    parser: Arc<dyn RecordParser>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn SnapshotStore>,
    credentials: PortalCredentials,
    notify_on_login: bool,
}

impl Orchestrator {
    pub fn new(
        portal: Arc<dyn Portal>,
        parser: Arc<dyn RecordParser>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn SnapshotStore>,
        credentials: PortalCredentials,
    ) -> Self {
        Self {
            portal,
            parser,
            notifier,
            store,
            credentials,
            notify_on_login: false,
        }
    }

    /// Also send a confirmation email after every successful login
    pub fn with_login_notification(mut self, enabled: bool) -> Self {
        self.notify_on_login = enabled;
        self
    }

    async fn open_authenticated_session(&self) -> Result<Box<dyn PortalSession>> {
        let mut session = self.portal.open_session()?;
        session.authenticate(&self.credentials).await?;
        tracing::info!("Login successful");

        if self.notify_on_login {
            if let Err(e) = self.notifier.notify_login().await {
                tracing::warn!(error = %e, "Login confirmation email failed");
            }
        }
        Ok(session)
    }

    async fn fetch_snapshot(
        &self,
        session: &mut dyn PortalSession,
        domain: Domain,
    ) -> Result<Snapshot> {
        let html = session.fetch(domain).await?;
        self.parser.parse(domain, &html)
    }

    async fn check_domain(
        &self,
        session: &mut dyn PortalSession,
        domain: Domain,
        cycle_id: &CycleId,
    ) -> DomainOutcome {
        let start = Instant::now();
        log_op_start!("check_domain", domain = %domain, cycle_id = %cycle_id);

        let current = match self.fetch_snapshot(session, domain).await {
            Ok(records) => records,
            Err(e) => {
                log_op_error!(
                    "check_domain",
                    e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    domain = %domain,
                    cycle_id = %cycle_id
                );
                return DomainOutcome::Failed(e);
            }
        };

        let previous = self.store.load(domain);
        let outcome = if previous.is_empty() {
            match self.store.save(domain, &current) {
                Ok(()) => {
                    tracing::info!(
                        domain = %domain,
                        record_count = current.len(),
                        "No baseline yet; stored current snapshot without notifying"
                    );
                    DomainOutcome::BaselineSaved {
                        record_count: current.len(),
                    }
                }
                Err(e) => {
                    log_op_error!(
                        "save_baseline",
                        e,
                        duration_ms = start.elapsed().as_millis() as u64,
                        domain = %domain,
                        cycle_id = %cycle_id
                    );
                    DomainOutcome::Failed(e)
                }
            }
        } else {
            let changes = diff(domain, &previous, &current);
            if changes.is_empty() {
                DomainOutcome::Unchanged
            } else {
                DomainOutcome::Changed {
                    changes,
                    snapshot: current,
                }
            }
        };

        log_op_end!(
            "check_domain",
            duration_ms = start.elapsed().as_millis() as u64,
            domain = %domain,
            change_count = outcome.changes().len(),
            cycle_id = %cycle_id
        );
        outcome
    }

    /// Replace the baseline of every domain that reported changes
    fn advance_baselines(&self, report: &mut CycleReport) {
        let changed: Vec<(Domain, &Snapshot)> = report
            .outcomes
            .iter()
            .filter_map(|(domain, outcome)| match outcome {
                DomainOutcome::Changed { snapshot, .. } => Some((*domain, snapshot)),
                _ => None,
            })
            .collect();

        let mut advanced = Vec::new();
        for (domain, snapshot) in changed {
            match self.store.save(domain, snapshot) {
                Ok(()) => {
                    tracing::info!(domain = %domain, "Baseline updated with latest data");
                    advanced.push(domain);
                }
                Err(e) => {
                    log_op_error!(
                        "advance_baseline",
                        e,
                        duration_ms = 0u64,
                        domain = %domain,
                        cycle_id = %report.cycle_id
                    );
                }
            }
        }
        report.advanced = advanced;
    }

    /// Run one full check cycle
    ///
    /// Never fails as a whole: every error is logged and recorded in the
    /// returned report.
    pub async fn run_check_cycle(&self) -> CycleReport {
        let start = Instant::now();
        let mut report = CycleReport::new(CycleId::new());
        log_op_start!("check_cycle", cycle_id = %report.cycle_id);

        let mut session = match self.open_authenticated_session().await {
            Ok(session) => session,
            Err(e) => {
                log_op_error!(
                    "check_cycle",
                    e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    cycle_id = %report.cycle_id
                );
                report.login_error = Some(e);
                return report;
            }
        };

        for domain in Domain::CHECK_ORDER {
            let outcome = self
                .check_domain(session.as_mut(), domain, &report.cycle_id)
                .await;
            report.outcomes.push((domain, outcome));
        }

        let changes = report.change_report();
        if changes.is_empty() {
            tracing::info!(cycle_id = %report.cycle_id, "No changes detected");
        } else {
            report.notification = self.notify(&changes, &report.cycle_id).await;
            if report.notification_sent() {
                self.advance_baselines(&mut report);
            }
        }

        log_op_end!(
            "check_cycle",
            duration_ms = start.elapsed().as_millis() as u64,
            change_count = changes.total(),
            cycle_id = %report.cycle_id
        );
        report
    }

    async fn notify(&self, changes: &ChangeReport, cycle_id: &CycleId) -> NotificationStatus {
        match self.notifier.notify_changes(changes).await {
            Ok(()) => NotificationStatus::Sent,
            Err(e) => {
                tracing::error!(
                    cycle_id = %cycle_id,
                    err.code = e.code(),
                    error = %e,
                    "Notification failed; baselines left untouched"
                );
                NotificationStatus::Failed(e)
            }
        }
    }

    /// Email the full current content of both domains
    ///
    /// Login and send failures are returned; a domain that cannot be fetched
    /// or parsed is reported inside the email instead. Baselines are never
    /// touched.
    pub async fn send_snapshot(&self) -> Result<SnapshotReport> {
        let start = Instant::now();
        let cycle_id = CycleId::new();
        log_op_start!("send_snapshot", cycle_id = %cycle_id);

        let result = self.capture_and_send(&cycle_id).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                log_op_end!("send_snapshot", duration_ms = duration_ms, cycle_id = %cycle_id);
            }
            Err(e) => {
                log_op_error!("send_snapshot", e, duration_ms = duration_ms, cycle_id = %cycle_id);
            }
        }
        result
    }

    async fn capture_and_send(&self, cycle_id: &CycleId) -> Result<SnapshotReport> {
        let mut session = self.open_authenticated_session().await?;

        let capture = |outcome: Result<Snapshot>, domain: Domain| match outcome {
            Ok(records) => DomainCapture::Records(records),
            Err(e) => {
                tracing::warn!(domain = %domain, cycle_id = %cycle_id, error = %e, "Snapshot capture failed");
                DomainCapture::Failed(e.message().to_string())
            }
        };

        let mut report = SnapshotReport::default();
        for domain in Domain::CHECK_ORDER {
            let outcome = self.fetch_snapshot(session.as_mut(), domain).await;
            report.set(domain, capture(outcome, domain));
        }

        self.notifier.send_snapshot(&report).await?;
        Ok(report)
    }
}
