//! Wiring of the production collaborators

use anyhow::Context;
use portalwatch_core::config::AppConfig;
use portalwatch_engine::Orchestrator;
use portalwatch_notify::SmtpNotifier;
use portalwatch_portal::{HtmlTableParser, HttpPortal};
use portalwatch_store::FsSnapshotStore;
use std::sync::Arc;

pub fn build_orchestrator(config: &AppConfig) -> anyhow::Result<Orchestrator> {
    let notifier = SmtpNotifier::smtp(&config.email).context("Failed to set up email")?;
    tracing::info!(
        base_url = %config.portal.base_url,
        state_dir = %config.state_dir.display(),
        interval_secs = config.check_interval.as_secs(),
        "Configuration loaded"
    );

    Ok(Orchestrator::new(
        Arc::new(HttpPortal::new(config.portal.clone())),
        Arc::new(HtmlTableParser::from_settings(&config.portal)),
        Arc::new(notifier),
        Arc::new(FsSnapshotStore::new(config.state_dir.clone())),
        config.credentials.clone(),
    )
    .with_login_notification(config.notify_on_login))
}
