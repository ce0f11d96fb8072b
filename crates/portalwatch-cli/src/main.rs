//! PortalWatch CLI
//!
//! Watches the student portal for new results and attendance changes and
//! emails a summary when something changes.

use anyhow::Context;
use clap::Parser;
use portalwatch_core::config::AppConfig;
use portalwatch_core::logging_facility::{init, Profile};
use portalwatch_engine::Scheduler;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

mod app;

#[derive(Debug, Parser)]
#[command(name = "portalwatch")]
#[command(about = "Watch the student portal for result and attendance changes", long_about = None)]
struct Cli {
    /// Email the full current results and attendance once, then exit
    #[arg(long)]
    send_snapshot: bool,

    /// Write logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "portalwatch stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let orchestrator = Arc::new(app::build_orchestrator(&config)?);

    if cli.send_snapshot {
        orchestrator
            .send_snapshot()
            .await
            .context("Failed to send snapshot email")?;
        tracing::info!("Snapshot email sent");
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Interrupt received, finishing current cycle"),
            Err(e) => tracing::error!(error = %e, "Unable to listen for interrupt"),
        }
        on_signal.cancel();
    });

    let scheduler = Scheduler::new(config.check_interval);
    scheduler
        .run(
            move || {
                let orchestrator = Arc::clone(&orchestrator);
                async move {
                    orchestrator.run_check_cycle().await;
                }
            },
            shutdown,
        )
        .await;
    Ok(())
}
