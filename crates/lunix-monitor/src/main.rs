//! Lunix:TNG Sensor Monitor
//!
//! Live terminal table of the battery, temperature and light readings of
//! every Lunix sensor, refreshed by polling the device nodes.

mod config;
mod driver;
mod sensors;
mod ui;

use anyhow::{Context, Result};
use lunix_hw::DeviceOpener;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::Config;
use sensors::SamplingEngine;
use ui::TerminalPresenter;

/// Environment variable that opts in to logging on stderr.
const LOG_STDERR_ENV: &str = "LUNIX_MONITOR_LOG_STDERR";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Monitoring {} sensors at {}<N>-{{batt,temp,light}}",
        config.sensors, config.device_prefix
    );

    let opener = DeviceOpener::new(config.device_prefix.clone());
    let mut engine = SamplingEngine::new(&opener, config.sensors, config.buffer);

    // Setup Unix signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("Received SIGINT, shutting down"),
        }
        let _ = shutdown_tx.send(true);
    });

    let mut presenter = match TerminalPresenter::new() {
        Ok(presenter) => presenter,
        Err(e) => {
            engine.release_all();
            return Err(e.context("Failed to set up the terminal"));
        }
    };

    driver::run(
        &mut engine,
        &mut presenter,
        config.tick_interval(),
        shutdown_rx,
    )
    .await;

    if let Err(e) = presenter.restore() {
        error!("Failed to restore terminal: {:#}", e);
    }
    info!("{} of {} sensors online at exit", engine.online_count(), config.sensors);
    Ok(())
}

/// Returns true when the opt-in variable holds a truthy value.
fn stderr_logging_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") | Some("YES")
    )
}

/// Sets up logging.
///
/// The table owns the terminal, so output is discarded unless
/// `LUNIX_MONITOR_LOG_STDERR` opts in (meant for `2>monitor.log`).
fn init_logging() -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("info".parse()?);
    let enabled = stderr_logging_enabled(std::env::var(LOG_STDERR_ENV).ok().as_deref());
    if enabled {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init();
    }
    Ok(())
}
