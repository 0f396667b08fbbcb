//! Driver loop: quit check, poll pass, render, delay.

use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::sensors::SamplingEngine;
use crate::ui::Presenter;

/// Logs a repeating failure at most once per minute.
struct RepeatedWarning {
    what: &'static str,
    consecutive_errors: u32,
    last_error_log: Instant,
}

impl RepeatedWarning {
    fn new(what: &'static str) -> Self {
        Self {
            what,
            consecutive_errors: 0,
            last_error_log: Instant::now(),
        }
    }

    fn record(&mut self, e: &anyhow::Error) {
        self.consecutive_errors += 1;
        let elapsed = self.last_error_log.elapsed();
        if self.consecutive_errors == 1 || elapsed >= Duration::from_secs(60) {
            if self.consecutive_errors > 1 {
                warn!(
                    "{} error (repeated {} times in {:?}): {}",
                    self.what, self.consecutive_errors, elapsed, e
                );
            } else {
                warn!("{} error: {}", self.what, e);
            }
            self.last_error_log = Instant::now();
            self.consecutive_errors = 0;
        }
    }

    fn clear(&mut self) {
        self.consecutive_errors = 0;
    }
}

/// Runs ticks until the presenter reports a quit or `shutdown` turns true,
/// then releases every channel.
///
/// Quit is only checked at the start of a tick, so a poll pass is never
/// interrupted. Presenter failures are logged and do not stop sampling.
pub async fn run<P: Presenter>(
    engine: &mut SamplingEngine,
    presenter: &mut P,
    tick: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut input_errors = RepeatedWarning::new("Input");
    let mut render_errors = RepeatedWarning::new("Render");

    loop {
        if *shutdown.borrow_and_update() {
            info!("Shutdown signal received");
            break;
        }
        match presenter.quit_requested() {
            Ok(true) => {
                info!("Quit requested");
                break;
            }
            Ok(false) => input_errors.clear(),
            Err(e) => input_errors.record(&e),
        }

        engine.poll_all();
        let snapshots = engine.snapshot_all();
        match presenter.render(&snapshots) {
            Ok(()) => render_errors.clear(),
            Err(e) => render_errors.record(&e),
        }

        tokio::select! {
            _ = tokio::time::sleep(tick) => {}
            changed = shutdown.changed() => {
                // Sender dropped: nobody can signal shutdown any more
                if changed.is_err() {
                    tokio::time::sleep(tick).await;
                }
            }
        }
    }

    engine.release_all();
    info!(
        "Stopped after {} poll passes, channels released",
        engine.passes()
    );
}
