//! Fixed-interval driver for the [`Reconciler`].
//!
//! The first cycle starts immediately. The interval is measured from the end
//! of one cycle to the start of the next, so a slow orchestrator delays the
//! following cycle instead of stacking them.
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{Level, debug, info, warn};

use crate::reconciler::{CycleOutcome, Reconciler};

/// Default delay between polling cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Polling loop around a [`Reconciler`].
pub struct Scheduler {
    reconciler: Reconciler,
    interval: Duration,
}

impl Scheduler {
    pub fn new(reconciler: Reconciler, interval: Duration) -> Self {
        Self {
            reconciler,
            interval,
        }
    }

    /// Create a scheduler with [`DEFAULT_POLL_INTERVAL`].
    pub fn with_default_interval(reconciler: Reconciler) -> Self {
        Self::new(reconciler, DEFAULT_POLL_INTERVAL)
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run cycles until `cancel` fires.
    ///
    /// Cancellation is observed both while waiting and while a cycle is in flight;
    /// an interrupted cycle leaves already-written gauges in place.
    /// Returns the number of cycles that ran to completion.
    pub async fn run(self, cancel: CancellationToken) -> u64 {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "service poller started"
        );
        let mut cycles: u64 = 0;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                outcome = self.reconciler.reconcile() => {
                    cycles += 1;
                    log_outcome(cycles, outcome);
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(cycles, "service poller stopped");
        cycles
    }
}

/// Level of the per-cycle summary: quiet for clean cycles, louder when
/// something was skipped.
fn summary_level(outcome: &CycleOutcome) -> Level {
    match outcome {
        CycleOutcome::Skipped => Level::WARN,
        CycleOutcome::Completed(report) if report.task_failures > 0 => Level::INFO,
        CycleOutcome::Completed(_) => Level::DEBUG,
    }
}

fn log_outcome(cycle: u64, outcome: CycleOutcome) {
    let level = summary_level(&outcome);
    match outcome {
        CycleOutcome::Skipped => warn!(cycle, "poll cycle skipped, gauges left unchanged"),
        CycleOutcome::Completed(report) if level == Level::INFO => info!(
            cycle,
            services = report.services,
            failures = report.task_failures,
            running = report.running,
            "poll cycle completed with task listing failures"
        ),
        CycleOutcome::Completed(report) => debug!(
            cycle,
            services = report.services,
            failures = report.task_failures,
            running = report.running,
            "poll cycle completed"
        ),
    }
}
