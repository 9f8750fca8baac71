//! One polling cycle: list services, list each service's tasks, write gauges.
//!
//! Per service the pair of gauges is first reset to `0`, then desired state is
//! derived from the placement configuration and the running count from the
//! task listing. A failed task listing leaves the running count at the reset
//! value. A failed service listing leaves the store untouched.
use swex_model::{Service, Task};
use tracing::{debug, instrument, warn};

use crate::{
    error::OrchestratorError,
    metrics::{GaugeHandle, ServiceGauge},
    orchestrator::OrchestratorHandle,
};

/// Summary of a cycle that got past the service listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Services returned by the listing.
    pub services: usize,
    /// Services whose task listing failed.
    pub task_failures: usize,
    /// Running tasks across all services with a successful task listing.
    pub running: usize,
}

/// Result of a single [`Reconciler::reconcile`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Service listing failed; no gauge was touched.
    Skipped,
    /// Every listed service was processed.
    Completed(CycleReport),
}

/// Derives per-service gauges from live orchestrator state.
#[derive(Clone)]
pub struct Reconciler {
    orchestrator: OrchestratorHandle,
    gauges: GaugeHandle,
}

impl Reconciler {
    pub fn new(orchestrator: OrchestratorHandle, gauges: GaugeHandle) -> Self {
        Self {
            orchestrator,
            gauges,
        }
    }

    /// Run one cycle.
    ///
    /// Orchestrator errors are logged and absorbed; this never fails.
    pub async fn reconcile(&self) -> CycleOutcome {
        let services = match self.orchestrator.list_services().await {
            Ok(services) => services,
            Err(e) => {
                warn!(error = %e, kind = e.as_kind(), "failed to list services, skipping cycle");
                return CycleOutcome::Skipped;
            }
        };

        let mut report = CycleReport {
            services: services.len(),
            ..Default::default()
        };
        for service in &services {
            match self.reconcile_service(service).await {
                Ok(running) => report.running += running,
                Err(e) => {
                    report.task_failures += 1;
                    warn!(
                        service = %service.name,
                        service_id = %service.id,
                        error = %e,
                        kind = e.as_kind(),
                        "failed to list tasks for service"
                    );
                }
            }
        }
        CycleOutcome::Completed(report)
    }

    #[instrument(level = "debug", skip(self, service), fields(service = %service.name))]
    async fn reconcile_service(&self, service: &Service) -> Result<usize, OrchestratorError> {
        let name = service.name.as_str();

        self.gauges.set_gauge(ServiceGauge::DesiredState, name, 0.0);
        self.gauges.set_gauge(ServiceGauge::RunningCount, name, 0.0);

        let desired = service.desired_state();
        self.gauges
            .set_gauge(ServiceGauge::DesiredState, name, desired.as_value());

        let tasks = self.orchestrator.list_tasks(&service.id).await?;
        let running = count_running(&tasks);
        self.gauges
            .set_gauge(ServiceGauge::RunningCount, name, running as f64);

        debug!(
            desired = ?desired,
            constraints = service.constraint_count(),
            tasks = tasks.len(),
            running,
            "service reconciled"
        );
        Ok(running)
    }
}

/// Count tasks in the `running` state.
#[inline]
pub fn count_running(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.is_running()).count()
}
