pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod reconciler;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use error::OrchestratorError;
pub use metrics::{GaugeHandle, GaugeStore, MemoryGauges, Sample, ServiceGauge, memory_gauges};
pub use orchestrator::{Orchestrator, OrchestratorHandle};
pub use reconciler::{CycleOutcome, CycleReport, Reconciler};
pub use scheduler::{DEFAULT_POLL_INTERVAL, Scheduler};

pub mod prelude {
    pub use crate::error::OrchestratorError;
    pub use crate::metrics::{GaugeHandle, GaugeStore, ServiceGauge};
    pub use crate::orchestrator::{Orchestrator, OrchestratorHandle};
    pub use crate::reconciler::Reconciler;
    pub use crate::scheduler::Scheduler;
}
