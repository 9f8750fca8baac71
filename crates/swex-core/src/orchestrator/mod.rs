//! Read-only view of the cluster orchestrator consumed by the reconciler.
use std::sync::Arc;

use async_trait::async_trait;
use swex_model::{Service, ServiceId, Task};

use crate::error::OrchestratorError;

/// Orchestrator query interface.
///
/// Implementations issue the network calls (Docker Engine API, test fakes, etc).
/// Neither call is retried or timed out by the core.
#[async_trait]
pub trait Orchestrator: Send + Sync + 'static {
    /// List every service known to the cluster.
    async fn list_services(&self) -> Result<Vec<Service>, OrchestratorError>;

    /// List the tasks belonging to a single service.
    async fn list_tasks(&self, service: &ServiceId) -> Result<Vec<Task>, OrchestratorError>;
}

/// Shared handle to an orchestrator client.
pub type OrchestratorHandle = Arc<dyn Orchestrator>;
