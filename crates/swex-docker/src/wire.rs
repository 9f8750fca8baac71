//! Docker Engine API payloads, reduced to the fields the exporter reads.
use serde::Deserialize;

use swex_core::OrchestratorError;
use swex_model::{Placement, Service, ServiceId, Task, TaskState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireService {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub spec: WireServiceSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireServiceSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub task_template: WireTaskTemplate,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireTaskTemplate {
    /// Present key (even `{}`) means configured; absent or `null` means not.
    #[serde(default)]
    pub placement: Option<WirePlacement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WirePlacement {
    #[serde(default)]
    pub constraints: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireTask {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "ServiceID")]
    pub service_id: String,
    #[serde(default)]
    pub status: WireTaskStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct WireTaskStatus {
    #[serde(default)]
    pub state: String,
}

/// Error body returned by the engine on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct WireError {
    pub message: String,
}

impl From<WirePlacement> for Placement {
    fn from(p: WirePlacement) -> Self {
        Placement {
            constraints: p.constraints.unwrap_or_default(),
        }
    }
}

impl TryFrom<WireService> for Service {
    type Error = OrchestratorError;
    fn try_from(w: WireService) -> Result<Self, Self::Error> {
        let id = ServiceId::new(w.id)
            .map_err(|e| OrchestratorError::Decode(format!("service: {e}")))?;
        Ok(Service {
            id,
            name: w.spec.name,
            placement: w.spec.task_template.placement.map(Placement::from),
        })
    }
}

impl TryFrom<WireTask> for Task {
    type Error = OrchestratorError;
    fn try_from(w: WireTask) -> Result<Self, Self::Error> {
        let service_id = ServiceId::new(w.service_id)
            .map_err(|e| OrchestratorError::Decode(format!("task {}: {e}", w.id)))?;
        Ok(Task::new(w.id, service_id, TaskState::from_wire(&w.status.state)))
    }
}
