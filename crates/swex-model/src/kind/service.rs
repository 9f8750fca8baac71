use serde::{Deserialize, Serialize};

use crate::domain::{ServiceId, ServiceName};

/// Task-placement configuration attached to a service template.
///
/// Only its presence matters for the desired-state signal; the constraints
/// are carried into reconciliation logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Scheduling constraints (e.g. `node.role==worker`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
}

/// Whether a service is configured to be scheduled at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredState {
    /// Placement configuration present.
    Active,
    /// No placement configuration.
    Inactive,
}

impl DesiredState {
    /// Gauge value for this state: `1` for active, `0` for inactive.
    #[inline]
    pub fn as_value(&self) -> f64 {
        match self {
            DesiredState::Active => 1.0,
            DesiredState::Inactive => 0.0,
        }
    }
}

/// Long-running workload as reported by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Stable identifier, used to filter tasks.
    pub id: ServiceId,

    /// Display name, used as the metric label.
    pub name: ServiceName,

    /// Task-placement configuration of the service template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

impl Service {
    pub fn new(id: ServiceId, name: impl Into<ServiceName>) -> Self {
        Self {
            id,
            name: name.into(),
            placement: None,
        }
    }

    /// Attach a placement configuration and return updated service.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Number of placement constraints; `0` when no placement is configured.
    pub fn constraint_count(&self) -> usize {
        self.placement.as_ref().map_or(0, |p| p.constraints.len())
    }

    /// Derive the desired state: present placement means active.
    #[inline]
    pub fn desired_state(&self) -> DesiredState {
        if self.placement.is_some() {
            DesiredState::Active
        } else {
            DesiredState::Inactive
        }
    }
}
