use std::sync::Arc;

/// Per-service gauge exported by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceGauge {
    /// `1` when the service carries a placement configuration, else `0`.
    DesiredState,
    /// Number of the service's tasks in the `running` state.
    RunningCount,
}

impl ServiceGauge {
    pub const ALL: [ServiceGauge; 2] = [ServiceGauge::DesiredState, ServiceGauge::RunningCount];

    /// Return the exported metric name.
    #[inline]
    pub fn as_metric_name(&self) -> &'static str {
        match self {
            ServiceGauge::DesiredState => "docker_swarm_service_desired_state",
            ServiceGauge::RunningCount => "docker_swarm_service_running_count",
        }
    }

    /// Return the metric help text.
    #[inline]
    pub fn help(&self) -> &'static str {
        match self {
            ServiceGauge::DesiredState => {
                "Desired state of Docker Swarm services (1 for active, 0 for inactive)"
            }
            ServiceGauge::RunningCount => "Number of running tasks for each Docker Swarm service",
        }
    }

    /// Reverse lookup from an exported metric name.
    pub fn from_metric_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_metric_name() == name)
    }
}

/// One exported value: gauge kind, `service_name` label and value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub gauge: ServiceGauge,
    pub service_name: String,
    pub value: f64,
}

/// Concurrency-safe store of per-service gauges.
///
/// Writes overwrite the previous value for the same `(gauge, service_name)` pair.
/// Nothing expires on its own; label values are stored exactly as given.
pub trait GaugeStore: Send + Sync + 'static {
    /// Overwrite the value of `gauge{service_name}`.
    fn set_gauge(&self, gauge: ServiceGauge, service_name: &str, value: f64);

    /// Enumerate every sample currently held.
    ///
    /// May run concurrently with [`GaugeStore::set_gauge`]; each sample is read atomically,
    /// the set as a whole is not a transactional snapshot.
    fn samples(&self) -> Vec<Sample>;
}

/// Shared handle to a gauge store.
pub type GaugeHandle = Arc<dyn GaugeStore>;
