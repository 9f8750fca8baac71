use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::domain::ServiceId;

/// Lifecycle state of a task, as reported by the orchestrator.
///
/// Parsing is an exact, case-sensitive match against the orchestrator
/// vocabulary. Anything else lands in [`TaskState::Other`] with the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskState {
    New,
    Allocated,
    Pending,
    Assigned,
    Accepted,
    Preparing,
    Ready,
    Starting,
    /// The only state counted by the running-count signal.
    Running,
    Complete,
    Shutdown,
    Failed,
    Rejected,
    Remove,
    Orphaned,
    /// State string outside the known vocabulary.
    Other(String),
}

impl TaskState {
    /// Classify a raw state string.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "new" => Self::New,
            "allocated" => Self::Allocated,
            "pending" => Self::Pending,
            "assigned" => Self::Assigned,
            "accepted" => Self::Accepted,
            "preparing" => Self::Preparing,
            "ready" => Self::Ready,
            "starting" => Self::Starting,
            "running" => Self::Running,
            "complete" => Self::Complete,
            "shutdown" => Self::Shutdown,
            "failed" => Self::Failed,
            "rejected" => Self::Rejected,
            "remove" => Self::Remove,
            "orphaned" => Self::Orphaned,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            TaskState::New => "new",
            TaskState::Allocated => "allocated",
            TaskState::Pending => "pending",
            TaskState::Assigned => "assigned",
            TaskState::Accepted => "accepted",
            TaskState::Preparing => "preparing",
            TaskState::Ready => "ready",
            TaskState::Starting => "starting",
            TaskState::Running => "running",
            TaskState::Complete => "complete",
            TaskState::Shutdown => "shutdown",
            TaskState::Failed => "failed",
            TaskState::Rejected => "rejected",
            TaskState::Remove => "remove",
            TaskState::Orphaned => "orphaned",
            TaskState::Other(s) => s,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, TaskState::Running)
    }
}

impl Default for TaskState {
    fn default() -> Self {
        Self::New
    }
}

impl FromStr for TaskState {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_wire(s))
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&s))
    }
}

/// One instance of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub service_id: ServiceId,
    pub state: TaskState,
}

impl Task {
    pub fn new(id: impl Into<String>, service_id: ServiceId, state: TaskState) -> Self {
        Self {
            id: id.into(),
            service_id,
            state,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_vocabulary() {
        for s in [
            "new", "allocated", "pending", "assigned", "accepted", "preparing", "ready",
            "starting", "running", "complete", "shutdown", "failed", "rejected", "remove",
            "orphaned",
        ] {
            let state = TaskState::from_wire(s);
            assert!(
                !matches!(state, TaskState::Other(_)),
                "{s:?} should be a known state"
            );
            assert_eq!(state.as_str(), s);
        }
    }

    #[test]
    fn only_exact_running_is_running() {
        assert!(TaskState::from_wire("running").is_running());

        for s in ["Running", "RUNNING", " running", "running ", "run", ""] {
            let state = TaskState::from_wire(s);
            assert!(!state.is_running(), "{s:?} must not count as running");
            assert_eq!(state, TaskState::Other(s.to_string()));
        }
    }

    #[test]
    fn unknown_state_keeps_raw_value() {
        let state: TaskState = "paused".parse().unwrap();
        assert_eq!(state.to_string(), "paused");
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&TaskState::Running).unwrap();
        assert_eq!(json, r#""running""#);

        let parsed: TaskState = serde_json::from_str(r#""weird""#).unwrap();
        assert_eq!(parsed, TaskState::Other("weird".into()));
    }
}
