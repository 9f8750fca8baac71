use thiserror::Error;

/// Failure talking to the orchestrator control plane.
///
/// Every variant is non-fatal inside the polling loop.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("orchestrator returned status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("failed to decode orchestrator response: {0}")]
    Decode(String),

    #[error("invalid orchestrator configuration: {0}")]
    Config(String),
}

impl OrchestratorError {
    /// Short, low-cardinality classification for log fields.
    #[inline]
    pub fn as_kind(&self) -> &'static str {
        match self {
            OrchestratorError::Transport(_) => "transport",
            OrchestratorError::Status { .. } => "status",
            OrchestratorError::Decode(_) => "decode",
            OrchestratorError::Config(_) => "config",
        }
    }
}
