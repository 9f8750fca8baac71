mod id;
pub use id::ServiceId;

mod constants;
pub use constants::LABEL_SERVICE_NAME;

/// Human-readable service name as reported by the orchestrator.
///
/// Used verbatim as the metric label value; never normalized.
pub type ServiceName = String;
