//! Common model-level constants.

/// Label key carrying the service display name on every exported sample.
pub const LABEL_SERVICE_NAME: &str = "service_name";
