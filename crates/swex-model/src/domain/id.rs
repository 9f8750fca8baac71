use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Stable orchestrator-assigned identifier of a service.
///
/// Used to filter task listings; unlike the display name it never changes
/// for the lifetime of the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    /// Create a service id, rejecting empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> ModelResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ModelError::EmptyServiceId);
        }
        Ok(Self(id))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_ids() {
        assert!(matches!(ServiceId::new(""), Err(ModelError::EmptyServiceId)));
        assert!(matches!(ServiceId::new("  "), Err(ModelError::EmptyServiceId)));
    }

    #[test]
    fn keeps_id_verbatim() {
        let id = ServiceId::new("9mnpnzenvg8p8tdbtq4wvbkcz").unwrap();
        assert_eq!(id.as_str(), "9mnpnzenvg8p8tdbtq4wvbkcz");
        assert_eq!(id.to_string(), "9mnpnzenvg8p8tdbtq4wvbkcz");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ServiceId::new("abc").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc""#);
    }
}
