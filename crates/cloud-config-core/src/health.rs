//! Resolution health reporting
//!
//! A health report resolves every capability and records the outcome
//! instead of failing, so a running service can surface a bad provider on a
//! health endpoint rather than crashing.

use crate::capability::Capability;
use serde::Serialize;

/// Outcome of resolving one capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityHealth {
    pub capability: Capability,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CapabilityHealth {
    pub fn healthy(capability: Capability) -> Self {
        Self {
            capability,
            healthy: true,
            message: None,
        }
    }

    pub fn unhealthy(capability: Capability, message: impl Into<String>) -> Self {
        Self {
            capability,
            healthy: false,
            message: Some(message.into()),
        }
    }
}

/// Health of every capability under the active provider and environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverHealth {
    pub provider: String,
    pub environment: String,
    pub capabilities: Vec<CapabilityHealth>,
}

impl ResolverHealth {
    /// Check if every capability resolved
    pub fn all_healthy(&self) -> bool {
        self.capabilities.iter().all(|c| c.healthy)
    }

    pub fn unhealthy_count(&self) -> usize {
        self.capabilities.iter().filter(|c| !c.healthy).count()
    }

    /// First failure message, if any
    pub fn first_error(&self) -> Option<&str> {
        self.capabilities
            .iter()
            .find_map(|c| c.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let health = ResolverHealth {
            provider: "aws".into(),
            environment: "production".into(),
            capabilities: vec![
                CapabilityHealth::healthy(Capability::Storage),
                CapabilityHealth::unhealthy(Capability::Database, "boom"),
            ],
        };
        assert!(!health.all_healthy());
        assert_eq!(health.unhealthy_count(), 1);
        assert_eq!(health.first_error(), Some("boom"));
    }

    #[test]
    fn test_healthy_serialization_omits_message() {
        let json = serde_json::to_value(CapabilityHealth::healthy(Capability::Secrets)).unwrap();
        assert_eq!(json["capability"], "secrets");
        assert_eq!(json["healthy"], true);
        assert!(json.get("message").is_none());
    }
}
