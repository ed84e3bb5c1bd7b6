//! Error types for configuration resolution
//!
//! Missing or blank settings are never errors; they resolve to documented
//! defaults. The only resolution failure is an unsupported provider, which is
//! reported at the capability that first needs it.

use crate::capability::Capability;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading settings or resolving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The active provider is outside the supported set
    #[error("unsupported provider '{provider}' for {capability} config")]
    UnsupportedProvider {
        capability: Capability,
        provider: String,
    },

    /// A `.env` file could not be read or parsed
    #[error("failed to load env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

impl ConfigError {
    /// Create an unsupported provider error
    pub fn unsupported_provider(capability: Capability, provider: impl Into<String>) -> Self {
        ConfigError::UnsupportedProvider {
            capability,
            provider: provider.into(),
        }
    }

    /// Check if this error comes from operator input (vs. a resolution defect)
    pub fn is_user_error(&self) -> bool {
        matches!(self, ConfigError::EnvFile { .. })
    }
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_provider_message() {
        let err = ConfigError::unsupported_provider(Capability::Storage, "digitalocean");
        assert_eq!(
            err.to_string(),
            "unsupported provider 'digitalocean' for storage config"
        );
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_env_file_is_user_error() {
        let err = ConfigError::EnvFile {
            path: PathBuf::from("/nonexistent/.env"),
            source: dotenvy::Error::LineParse("BROKEN LINE".into(), 6),
        };
        assert!(err.is_user_error());
        assert!(err.to_string().contains("/nonexistent/.env"));
    }
}
