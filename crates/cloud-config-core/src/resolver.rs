//! Provider/Environment Resolver
//!
//! [`CloudConfig`] captures the active provider and environment once, when
//! it is built, and resolves every configuration record on demand from its
//! settings. It is immutable: to pick up a different provider or environment,
//! build a new value. Records are never cached, so changes to the underlying
//! settings are visible on the next call.
//!
//! # Example
//!
//! ```rust
//! use cloud_config_core::{CloudConfig, MapSource, RawSettings};
//!
//! let settings = RawSettings::new().with_source(
//!     MapSource::new("deploy")
//!         .with("CLOUD_PROVIDER", "aws")
//!         .with("DJANGO_ENV", "production")
//!         .with("ALLOWED_HOSTS", "api.example.com"),
//! );
//! let config = CloudConfig::from_settings(settings);
//!
//! assert_eq!(config.storage_config().unwrap().bucket(), "dev-app-assets");
//! assert!(config.cors_origins().is_empty());
//! assert_eq!(
//!     config.allowed_hosts(),
//!     vec!["*.amazonaws.com", "*.elasticbeanstalk.com", "api.example.com"]
//! );
//! ```

use crate::capability::{self, Capability, CapabilityRecord, DatabaseConfig, SecretsConfig, StorageConfig};
use crate::error::Result;
use crate::health::{CapabilityHealth, ResolverHealth};
use crate::network::{self, NetworkPolicy};
use crate::oauth::{self, OAuthProviderSet};
use crate::provider::{Environment, ProviderIdentity};
use crate::settings::{keys, RawSettings};
use serde::Serialize;

/// Immutable resolver over a provider/environment snapshot
#[derive(Debug, Clone)]
pub struct CloudConfig {
    provider: String,
    environment: Environment,
    settings: RawSettings,
}

impl CloudConfig {
    /// Read the provider and environment from the settings
    ///
    /// Never fails: missing values default to `gcp` / `development`, and an
    /// unknown provider is only reported when a capability is resolved.
    /// `DJANGO_ENV` decides the environment; `APP_ENV` is read only when it
    /// is unset.
    pub fn from_settings(settings: RawSettings) -> Self {
        let provider = settings.string(&keys::CLOUD_PROVIDER);
        let environment = settings
            .get(keys::DJANGO_ENV.name)
            .unwrap_or_else(|| settings.string(&keys::APP_ENV));

        let config = Self {
            provider: provider.trim().to_string(),
            environment: Environment::new(environment),
            settings,
        };
        tracing::debug!(
            provider = %config.provider,
            environment = %config.environment,
            sources = ?config.settings.source_names(),
            "cloud config initialized"
        );
        config
    }

    /// Resolver backed by the process environment
    pub fn from_env() -> Self {
        Self::from_settings(RawSettings::from_env())
    }

    /// Resolver with an explicit provider and environment
    pub fn new(provider: impl Into<String>, environment: impl Into<Environment>, settings: RawSettings) -> Self {
        Self {
            provider: provider.into().trim().to_string(),
            environment: environment.into(),
            settings,
        }
    }

    /// Raw provider name as configured
    pub fn provider_name(&self) -> &str {
        &self.provider
    }

    /// Active provider, if the configured name is supported
    pub fn provider(&self) -> Option<ProviderIdentity> {
        self.provider.parse().ok()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn settings(&self) -> &RawSettings {
        &self.settings
    }

    pub fn storage_config(&self) -> Result<StorageConfig> {
        capability::storage::resolve(&self.provider, &self.settings)
    }

    pub fn database_config(&self) -> Result<DatabaseConfig> {
        capability::database::resolve(&self.provider, &self.settings)
    }

    pub fn secrets_config(&self) -> Result<SecretsConfig> {
        capability::secrets::resolve(&self.provider, &self.settings)
    }

    /// Resolve any capability generically
    pub fn resolve(&self, capability: Capability) -> Result<CapabilityRecord> {
        capability::resolve(capability, &self.provider, &self.settings)
    }

    /// Fully configured OAuth vendors; never fails
    pub fn oauth_providers(&self) -> OAuthProviderSet {
        oauth::resolve_oauth(&self.settings, self.provider())
    }

    pub fn cors_origins(&self) -> Vec<String> {
        network::resolve_cors(&self.settings, &self.environment)
    }

    pub fn allowed_hosts(&self) -> Vec<String> {
        network::resolve_hosts(&self.settings, &self.environment, self.provider())
    }

    pub fn network_policy(&self) -> NetworkPolicy {
        NetworkPolicy::resolve(&self.settings, &self.environment, self.provider())
    }

    /// Resolve every capability, returning the first failure
    ///
    /// Intended for startup: a service should refuse to start when this fails.
    pub fn validate(&self) -> Result<()> {
        for capability in Capability::ALL {
            self.resolve(capability)?;
        }
        Ok(())
    }

    /// Resolve every capability and report the outcome without failing
    pub fn health(&self) -> ResolverHealth {
        let capabilities = Capability::ALL
            .iter()
            .map(|&capability| match self.resolve(capability) {
                Ok(_) => CapabilityHealth::healthy(capability),
                Err(e) => {
                    tracing::warn!(%capability, error = %e, "capability failed to resolve");
                    CapabilityHealth::unhealthy(capability, e.to_string())
                }
            })
            .collect();

        ResolverHealth {
            provider: self.provider.clone(),
            environment: self.environment.to_string(),
            capabilities,
        }
    }

    /// Resolve everything into one snapshot
    pub fn snapshot(&self) -> Result<ResolvedConfig> {
        let storage = self.storage_config()?;
        Ok(ResolvedConfig {
            provider: storage.provider(),
            environment: self.environment.clone(),
            storage,
            database: self.database_config()?,
            secrets: self.secrets_config()?,
            oauth: self.oauth_providers(),
            network: self.network_policy(),
        })
    }
}

/// Every resolved record for one provider/environment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub provider: ProviderIdentity,
    pub environment: Environment,
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
    pub secrets: SecretsConfig,
    pub oauth: OAuthProviderSet,
    pub network: NetworkPolicy,
}

impl ResolvedConfig {
    /// Copy with every credential masked
    pub fn redacted(&self) -> Self {
        Self {
            provider: self.provider,
            environment: self.environment.clone(),
            storage: self.storage.redacted(),
            database: self.database.redacted(),
            secrets: self.secrets.redacted(),
            oauth: self
                .oauth
                .iter()
                .map(|(name, entry)| (name.clone(), entry.redacted()))
                .collect(),
            network: self.network.clone(),
        }
    }
}
