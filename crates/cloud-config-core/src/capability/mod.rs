//! Capability Resolvers
//!
//! Each capability (storage, database, secrets) has exactly one resolver per
//! provider. Resolvers are pure functions of the provider and the raw
//! settings: they perform no I/O and hold no state.
//!
//! Dispatch is a closed `match` over [`ProviderIdentity`], so a provider added
//! to the enum fails to compile until every capability handles it.
//!
//! # Example
//!
//! ```rust
//! use cloud_config_core::capability::{self, Capability, CapabilityRecord};
//! use cloud_config_core::settings::{MapSource, RawSettings};
//!
//! let settings = RawSettings::new()
//!     .with_source(MapSource::new("test").with("CLOUD_STORAGE_BUCKET_NAME", "assets"));
//!
//! let record = capability::resolve(Capability::Storage, "aws", &settings).unwrap();
//! assert!(matches!(record, CapabilityRecord::Storage(_)));
//! assert_eq!(record.provider().as_str(), "aws");
//! ```

pub mod database;
pub mod secrets;
pub mod storage;

pub use database::{DatabaseBackend, DatabaseConfig, PostgresOptions};
pub use secrets::SecretsConfig;
pub use storage::StorageConfig;

use crate::error::{ConfigError, Result};
use crate::provider::ProviderIdentity;
use crate::settings::RawSettings;
use serde::Serialize;
use std::fmt;

/// Placeholder shown instead of a credential value
pub const REDACTED: &str = "********";

/// A logical service need resolved against the active provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Storage,
    Database,
    Secrets,
}

impl Capability {
    /// Every capability, in resolution order
    pub const ALL: [Capability; 3] = [Capability::Storage, Capability::Database, Capability::Secrets];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Storage => "storage",
            Capability::Database => "database",
            Capability::Secrets => "secrets",
        }
    }

    /// Validate a raw provider name in the context of this capability
    pub fn provider(&self, raw: &str) -> Result<ProviderIdentity> {
        raw.parse()
            .map_err(|_| ConfigError::unsupported_provider(*self, raw))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved record of any capability
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CapabilityRecord {
    Storage(StorageConfig),
    Database(DatabaseConfig),
    Secrets(SecretsConfig),
}

impl CapabilityRecord {
    /// Provider the record was shaped for
    pub fn provider(&self) -> ProviderIdentity {
        match self {
            CapabilityRecord::Storage(config) => config.provider(),
            CapabilityRecord::Database(config) => config.provider,
            CapabilityRecord::Secrets(config) => config.provider(),
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            CapabilityRecord::Storage(_) => Capability::Storage,
            CapabilityRecord::Database(_) => Capability::Database,
            CapabilityRecord::Secrets(_) => Capability::Secrets,
        }
    }
}

/// Resolve one capability for a raw provider name
pub fn resolve(capability: Capability, provider: &str, settings: &RawSettings) -> Result<CapabilityRecord> {
    let record = match capability {
        Capability::Storage => CapabilityRecord::Storage(storage::resolve(provider, settings)?),
        Capability::Database => CapabilityRecord::Database(database::resolve(provider, settings)?),
        Capability::Secrets => CapabilityRecord::Secrets(secrets::resolve(provider, settings)?),
    };
    Ok(record)
}

/// Mask a credential, keeping empty values visibly empty
pub(crate) fn mask(value: &mut String) {
    if !value.is_empty() {
        *value = REDACTED.to_string();
    }
}
