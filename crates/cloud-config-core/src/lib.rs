//! Cloud Config Core
//!
//! Resolves logical service intents into provider-shaped configuration for
//! the active cloud provider (GCP, AWS or Azure) and deployment environment,
//! so calling code never branches on the provider itself.
//!
//! ## Components
//!
//! 1. **Settings** (`settings/`): priority chain of raw setting sources
//!    (process environment, `.env` files, explicit overrides) with typed,
//!    total accessors over a catalogue of documented defaults.
//!
//! 2. **Resolver** (`resolver`): [`CloudConfig`] captures the provider and
//!    environment once and resolves every record on demand.
//!
//! 3. **Capabilities** (`capability/`): storage, database and secrets
//!    resolvers, one per provider, dispatched by a closed `match`.
//!
//! 4. **OAuth** (`oauth`): emits only fully configured identity providers.
//!
//! 5. **Network** (`network`): CORS origins and allowed hosts.
//!
//! Nothing here performs network or disk I/O beyond reading an optional
//! `.env` file when asked to.
//!
//! ## Example
//!
//! ```rust
//! use cloud_config_core::{CloudConfig, DatabaseBackend, MapSource, RawSettings};
//!
//! let settings = RawSettings::new().with_source(
//!     MapSource::new("deploy")
//!         .with("CLOUD_PROVIDER", "aws")
//!         .with("USE_POSTGRES", "true")
//!         .with("RDS_HOSTNAME", "db.internal"),
//! );
//! let config = CloudConfig::from_settings(settings);
//!
//! let database = config.database_config().unwrap();
//! match database.backend {
//!     DatabaseBackend::Postgres { host, options, .. } => {
//!         assert_eq!(host, "db.internal");
//!         assert_eq!(options.sslmode, "require");
//!     }
//!     DatabaseBackend::Sqlite { .. } => unreachable!(),
//! }
//! ```

pub mod capability;
pub mod error;
pub mod health;
pub mod network;
pub mod oauth;
pub mod provider;
pub mod resolver;
pub mod settings;

pub use capability::{
    Capability, CapabilityRecord, DatabaseBackend, DatabaseConfig, PostgresOptions, SecretsConfig,
    StorageConfig, REDACTED,
};
pub use error::{ConfigError, Result};
pub use health::{CapabilityHealth, ResolverHealth};
pub use network::NetworkPolicy;
pub use oauth::{OAuthApp, OAuthProvider, OAuthProviderSet, OAuthVendor};
pub use provider::{Environment, ProviderIdentity, UnknownProvider};
pub use resolver::{CloudConfig, ResolvedConfig};
pub use settings::{DotEnvSource, EnvSource, MapSource, RawSettings, SettingKey, SettingKind, SettingSource};

/// Library version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
