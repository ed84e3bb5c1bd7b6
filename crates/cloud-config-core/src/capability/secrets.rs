//! Secret management configuration
//!
//! Names the secret backend of the active provider plus the credentials a
//! secrets client needs to reach it:
//!
//! - **GCP**: Secret Manager
//! - **AWS**: Systems Manager Parameter Store
//! - **Azure**: Key Vault

use super::{mask, Capability};
use crate::error::Result;
use crate::provider::ProviderIdentity;
use crate::settings::{keys, RawSettings};
use serde::Serialize;

/// Secrets backend record for the active provider
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum SecretsConfig {
    GcpSecretManager {
        project_id: String,
        credentials_path: String,
    },
    AwsParameterStore {
        region: String,
        access_key_id: String,
        secret_access_key: String,
    },
    AzureKeyVault {
        vault_url: String,
        client_id: String,
        client_secret: String,
        tenant_id: String,
    },
}

impl SecretsConfig {
    pub fn provider(&self) -> ProviderIdentity {
        match self {
            SecretsConfig::GcpSecretManager { .. } => ProviderIdentity::Gcp,
            SecretsConfig::AwsParameterStore { .. } => ProviderIdentity::Aws,
            SecretsConfig::AzureKeyVault { .. } => ProviderIdentity::Azure,
        }
    }

    /// Human-readable name of the secret backend
    pub fn backend_name(&self) -> &'static str {
        match self {
            SecretsConfig::GcpSecretManager { .. } => "Secret Manager",
            SecretsConfig::AwsParameterStore { .. } => "Parameter Store",
            SecretsConfig::AzureKeyVault { .. } => "Key Vault",
        }
    }

    /// Copy with credential fields masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            SecretsConfig::GcpSecretManager { .. } => {}
            SecretsConfig::AwsParameterStore {
                access_key_id,
                secret_access_key,
                ..
            } => {
                mask(access_key_id);
                mask(secret_access_key);
            }
            SecretsConfig::AzureKeyVault { client_secret, .. } => mask(client_secret),
        }
        copy
    }
}

/// Resolve secrets configuration for a raw provider name
pub fn resolve(provider: &str, settings: &RawSettings) -> Result<SecretsConfig> {
    let provider = Capability::Secrets.provider(provider)?;
    tracing::debug!(%provider, "resolving secrets config");

    let config = match provider {
        ProviderIdentity::Gcp => SecretsConfig::GcpSecretManager {
            project_id: settings.string(&keys::GCP_PROJECT_ID),
            credentials_path: settings.string(&keys::GOOGLE_APPLICATION_CREDENTIALS),
        },
        ProviderIdentity::Aws => SecretsConfig::AwsParameterStore {
            region: settings.string(&keys::AWS_DEFAULT_REGION),
            access_key_id: settings.string(&keys::AWS_ACCESS_KEY_ID),
            secret_access_key: settings.string(&keys::AWS_SECRET_ACCESS_KEY),
        },
        ProviderIdentity::Azure => SecretsConfig::AzureKeyVault {
            vault_url: settings.string(&keys::AZURE_KEY_VAULT_URL),
            client_id: settings.string(&keys::AZURE_CLIENT_ID),
            client_secret: settings.string(&keys::AZURE_CLIENT_SECRET),
            tenant_id: settings.string(&keys::AZURE_TENANT_ID),
        },
    };

    Ok(config)
}
