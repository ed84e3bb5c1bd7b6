//! Object storage configuration
//!
//! - **GCP**: Google Cloud Storage, optionally through a local emulator
//! - **AWS**: S3 (or an S3-compatible endpoint)
//! - **Azure**: Blob Storage

use super::{mask, Capability};
use crate::error::Result;
use crate::provider::ProviderIdentity;
use crate::settings::{keys, RawSettings};
use serde::Serialize;

/// Storage record for the active provider, tagged by backend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum StorageConfig {
    #[serde(rename = "gcs")]
    Gcs(GcsStorage),
    #[serde(rename = "s3")]
    S3(S3Storage),
    #[serde(rename = "azure")]
    AzureBlob(AzureBlobStorage),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GcsStorage {
    pub bucket_name: String,
    pub use_emulator: bool,
    pub emulator_host: String,
    pub project_id: String,
    pub credentials_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct S3Storage {
    pub bucket_name: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint_url: Option<String>,
    pub use_ssl: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AzureBlobStorage {
    pub container_name: String,
    pub account_name: String,
    pub account_key: String,
    pub connection_string: String,
    pub sas_token: String,
}

impl StorageConfig {
    pub fn provider(&self) -> ProviderIdentity {
        match self {
            StorageConfig::Gcs(_) => ProviderIdentity::Gcp,
            StorageConfig::S3(_) => ProviderIdentity::Aws,
            StorageConfig::AzureBlob(_) => ProviderIdentity::Azure,
        }
    }

    /// Bucket (or container) name, whatever the backend calls it
    pub fn bucket(&self) -> &str {
        match self {
            StorageConfig::Gcs(gcs) => &gcs.bucket_name,
            StorageConfig::S3(s3) => &s3.bucket_name,
            StorageConfig::AzureBlob(azure) => &azure.container_name,
        }
    }

    /// Copy with credential fields masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            StorageConfig::Gcs(_) => {}
            StorageConfig::S3(s3) => {
                mask(&mut s3.access_key_id);
                mask(&mut s3.secret_access_key);
            }
            StorageConfig::AzureBlob(azure) => {
                mask(&mut azure.account_key);
                mask(&mut azure.connection_string);
                mask(&mut azure.sas_token);
            }
        }
        copy
    }
}

/// Resolve storage configuration for a raw provider name
pub fn resolve(provider: &str, settings: &RawSettings) -> Result<StorageConfig> {
    let provider = Capability::Storage.provider(provider)?;
    tracing::debug!(%provider, "resolving storage config");

    let bucket_name = settings.string(&keys::CLOUD_STORAGE_BUCKET_NAME);
    let config = match provider {
        ProviderIdentity::Gcp => StorageConfig::Gcs(GcsStorage {
            bucket_name,
            use_emulator: settings.flag(&keys::USE_GCS_EMULATOR),
            emulator_host: settings.string(&keys::GCS_EMULATOR_HOST),
            project_id: settings.string(&keys::GCP_PROJECT_ID),
            credentials_path: settings.string(&keys::GOOGLE_APPLICATION_CREDENTIALS),
        }),
        ProviderIdentity::Aws => StorageConfig::S3(S3Storage {
            bucket_name,
            region: settings.string(&keys::AWS_DEFAULT_REGION),
            access_key_id: settings.string(&keys::AWS_ACCESS_KEY_ID),
            secret_access_key: settings.string(&keys::AWS_SECRET_ACCESS_KEY),
            endpoint_url: settings.optional(&keys::AWS_S3_ENDPOINT_URL),
            use_ssl: settings.flag(&keys::AWS_S3_USE_SSL),
        }),
        ProviderIdentity::Azure => StorageConfig::AzureBlob(AzureBlobStorage {
            container_name: bucket_name,
            account_name: settings.string(&keys::AZURE_STORAGE_ACCOUNT_NAME),
            account_key: settings.string(&keys::AZURE_STORAGE_ACCOUNT_KEY),
            connection_string: settings.string(&keys::AZURE_STORAGE_CONNECTION_STRING),
            sas_token: settings.string(&keys::AZURE_STORAGE_SAS_TOKEN),
        }),
    };

    Ok(config)
}
