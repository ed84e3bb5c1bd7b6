//! Setting catalogue
//!
//! Every setting the resolver reads is declared here exactly once, together
//! with its documented default. Accessors on [`RawSettings`](super::RawSettings)
//! only accept a [`SettingKey`], so a lookup can never be issued without a
//! default.

use serde::Serialize;

/// How a setting value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    /// Free-form string
    Text,
    /// Boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`, ...)
    Flag,
    /// TCP port number
    Port,
    /// Comma-separated list
    List,
}

/// A recognised setting with its documented default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingKey {
    /// Environment variable name
    pub name: &'static str,
    /// Value used when the setting is unset or blank
    pub default: &'static str,
    /// Interpretation of the raw value
    pub kind: SettingKind,
    /// Whether the value is a credential that must be masked on display
    pub secret: bool,
}

impl SettingKey {
    const fn text(name: &'static str, default: &'static str) -> Self {
        Self { name, default, kind: SettingKind::Text, secret: false }
    }

    const fn secret(name: &'static str, default: &'static str) -> Self {
        Self { name, default, kind: SettingKind::Text, secret: true }
    }

    const fn flag(name: &'static str, default: &'static str) -> Self {
        Self { name, default, kind: SettingKind::Flag, secret: false }
    }

    const fn port(name: &'static str, default: &'static str) -> Self {
        Self { name, default, kind: SettingKind::Port, secret: false }
    }

    const fn list(name: &'static str) -> Self {
        Self { name, default: "", kind: SettingKind::List, secret: false }
    }
}

// Provider / environment
pub const CLOUD_PROVIDER: SettingKey = SettingKey::text("CLOUD_PROVIDER", "gcp");
/// Deployment environment; always wins over [`APP_ENV`]
pub const DJANGO_ENV: SettingKey = SettingKey::text("DJANGO_ENV", "development");
/// Fallback for [`DJANGO_ENV`], consulted only when `DJANGO_ENV` is unset
pub const APP_ENV: SettingKey = SettingKey::text("APP_ENV", "development");

// Storage
pub const CLOUD_STORAGE_BUCKET_NAME: SettingKey =
    SettingKey::text("CLOUD_STORAGE_BUCKET_NAME", "dev-app-assets");
pub const USE_GCS_EMULATOR: SettingKey = SettingKey::flag("USE_GCS_EMULATOR", "false");
pub const GCS_EMULATOR_HOST: SettingKey =
    SettingKey::text("GCS_EMULATOR_HOST", "http://fake-gcs-server:9090");
pub const GCP_PROJECT_ID: SettingKey = SettingKey::text("GCP_PROJECT_ID", "");
pub const GOOGLE_APPLICATION_CREDENTIALS: SettingKey =
    SettingKey::text("GOOGLE_APPLICATION_CREDENTIALS", "");
pub const AWS_DEFAULT_REGION: SettingKey = SettingKey::text("AWS_DEFAULT_REGION", "us-east-1");
pub const AWS_ACCESS_KEY_ID: SettingKey = SettingKey::secret("AWS_ACCESS_KEY_ID", "");
pub const AWS_SECRET_ACCESS_KEY: SettingKey = SettingKey::secret("AWS_SECRET_ACCESS_KEY", "");
pub const AWS_S3_ENDPOINT_URL: SettingKey = SettingKey::text("AWS_S3_ENDPOINT_URL", "");
pub const AWS_S3_USE_SSL: SettingKey = SettingKey::flag("AWS_S3_USE_SSL", "true");
pub const AZURE_STORAGE_ACCOUNT_NAME: SettingKey =
    SettingKey::text("AZURE_STORAGE_ACCOUNT_NAME", "");
pub const AZURE_STORAGE_ACCOUNT_KEY: SettingKey =
    SettingKey::secret("AZURE_STORAGE_ACCOUNT_KEY", "");
pub const AZURE_STORAGE_CONNECTION_STRING: SettingKey =
    SettingKey::secret("AZURE_STORAGE_CONNECTION_STRING", "");
pub const AZURE_STORAGE_SAS_TOKEN: SettingKey = SettingKey::secret("AZURE_STORAGE_SAS_TOKEN", "");

// Database
pub const USE_POSTGRES: SettingKey = SettingKey::flag("USE_POSTGRES", "false");
pub const DATABASE_PATH: SettingKey = SettingKey::text("DATABASE_PATH", "db.sqlite3");

pub const POSTGRES_DB: SettingKey = SettingKey::text("POSTGRES_DB", "django_db");
pub const POSTGRES_USER: SettingKey = SettingKey::text("POSTGRES_USER", "django_user");
pub const POSTGRES_PASSWORD: SettingKey = SettingKey::secret("POSTGRES_PASSWORD", "django_password");
pub const POSTGRES_HOST: SettingKey = SettingKey::text("POSTGRES_HOST", "db");
pub const POSTGRES_PORT: SettingKey = SettingKey::port("POSTGRES_PORT", "5432");
pub const POSTGRES_SSL_MODE: SettingKey = SettingKey::text("POSTGRES_SSL_MODE", "prefer");

pub const RDS_DB_NAME: SettingKey = SettingKey::text("RDS_DB_NAME", "django_db");
pub const RDS_USERNAME: SettingKey = SettingKey::text("RDS_USERNAME", "django_user");
pub const RDS_PASSWORD: SettingKey = SettingKey::secret("RDS_PASSWORD", "django_password");
pub const RDS_HOSTNAME: SettingKey = SettingKey::text("RDS_HOSTNAME", "localhost");
pub const RDS_PORT: SettingKey = SettingKey::port("RDS_PORT", "5432");
pub const RDS_SSL_MODE: SettingKey = SettingKey::text("RDS_SSL_MODE", "require");

pub const AZURE_DB_NAME: SettingKey = SettingKey::text("AZURE_DB_NAME", "django_db");
pub const AZURE_DB_USER: SettingKey = SettingKey::text("AZURE_DB_USER", "django_user");
pub const AZURE_DB_PASSWORD: SettingKey = SettingKey::secret("AZURE_DB_PASSWORD", "django_password");
pub const AZURE_DB_HOST: SettingKey = SettingKey::text("AZURE_DB_HOST", "localhost");
pub const AZURE_DB_PORT: SettingKey = SettingKey::port("AZURE_DB_PORT", "5432");
pub const AZURE_DB_SSL_MODE: SettingKey = SettingKey::text("AZURE_DB_SSL_MODE", "require");

// Secrets
pub const AZURE_KEY_VAULT_URL: SettingKey = SettingKey::text("AZURE_KEY_VAULT_URL", "");
pub const AZURE_CLIENT_ID: SettingKey = SettingKey::text("AZURE_CLIENT_ID", "");
pub const AZURE_CLIENT_SECRET: SettingKey = SettingKey::secret("AZURE_CLIENT_SECRET", "");
pub const AZURE_TENANT_ID: SettingKey = SettingKey::text("AZURE_TENANT_ID", "");

// OAuth
pub const GOOGLE_OAUTH2_CLIENT_ID: SettingKey = SettingKey::text("GOOGLE_OAUTH2_CLIENT_ID", "");
pub const GOOGLE_OAUTH2_CLIENT_SECRET: SettingKey =
    SettingKey::secret("GOOGLE_OAUTH2_CLIENT_SECRET", "");
pub const MICROSOFT_OAUTH2_CLIENT_ID: SettingKey =
    SettingKey::text("MICROSOFT_OAUTH2_CLIENT_ID", "");
pub const MICROSOFT_OAUTH2_CLIENT_SECRET: SettingKey =
    SettingKey::secret("MICROSOFT_OAUTH2_CLIENT_SECRET", "");
pub const AWS_COGNITO_CLIENT_ID: SettingKey = SettingKey::text("AWS_COGNITO_CLIENT_ID", "");
pub const AWS_COGNITO_CLIENT_SECRET: SettingKey =
    SettingKey::secret("AWS_COGNITO_CLIENT_SECRET", "");
pub const AWS_COGNITO_DOMAIN: SettingKey = SettingKey::text("AWS_COGNITO_DOMAIN", "");

// Network policy
pub const CORS_ALLOWED_ORIGINS: SettingKey = SettingKey::list("CORS_ALLOWED_ORIGINS");
pub const ALLOWED_HOSTS: SettingKey = SettingKey::list("ALLOWED_HOSTS");

/// Every recognised setting, in catalogue order
pub const ALL: &[SettingKey] = &[
    CLOUD_PROVIDER,
    DJANGO_ENV,
    APP_ENV,
    CLOUD_STORAGE_BUCKET_NAME,
    USE_GCS_EMULATOR,
    GCS_EMULATOR_HOST,
    GCP_PROJECT_ID,
    GOOGLE_APPLICATION_CREDENTIALS,
    AWS_DEFAULT_REGION,
    AWS_ACCESS_KEY_ID,
    AWS_SECRET_ACCESS_KEY,
    AWS_S3_ENDPOINT_URL,
    AWS_S3_USE_SSL,
    AZURE_STORAGE_ACCOUNT_NAME,
    AZURE_STORAGE_ACCOUNT_KEY,
    AZURE_STORAGE_CONNECTION_STRING,
    AZURE_STORAGE_SAS_TOKEN,
    USE_POSTGRES,
    DATABASE_PATH,
    POSTGRES_DB,
    POSTGRES_USER,
    POSTGRES_PASSWORD,
    POSTGRES_HOST,
    POSTGRES_PORT,
    POSTGRES_SSL_MODE,
    RDS_DB_NAME,
    RDS_USERNAME,
    RDS_PASSWORD,
    RDS_HOSTNAME,
    RDS_PORT,
    RDS_SSL_MODE,
    AZURE_DB_NAME,
    AZURE_DB_USER,
    AZURE_DB_PASSWORD,
    AZURE_DB_HOST,
    AZURE_DB_PORT,
    AZURE_DB_SSL_MODE,
    AZURE_KEY_VAULT_URL,
    AZURE_CLIENT_ID,
    AZURE_CLIENT_SECRET,
    AZURE_TENANT_ID,
    GOOGLE_OAUTH2_CLIENT_ID,
    GOOGLE_OAUTH2_CLIENT_SECRET,
    MICROSOFT_OAUTH2_CLIENT_ID,
    MICROSOFT_OAUTH2_CLIENT_SECRET,
    AWS_COGNITO_CLIENT_ID,
    AWS_COGNITO_CLIENT_SECRET,
    AWS_COGNITO_DOMAIN,
    CORS_ALLOWED_ORIGINS,
    ALLOWED_HOSTS,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::parse_flag;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_names_are_unique() {
        let mut seen = HashSet::new();
        for key in ALL {
            assert!(seen.insert(key.name), "duplicate setting {}", key.name);
        }
    }

    #[test]
    fn test_every_default_parses_for_its_kind() {
        for key in ALL {
            match key.kind {
                SettingKind::Flag => assert!(
                    parse_flag(key.default).is_some(),
                    "flag default for {} does not parse",
                    key.name
                ),
                SettingKind::Port => assert!(
                    key.default.parse::<u16>().is_ok(),
                    "port default for {} does not parse",
                    key.name
                ),
                SettingKind::List | SettingKind::Text => {}
            }
        }
    }
}
