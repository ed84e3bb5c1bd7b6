//! Relational database configuration
//!
//! The record shape is decided by `USE_POSTGRES` alone. Only once the shape
//! is Postgres does the provider matter, and then only to pick which
//! variables back each field:
//!
//! | Field    | GCP (Cloud SQL)     | AWS (RDS)      | Azure              |
//! |----------|---------------------|----------------|--------------------|
//! | name     | `POSTGRES_DB`       | `RDS_DB_NAME`  | `AZURE_DB_NAME`    |
//! | user     | `POSTGRES_USER`     | `RDS_USERNAME` | `AZURE_DB_USER`    |
//! | password | `POSTGRES_PASSWORD` | `RDS_PASSWORD` | `AZURE_DB_PASSWORD`|
//! | host     | `POSTGRES_HOST`     | `RDS_HOSTNAME` | `AZURE_DB_HOST`    |
//! | port     | `POSTGRES_PORT`     | `RDS_PORT`     | `AZURE_DB_PORT`    |
//! | sslmode  | `POSTGRES_SSL_MODE` | `RDS_SSL_MODE` | `AZURE_DB_SSL_MODE`|
//!
//! `sslmode` is nested under `options`, the shape ORM layers expect.

use super::{mask, Capability};
use crate::error::Result;
use crate::provider::ProviderIdentity;
use crate::settings::{keys, RawSettings, SettingKey};
use serde::Serialize;

/// Database record; `provider` names the context it was resolved in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseConfig {
    pub provider: ProviderIdentity,
    #[serde(flatten)]
    pub backend: DatabaseBackend,
}

/// Shape of the database record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "engine")]
pub enum DatabaseBackend {
    #[serde(rename = "postgresql")]
    Postgres {
        name: String,
        user: String,
        password: String,
        host: String,
        port: u16,
        options: PostgresOptions,
    },
    #[serde(rename = "sqlite3")]
    Sqlite { path: String },
}

/// Driver options passed through to the Postgres connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostgresOptions {
    pub sslmode: String,
}

impl DatabaseBackend {
    /// Engine identifier as expected by ORM layers
    pub fn engine(&self) -> &'static str {
        match self {
            DatabaseBackend::Postgres { .. } => "postgresql",
            DatabaseBackend::Sqlite { .. } => "sqlite3",
        }
    }
}

impl DatabaseConfig {
    /// Copy with the password masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if let DatabaseBackend::Postgres { password, .. } = &mut copy.backend {
            mask(password);
        }
        copy
    }
}

/// Variables backing the Postgres fields for one provider
#[derive(Debug, Clone, Copy)]
struct PostgresKeys {
    name: SettingKey,
    user: SettingKey,
    password: SettingKey,
    host: SettingKey,
    port: SettingKey,
    sslmode: SettingKey,
}

const CLOUD_SQL: PostgresKeys = PostgresKeys {
    name: keys::POSTGRES_DB,
    user: keys::POSTGRES_USER,
    password: keys::POSTGRES_PASSWORD,
    host: keys::POSTGRES_HOST,
    port: keys::POSTGRES_PORT,
    sslmode: keys::POSTGRES_SSL_MODE,
};

const RDS: PostgresKeys = PostgresKeys {
    name: keys::RDS_DB_NAME,
    user: keys::RDS_USERNAME,
    password: keys::RDS_PASSWORD,
    host: keys::RDS_HOSTNAME,
    port: keys::RDS_PORT,
    sslmode: keys::RDS_SSL_MODE,
};

const AZURE_POSTGRES: PostgresKeys = PostgresKeys {
    name: keys::AZURE_DB_NAME,
    user: keys::AZURE_DB_USER,
    password: keys::AZURE_DB_PASSWORD,
    host: keys::AZURE_DB_HOST,
    port: keys::AZURE_DB_PORT,
    sslmode: keys::AZURE_DB_SSL_MODE,
};

fn postgres_keys(provider: ProviderIdentity) -> &'static PostgresKeys {
    match provider {
        ProviderIdentity::Gcp => &CLOUD_SQL,
        ProviderIdentity::Aws => &RDS,
        ProviderIdentity::Azure => &AZURE_POSTGRES,
    }
}

/// Resolve database configuration for a raw provider name
pub fn resolve(provider: &str, settings: &RawSettings) -> Result<DatabaseConfig> {
    let provider = Capability::Database.provider(provider)?;

    if !settings.flag(&keys::USE_POSTGRES) {
        tracing::debug!(%provider, "resolving sqlite database config");
        return Ok(DatabaseConfig {
            provider,
            backend: DatabaseBackend::Sqlite {
                path: settings.string(&keys::DATABASE_PATH),
            },
        });
    }

    tracing::debug!(%provider, "resolving postgres database config");
    let fields = postgres_keys(provider);
    Ok(DatabaseConfig {
        provider,
        backend: DatabaseBackend::Postgres {
            name: settings.string(&fields.name),
            user: settings.string(&fields.user),
            password: settings.string(&fields.password),
            host: settings.string(&fields.host),
            port: settings.port(&fields.port),
            options: PostgresOptions {
                sslmode: settings.string(&fields.sslmode),
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::REDACTED;
    use crate::settings::MapSource;

    fn postgres_settings(pairs: &[(&str, &str)]) -> RawSettings {
        let mut source = MapSource::new("test").with("USE_POSTGRES", "true");
        for (key, value) in pairs {
            source.insert(*key, *value);
        }
        RawSettings::new().with_source(source)
    }

    #[test]
    fn test_sqlite_shape_is_provider_independent() {
        let settings = RawSettings::new().with_source(
            MapSource::new("test")
                .with("USE_POSTGRES", "false")
                .with("RDS_HOSTNAME", "rds.internal")
                .with("DATABASE_PATH", "/data/app.sqlite3"),
        );

        for provider in ProviderIdentity::ALL {
            let config = resolve(provider.as_str(), &settings).unwrap();
            assert_eq!(config.provider, provider);
            assert_eq!(
                config.backend,
                DatabaseBackend::Sqlite {
                    path: "/data/app.sqlite3".into()
                }
            );
            assert_eq!(config.backend.engine(), "sqlite3");
        }
    }

    #[test]
    fn test_sqlite_is_default() {
        let config = resolve("gcp", &RawSettings::new()).unwrap();
        assert_eq!(
            config.backend,
            DatabaseBackend::Sqlite {
                path: "db.sqlite3".into()
            }
        );
    }

    #[test]
    fn test_aws_postgres_reads_rds_variables() {
        let settings = postgres_settings(&[
            ("RDS_HOSTNAME", "mydb.abc123.us-east-1.rds.amazonaws.com"),
            ("RDS_DB_NAME", "app"),
            ("RDS_PORT", "5433"),
            ("POSTGRES_HOST", "ignored"),
        ]);

        let config = resolve("aws", &settings).unwrap();
        assert_eq!(
            config.backend,
            DatabaseBackend::Postgres {
                name: "app".into(),
                user: "django_user".into(),
                password: "django_password".into(),
                host: "mydb.abc123.us-east-1.rds.amazonaws.com".into(),
                port: 5433,
                options: PostgresOptions {
                    sslmode: "require".into(),
                },
            }
        );
    }

    #[test]
    fn test_gcp_postgres_defaults() {
        let config = resolve("gcp", &postgres_settings(&[])).unwrap();
        let DatabaseBackend::Postgres { host, options, port, .. } = config.backend else {
            panic!("expected postgres");
        };
        assert_eq!(host, "db");
        assert_eq!(options.sslmode, "prefer");
        assert_eq!(port, 5432);
    }

    #[test]
    fn test_azure_postgres_reads_azure_variables() {
        let settings = postgres_settings(&[("AZURE_DB_HOST", "pg.postgres.database.azure.com")]);
        let config = resolve("azure", &settings).unwrap();
        let DatabaseBackend::Postgres { host, options, .. } = config.backend else {
            panic!("expected postgres");
        };
        assert_eq!(host, "pg.postgres.database.azure.com");
        assert_eq!(options.sslmode, "require");
    }

    #[test]
    fn test_unsupported_provider_fails_before_shape_switch() {
        let err = resolve("oracle", &RawSettings::new()).unwrap_err();
        assert_eq!(err.to_string(), "unsupported provider 'oracle' for database config");
    }

    #[test]
    fn test_serialized_shape() {
        let config = resolve("aws", &postgres_settings(&[])).unwrap();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["provider"], "aws");
        assert_eq!(json["engine"], "postgresql");
        assert_eq!(json["port"], 5432);
        assert_eq!(json["host"], "localhost");
        assert_eq!(json["options"]["sslmode"], "require");
        assert!(json.get("sslmode").is_none());

        let fields: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            fields,
            vec!["engine", "host", "name", "options", "password", "port", "provider", "user"]
        );
    }

    #[test]
    fn test_redacted_masks_password() {
        let config = resolve("gcp", &postgres_settings(&[])).unwrap().redacted();
        let DatabaseBackend::Postgres { password, user, .. } = config.backend else {
            panic!("expected postgres");
        };
        assert_eq!(password, REDACTED);
        assert_eq!(user, "django_user");
    }
}
