//! CLI command definitions
//!
//! Clap-based commands for printing resolved configuration, checking that
//! every capability resolves, and listing the recognised settings.

use clap::{Parser, Subcommand, ValueEnum};
use cloud_config_core::settings::keys;
use cloud_config_core::{CloudConfig, OAuthProviderSet};
use std::io::Write;
use std::path::PathBuf;

use super::output::{self, KeysOutput, OutputFormat};
use super::ExitCode;

/// Cloud Config CLI
///
/// Show the configuration a service resolves from its environment for the
/// active cloud provider.
#[derive(Parser, Debug)]
#[command(name = "cloud-config")]
#[command(about = "Inspect provider-shaped configuration resolved from the environment", long_about = None)]
#[command(version)]
pub struct CloudCli {
    /// Output verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read additional settings from a .env file
    ///
    /// Values already present in the process environment take precedence.
    #[arg(long, global = true, env = "CLOUD_CONFIG_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Override CLOUD_PROVIDER (gcp, aws, azure)
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Override DJANGO_ENV (development, staging, production, ...)
    #[arg(long, global = true)]
    pub environment: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print resolved configuration
    ///
    /// Credentials are masked unless --reveal is given.
    Show {
        /// Part of the configuration to print
        #[arg(long, value_enum, default_value = "all")]
        section: Section,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Print credentials in clear text
        #[arg(long)]
        reveal: bool,
    },

    /// Check that every capability resolves for the active provider
    ///
    /// Exits with status 1 when any capability fails.
    Check {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List recognised settings with their defaults
    Keys {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// Configuration sections selectable with `show --section`
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum Section {
    #[default]
    All,
    Storage,
    Database,
    Secrets,
    Oauth,
    Network,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::All => "Resolved Configuration",
            Section::Storage => "Storage",
            Section::Database => "Database",
            Section::Secrets => "Secrets",
            Section::Oauth => "OAuth Providers",
            Section::Network => "Network Policy",
        }
    }
}

/// Execute the show command
pub fn execute_show(
    config: &CloudConfig,
    section: Section,
    format: OutputFormat,
    reveal: bool,
    out: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    let title = section.title();
    let rendered = match section {
        Section::All => {
            let snapshot = config.snapshot()?;
            let snapshot = if reveal { snapshot } else { snapshot.redacted() };
            output::render(title, &snapshot, format)?
        }
        Section::Storage => {
            let storage = config.storage_config()?;
            let storage = if reveal { storage } else { storage.redacted() };
            output::render(title, &storage, format)?
        }
        Section::Database => {
            let database = config.database_config()?;
            let database = if reveal { database } else { database.redacted() };
            output::render(title, &database, format)?
        }
        Section::Secrets => {
            let secrets = config.secrets_config()?;
            let secrets = if reveal { secrets } else { secrets.redacted() };
            output::render(title, &secrets, format)?
        }
        Section::Oauth => {
            let providers = config.oauth_providers();
            let providers: OAuthProviderSet = if reveal {
                providers
            } else {
                providers
                    .into_iter()
                    .map(|(name, provider)| (name, provider.redacted()))
                    .collect()
            };
            output::render(title, &providers, format)?
        }
        Section::Network => output::render(title, &config.network_policy(), format)?,
    };

    write!(out, "{rendered}")?;
    Ok(ExitCode::Success)
}

/// Execute the check command
pub fn execute_check(
    config: &CloudConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    let health = config.health();

    let rendered = match format {
        OutputFormat::Table => output::health_table(&health),
        other => output::render("Configuration Health", &health, other)?,
    };
    write!(out, "{rendered}")?;

    Ok(ExitCode::from_health(health.all_healthy()))
}

/// Execute the keys command
pub fn execute_keys(
    config: &CloudConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    let catalogue = KeysOutput::from_catalogue(keys::ALL, config.settings());

    let rendered = match format {
        OutputFormat::Table => output::keys_table(&catalogue),
        other => output::render("Settings", &catalogue, other)?,
    };
    write!(out, "{rendered}")?;

    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloud_config_core::{MapSource, RawSettings};

    fn resolver(pairs: &[(&str, &str)]) -> CloudConfig {
        CloudConfig::from_settings(RawSettings::new().with_source(pairs.iter().copied().collect::<MapSource>()))
    }

    fn show(config: &CloudConfig, section: Section, format: OutputFormat, reveal: bool) -> String {
        let mut out = Vec::new();
        let code = execute_show(config, section, format, reveal, &mut out).unwrap();
        assert_eq!(code, ExitCode::Success);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_show_defaults() {
        let cli = CloudCli::try_parse_from(["cloud-config", "show"]).unwrap();
        match cli.command {
            Commands::Show {
                section,
                format,
                reveal,
            } => {
                assert_eq!(section, Section::All);
                assert_eq!(format, OutputFormat::Table);
                assert!(!reveal);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = CloudCli::try_parse_from([
            "cloud-config",
            "show",
            "--section",
            "database",
            "--format",
            "toml",
            "--provider",
            "aws",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.provider.as_deref(), Some("aws"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Show {
                section: Section::Database,
                format: OutputFormat::Toml,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_section() {
        assert!(CloudCli::try_parse_from(["cloud-config", "show", "--section", "cache"]).is_err());
    }

    #[test]
    fn test_show_masks_secrets_by_default() {
        let config = resolver(&[("CLOUD_PROVIDER", "aws"), ("AWS_SECRET_ACCESS_KEY", "s3cr3t")]);

        let masked = show(&config, Section::Storage, OutputFormat::Json, false);
        assert!(!masked.contains("s3cr3t"));
        assert!(masked.contains(cloud_config_core::REDACTED));

        let revealed = show(&config, Section::Storage, OutputFormat::Json, true);
        assert!(revealed.contains("s3cr3t"));
    }

    #[test]
    fn test_show_all_as_toml() {
        let config = resolver(&[
            ("CLOUD_PROVIDER", "aws"),
            ("DJANGO_ENV", "production"),
            ("USE_POSTGRES", "true"),
        ]);
        let rendered = show(&config, Section::All, OutputFormat::Toml, false);
        let parsed: toml::Value = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed["provider"].as_str(), Some("aws"));
        assert_eq!(parsed["database"]["engine"].as_str(), Some("postgresql"));
        assert_eq!(parsed["database"]["port"].as_integer(), Some(5432));
    }

    #[test]
    fn test_show_network_table() {
        let config = resolver(&[("CLOUD_PROVIDER", "gcp"), ("DJANGO_ENV", "production")]);
        let rendered = show(&config, Section::Network, OutputFormat::Table, false);
        assert!(rendered.contains("allowed_hosts"));
        assert!(rendered.contains("*.run.app"));
    }

    #[test]
    fn test_show_unsupported_provider_fails() {
        let config = resolver(&[("CLOUD_PROVIDER", "oracle")]);
        let mut out = Vec::new();
        let error = execute_show(&config, Section::Secrets, OutputFormat::Table, false, &mut out).unwrap_err();
        assert!(error.to_string().contains("unsupported provider 'oracle'"));
    }

    #[test]
    fn test_check_exit_codes() {
        let mut out = Vec::new();
        let code = execute_check(&resolver(&[("CLOUD_PROVIDER", "azure")]), OutputFormat::Json, &mut out).unwrap();
        assert_eq!(code, ExitCode::Success);

        let mut out = Vec::new();
        let code = execute_check(&resolver(&[("CLOUD_PROVIDER", "oracle")]), OutputFormat::Json, &mut out).unwrap();
        assert_eq!(code, ExitCode::Unhealthy);

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["provider"], "oracle");
        assert_eq!(json["capabilities"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_keys_marks_configured_settings() {
        let mut out = Vec::new();
        execute_keys(&resolver(&[("RDS_PORT", "6543")]), OutputFormat::Yaml, &mut out).unwrap();
        let yaml: serde_yaml::Value = serde_yaml::from_slice(&out).unwrap();

        let settings = yaml["settings"].as_sequence().unwrap();
        assert_eq!(settings.len(), keys::ALL.len());

        let rds_port = settings
            .iter()
            .find(|entry| entry["name"].as_str() == Some("RDS_PORT"))
            .unwrap();
        assert_eq!(rds_port["default"].as_str(), Some("5432"));
        assert_eq!(rds_port["configured"].as_bool(), Some(true));
    }
}
