//! CLI module for inspecting resolved cloud configuration
//!
//! Builds a [`CloudConfig`] from the process environment, an optional `.env`
//! file and command-line overrides, then runs one command against it.

pub mod commands;
pub mod output;

pub use commands::{CloudCli, Commands, Section};
pub use output::OutputFormat;

use cloud_config_core::settings::keys;
use cloud_config_core::{CloudConfig, EnvSource, MapSource, RawSettings, SettingSource};
use std::io::Write;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution
    Success = 0,
    /// A capability does not resolve for the active provider
    Unhealthy = 1,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    pub fn from_health(all_healthy: bool) -> Self {
        if all_healthy {
            ExitCode::Success
        } else {
            ExitCode::Unhealthy
        }
    }
}

/// Default log level for a `-v` count; `RUST_LOG` directives still apply
pub fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Build the setting chain the command runs against
///
/// Priority: command-line overrides, `process_env`, `--env-file`, catalogue
/// defaults.
pub fn load_settings<S: SettingSource + 'static>(
    cli: &CloudCli,
    process_env: S,
) -> anyhow::Result<RawSettings> {
    let mut settings = RawSettings::new().with_source(process_env);
    if let Some(path) = &cli.env_file {
        settings = settings.with_env_file(path)?;
    }

    let mut overrides = MapSource::new("command line");
    if let Some(provider) = &cli.provider {
        overrides.insert(keys::CLOUD_PROVIDER.name, provider.as_str());
    }
    if let Some(environment) = &cli.environment {
        overrides.insert(keys::DJANGO_ENV.name, environment.as_str());
    }
    if !overrides.is_empty() {
        settings = settings.with_override(overrides);
    }

    Ok(settings)
}

/// Run the CLI with the given arguments, writing results to `out`
pub fn run(cli: CloudCli, out: &mut dyn Write) -> anyhow::Result<ExitCode> {
    run_with_env(cli, EnvSource::new(), out)
}

/// Run the CLI with `process_env` standing in for the process environment
pub fn run_with_env<S: SettingSource + 'static>(
    cli: CloudCli,
    process_env: S,
    out: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    let config = CloudConfig::from_settings(load_settings(&cli, process_env)?);

    match cli.command {
        Commands::Show {
            section,
            format,
            reveal,
        } => commands::execute_show(&config, section, format, reveal, out),
        Commands::Check { format } => commands::execute_check(&config, format, out),
        Commands::Keys { format } => commands::execute_keys(&config, format, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use cloud_config_core::ProviderIdentity;

    #[test]
    fn test_exit_code_conversion() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Unhealthy), 1);
        assert_eq!(i32::from(ExitCode::InvalidInput), 3);
        assert_eq!(i32::from(ExitCode::InternalError), 10);
    }

    #[test]
    fn test_exit_code_from_health() {
        assert_eq!(ExitCode::from_health(true), ExitCode::Success);
        assert_eq!(ExitCode::from_health(false), ExitCode::Unhealthy);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), tracing::Level::WARN);
        assert_eq!(log_level(1), tracing::Level::DEBUG);
        assert_eq!(log_level(4), tracing::Level::TRACE);
    }

    #[test]
    fn test_overrides_win() {
        let cli = CloudCli::try_parse_from([
            "cloud-config",
            "--provider",
            "azure",
            "--environment",
            "staging",
            "keys",
        ])
        .unwrap();
        let env = MapSource::new("env")
            .with("CLOUD_PROVIDER", "gcp")
            .with("DJANGO_ENV", "production")
            .with("APP_ENV", "production");
        let config = CloudConfig::from_settings(load_settings(&cli, env).unwrap());

        assert_eq!(config.provider(), Some(ProviderIdentity::Azure));
        assert_eq!(config.environment().as_str(), "staging");
        assert_eq!(config.settings().source_names(), vec!["command line", "env"]);
    }

    #[test]
    fn test_environment_override_targets_django_env() {
        let cli = CloudCli::try_parse_from(["cloud-config", "--environment", "qa", "check"]).unwrap();
        let settings = load_settings(&cli, MapSource::new("env")).unwrap();

        assert_eq!(settings.get("DJANGO_ENV").as_deref(), Some("qa"));
        assert_eq!(settings.get("APP_ENV"), None);
    }

    #[test]
    fn test_no_overrides_keeps_chain_short() {
        let cli = CloudCli::try_parse_from(["cloud-config", "keys"]).unwrap();
        let settings = load_settings(&cli, MapSource::new("env")).unwrap();
        assert_eq!(settings.source_names(), vec!["env"]);
    }

    #[test]
    fn test_missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.env");
        let cli = CloudCli::try_parse_from([
            "cloud-config",
            "--env-file",
            path.to_str().unwrap(),
            "check",
        ])
        .unwrap();

        let error = load_settings(&cli, MapSource::new("env")).unwrap_err();
        assert!(error.downcast_ref::<cloud_config_core::ConfigError>().is_some());
    }
}
