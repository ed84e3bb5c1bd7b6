//! Cloud Config CLI
//!
//! Operator-facing inspection of the configuration a service would resolve
//! from its environment: the resolved records, a health check suitable for
//! deploy gates, and the catalogue of recognised settings.

pub mod cli;

pub use cli::{CloudCli, Commands, ExitCode, OutputFormat};

use cloud_config_core::ConfigError;

/// Run the CLI against stdout and map failures to an exit code
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use cloud_config_cli::{run_cli, CloudCli};
///
/// let cli = CloudCli::parse();
/// let exit_code = run_cli(cli);
/// std::process::exit(exit_code.into());
/// ```
pub fn run_cli(cli: CloudCli) -> ExitCode {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli::run(cli, &mut out) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code_for(&e)
        }
    }
}

/// Exit code for an error raised while running a command
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<ConfigError>() {
        Some(e) if e.is_user_error() => ExitCode::InvalidInput,
        Some(ConfigError::UnsupportedProvider { .. }) => ExitCode::Unhealthy,
        _ => ExitCode::InternalError,
    }
}
