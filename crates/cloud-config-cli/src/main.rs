//! Cloud Config CLI
//!
//! # Usage
//!
//! ```bash
//! # Everything the running service would see, secrets masked
//! cloud-config show
//!
//! # One section, as JSON, for a specific provider
//! cloud-config --provider aws show --section database --format json
//!
//! # Startup gate in a deploy script
//! cloud-config --env-file .env.production check
//!
//! # Recognised settings and their defaults
//! cloud-config keys
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Configuration does not resolve for the active provider
//! - 3: Invalid input (unreadable `.env` file)
//! - 10: Internal error

use clap::Parser;
use cloud_config_cli::{cli, run_cli, CloudCli};

fn main() {
    let args = CloudCli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(cli::log_level(args.verbose).into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = run_cli(args);
    std::process::exit(exit_code.into());
}
