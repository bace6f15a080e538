//! layout-ai: the command line front end

mod cli;
mod commands;
mod support;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use layout_ai_config::config::AppConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config, cli.verbose);

    match cli.command {
        Commands::Recover { input, json } => commands::recover::run(input.as_deref(), json),

        Commands::Repair {
            input,
            profile,
            output,
        } => {
            let profile = support::load_profile(profile.profile.as_ref(), &config)?;
            commands::repair::run(input.as_deref(), &profile, &output)
        }

        Commands::Validate {
            input,
            profile,
            finalize,
            json,
        } => {
            let profile = support::load_profile(profile.profile.as_ref(), &config)?;
            commands::validate::run(input.as_deref(), &profile, finalize, json)
        }

        Commands::Prompt { request, profile } => {
            let profile = support::load_profile(profile.profile.as_ref(), &config)?;
            let schema = support::load_schema(&config)?;
            commands::prompt::run(&request, &profile, &schema)
        }

        Commands::Generate {
            request,
            profile,
            output,
        } => {
            let profile = support::load_profile(profile.profile.as_ref(), &config)?;
            let schema = support::load_schema(&config)?;
            commands::generate::run(&request, &profile, &config.source, &schema, &output)
        }
    }
}

/// Log to stderr so stdout stays machine readable. `RUST_LOG` wins over the
/// configured level; `--verbose` forces debug.
fn init_tracing(config: &AppConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
