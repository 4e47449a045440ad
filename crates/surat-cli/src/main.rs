//! Surat CLI
//!
//! Serves the letter-generation API and manages its configuration.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use surat_api::Server;
use surat_cli::config_handlers::handle_config_command;
use surat_cli::{Cli, Command, logging};
use surat_core::SuratConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Serve {
            host,
            port,
            no_auth,
        } => {
            let mut config =
                SuratConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if no_auth {
                config.auth.enabled = false;
            }
            config.validate().context("invalid configuration")?;

            Server::new(config).run().await?;
        }
        Command::Config { action } => handle_config_command(cli.config.as_deref(), action)?,
    }

    Ok(())
}
