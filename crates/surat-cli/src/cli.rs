//! Argument definitions.

use clap::{Parser, Subcommand};

/// Surat - village letter generation backed by Google Sheets and Docs
#[derive(Parser, Debug)]
#[command(name = "surat", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SURAT_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,

        /// Override server.port
        #[arg(long)]
        port: Option<u16>,

        /// Accept bearer tokens without validating them (development only)
        #[arg(long)]
        no_auth: bool,
    },

    /// Inspect or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print a value by dotted key, e.g. `server.port`
    Get { key: String },

    /// Set a value by dotted key in the config file
    Set { key: String, value: String },

    /// Write a default config file
    Init {
        /// Target path (defaults to the platform config directory)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print configuration as SURAT_* environment variables
    Export {
        /// Format as `--env KEY=VALUE` for `docker run`
        #[arg(long)]
        docker_env: bool,
    },
}
