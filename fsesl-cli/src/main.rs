//! fsesl-cli - Command-line interface for the FreeSWITCH event socket
//!
//! Provides both a REPL and one-shot command execution.

mod commands;
mod config;
mod repl;

use clap::{Parser, Subcommand};
use colored::Colorize;
use config::FileConfig;
use fsesl_client::{Client, ConnectionConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fsesl-cli")]
#[command(about = "Command-line interface for the FreeSWITCH event socket")]
#[command(version)]
struct Cli {
    /// Switch hostname or address
    #[arg(short = 'H', long, env = "FSESL_HOST")]
    host: Option<String>,

    /// Event socket port
    #[arg(short, long, env = "FSESL_PORT")]
    port: Option<u16>,

    /// Event socket password
    #[arg(short = 'P', long, env = "FSESL_PASSWORD")]
    password: Option<String>,

    /// Path to a YAML config file
    #[arg(short, long, env = "FSESL_CONFIG")]
    config: Option<PathBuf>,

    /// TCP connect timeout in seconds
    #[arg(long)]
    connect_timeout: Option<u64>,

    /// Read timeout in seconds (default: wait indefinitely)
    #[arg(long)]
    read_timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive REPL
    Repl,

    /// Show overall switch status
    Status,

    /// List active channels
    ShowChannels,

    /// List active calls
    ShowCalls,

    /// Show SIP stack status
    SofiaStatus {
        /// Restrict to one profile
        #[arg(long)]
        profile: Option<String>,
    },

    /// Run an arbitrary api command
    Api {
        /// The command and its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            std::process::exit(1);
        }
    };
    let mut client = Client::new(config);

    match cli.command {
        Some(Commands::Repl) | None => {
            if let Err(e) = repl::run(&mut client) {
                eprintln!("{}: {}", "Error".red(), e);
                std::process::exit(1);
            }
        }
        Some(cmd) => {
            if let Err(e) = client.connect() {
                eprintln!("{}: {}", "Connection failed".red(), e);
                std::process::exit(1);
            }

            match commands::execute(&mut client, cmd) {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    eprintln!("{}: {}", "Error".red(), e);
                    std::process::exit(1);
                }
            }

            client.disconnect();
        }
    }
}

/// Builds the connection configuration: defaults, then the config file,
/// then flag and environment overrides.
fn build_config(cli: &Cli) -> Result<ConnectionConfig, config::ConfigError> {
    let file = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let mut config = file.connection_config();

    if let Some(ref host) = cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(ref password) = cli.password {
        config.password = password.clone();
    }
    if let Some(secs) = cli.connect_timeout {
        config.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = cli.read_timeout {
        config.read_timeout = Some(Duration::from_secs(secs));
    }

    Ok(config)
}
