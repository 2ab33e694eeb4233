use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_DEBUG, ENV_HOST, ENV_PORT, ENV_PUBLIC_URL};

#[derive(Parser)]
#[command(name = "ladle")]
#[command(version, about = "Recipe sharing backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Public base URL used when rendering short links (e.g. https://ladle.example.com)
    #[arg(long, global = true, env = ENV_PUBLIC_URL)]
    pub public_url: Option<String>,

    /// Enable debug mode (verbose SQL statement logging)
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Bulk-load ingredients and tags from CSV files
    Import {
        /// Path to an ingredients CSV (columns: name, measurement_unit)
        #[arg(long)]
        ingredients: Option<PathBuf>,
        /// Path to a tags CSV (columns: name, slug)
        #[arg(long)]
        tags: Option<PathBuf>,
    },
    /// System maintenance commands
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },
    /// User administration commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum SystemCommands {
    /// Delete local data directory (database, WAL files). Requires confirmation.
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum UserCommands {
    /// Delete an account and everything it authored. Requires confirmation.
    Remove {
        /// Username of the account to delete
        username: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub public_url: Option<String>,
    pub debug: bool,
    pub config: Option<PathBuf>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        public_url: cli.public_url,
        debug: cli.debug,
        config: cli.config,
    };
    (config, cli.command)
}
