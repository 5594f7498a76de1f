// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # VibeCraft CLI
//!
//! The `vibecraft` binary hosts the wardrobe and outfit API and exposes the
//! composer and weather advisor as offline commands.
//!
//! ## Commands
//!
//! - `vibecraft serve` - Run the HTTP API
//! - `vibecraft outfit generate` - Compose outfits from a wardrobe file
//! - `vibecraft weather advise|lookup` - Weather-based clothing advice
//! - `vibecraft config show|validate|generate` - Configuration management

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use vibecraft::commands::{self, ConfigCommand, OutfitCommand, WeatherCommand};
use vibecraft::startup::{self, init_logging};

/// VibeCraft - AI-assisted wardrobe and outfit composition
#[derive(Parser)]
#[command(name = "vibecraft")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "VIBECRAFT_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// HTTP API host (default: from config, 0.0.0.0)
    #[arg(long, global = true, env = "VIBECRAFT_HOST")]
    host: Option<String>,

    /// HTTP API port (default: from config, 5000)
    #[arg(long, global = true, env = "VIBECRAFT_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "VIBECRAFT_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    #[command(name = "serve")]
    Serve,

    /// Compose outfits offline
    #[command(name = "outfit")]
    Outfit {
        #[command(subcommand)]
        command: OutfitCommand,
    },

    /// Weather advice and lookups
    #[command(name = "weather")]
    Weather {
        #[command(subcommand)]
        command: WeatherCommand,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let (_, loaded) = startup::bootstrap(cli.config.as_deref(), cli.log_level.clone(), init_logging)?;

    match cli.command {
        Some(Commands::Serve) => commands::serve::run(loaded?, cli.host, cli.port).await,
        Some(Commands::Outfit { command }) => commands::outfit::handle_command(command, loaded?).await,
        Some(Commands::Weather { command }) => {
            commands::weather::handle_command(command, loaded?).await
        }
        Some(Commands::Config { command }) => {
            // config subcommands load and report on the file themselves
            commands::config::handle_command(command, cli.config).await
        }
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}
