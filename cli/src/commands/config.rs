// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use vibecraft_core::domain::stylist_config::{ProviderConfig, StylistConfigManifest};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path
        #[arg(short, long, default_value = "./vibecraft-config.yaml")]
        output: PathBuf,

        /// Include every provider slot with comments
        #[arg(long)]
        examples: bool,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths),
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
        ConfigCommand::Generate { output, examples } => generate(output, examples),
    }
}

fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = StylistConfigManifest::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. VIBECRAFT_CONFIG_PATH: {}",
            std::env::var("VIBECRAFT_CONFIG_PATH")
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./vibecraft-config.yaml");
        println!("  4. ~/.vibecraft/config.yaml");
        println!("  5. /etc/vibecraft/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();
    println!("  Name: {}", config.metadata.name);
    println!();

    println!("{}", "Providers:".bold());
    print_provider("Generation", config.spec.generation.as_ref(), "fallback composer only");
    print_provider("Vision", config.spec.vision.as_ref(), "neutral attributes");
    print_provider("Weather", config.spec.weather.as_ref(), "neutral weather");
    println!();

    println!("{}", "Composer:".bold());
    println!("  Timeout: {}s", config.spec.composer.timeout_secs);
    println!("  Temperature: {}", config.spec.composer.temperature);
    println!("  Max tokens: {}", config.spec.composer.max_tokens);
    println!();

    println!("{}", "Storage:".bold());
    println!("  Uploads: {}", config.spec.storage.uploads_dir.display());
    println!("  Max upload: {} bytes", config.spec.storage.max_upload_bytes);
    println!();

    println!("{}", "Network:".bold());
    println!(
        "  Listen: {}:{}",
        config.spec.network.bind_address, config.spec.network.port
    );
    println!();

    Ok(())
}

fn print_provider(slot: &str, provider: Option<&ProviderConfig>, when_absent: &str) {
    match provider {
        Some(p) => {
            let state = if p.enabled { "enabled".green() } else { "disabled".yellow() };
            println!("  {}: {} ({}) [{}]", slot, p.name.bold(), p.provider_type, state);
            if !p.model.is_empty() {
                println!("    Model: {}", p.model);
            }
            if let Some(endpoint) = &p.endpoint {
                println!("    Endpoint: {}", endpoint);
            }
        }
        None => println!("  {}: {}", slot, format!("(none - {})", when_absent).dimmed()),
    }
}

fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = StylistConfigManifest::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

fn generate(output: PathBuf, with_examples: bool) -> Result<()> {
    let sample = if with_examples {
        include_str!("../../templates/config-with-examples.yaml")
    } else {
        include_str!("../../templates/config-minimal.yaml")
    };

    std::fs::write(&output, sample)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}
