// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Weather commands: local advice and provider lookups

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use vibecraft_core::domain::stylist_config::StylistConfigManifest;
use vibecraft_core::domain::weather::{WeatherAdvisor, WeatherContext};

use crate::embedded::EmbeddedStylist;

#[derive(Subcommand)]
pub enum WeatherCommand {
    /// Clothing advice for a temperature and condition
    Advise {
        /// Temperature in degrees Celsius
        #[arg(long, allow_negative_numbers = true)]
        temp: f64,

        /// Condition category (e.g. rain, clear, clouds)
        #[arg(long, default_value = "clear")]
        condition: String,
    },

    /// Look up current weather for a city
    Lookup {
        #[arg(value_name = "CITY")]
        city: String,
    },
}

pub async fn handle_command(command: WeatherCommand, config: StylistConfigManifest) -> Result<()> {
    match command {
        WeatherCommand::Advise { temp, condition } => {
            println!("{}", WeatherAdvisor::recommend(temp, &condition));
            Ok(())
        }
        WeatherCommand::Lookup { city } => {
            let stylist = EmbeddedStylist::from_config(config)?;
            if !stylist.weather().is_configured() {
                println!("{}", "No weather provider configured, showing neutral conditions.".yellow());
            }
            let context = stylist
                .weather()
                .lookup(&city)
                .await
                .with_context(|| format!("Weather lookup failed for {}", city))?;
            print_context(&context);
            Ok(())
        }
    }
}

fn print_context(context: &WeatherContext) {
    if let Some(city) = &context.city {
        println!("{}", city.bold());
    }
    println!("  {}°C, {}", context.temp, context.condition);
    println!("  Humidity: {}%", context.humidity);
    println!("  {}", context.recommendation.green());
}
