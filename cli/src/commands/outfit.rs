// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Offline outfit composition
//!
//! Runs the same composer the HTTP API uses against a wardrobe JSON file.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use vibecraft_core::application::outfit_service::GenerateOutfitsRequest;
use vibecraft_core::domain::outfit::OutfitProposal;
use vibecraft_core::domain::stylist_config::StylistConfigManifest;
use vibecraft_core::domain::wardrobe::{ClothingItem, ItemId};

use crate::embedded::EmbeddedStylist;

#[derive(Subcommand)]
pub enum OutfitCommand {
    /// Compose outfits from a wardrobe file
    Generate {
        /// JSON array of clothing items, or a `{"wardrobeItems": [...]}` object
        #[arg(short, long, value_name = "FILE")]
        wardrobe: PathBuf,

        /// Occasion to dress for (default: casual)
        #[arg(short, long)]
        occasion: Option<String>,

        /// Thread current weather for this city into the request
        #[arg(long)]
        city: Option<String>,

        /// Print raw JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WardrobeFile {
    Items(Vec<ClothingItem>),
    Request {
        #[serde(rename = "wardrobeItems")]
        wardrobe_items: Vec<ClothingItem>,
    },
}

pub async fn handle_command(command: OutfitCommand, config: StylistConfigManifest) -> Result<()> {
    match command {
        OutfitCommand::Generate {
            wardrobe,
            occasion,
            city,
            json,
        } => generate(config, &wardrobe, occasion, city, json).await,
    }
}

async fn generate(
    config: StylistConfigManifest,
    wardrobe_path: &Path,
    occasion: Option<String>,
    city: Option<String>,
    as_json: bool,
) -> Result<()> {
    let items = load_wardrobe(wardrobe_path)?;
    let stylist = EmbeddedStylist::from_config(config)?;

    let weather = match &city {
        Some(city) => stylist.weather().context_for(city).await,
        None => None,
    };

    let outfits = stylist
        .outfits()
        .generate(GenerateOutfitsRequest {
            wardrobe_items: items.clone(),
            occasion,
            weather,
        })
        .await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "outfits": outfits }))?);
    } else {
        print_outfits(&items, &outfits);
    }

    Ok(())
}

fn load_wardrobe(path: &Path) -> Result<Vec<ClothingItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read wardrobe file {:?}", path))?;
    let parsed: WardrobeFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse wardrobe file {:?}", path))?;

    Ok(match parsed {
        WardrobeFile::Items(items) => items,
        WardrobeFile::Request { wardrobe_items } => wardrobe_items,
    })
}

fn print_outfits(items: &[ClothingItem], outfits: &[OutfitProposal]) {
    if outfits.is_empty() {
        println!(
            "{}",
            "No outfits could be composed. Add tops, bottoms or shoes to the wardrobe.".yellow()
        );
        return;
    }

    let by_id: HashMap<&ItemId, &ClothingItem> = items.iter().map(|i| (&i.id, i)).collect();

    for outfit in outfits {
        println!("{}", outfit.name.bold());
        for id in &outfit.item_ids {
            match by_id.get(id) {
                Some(item) => {
                    let label = item.subcategory.as_deref().unwrap_or(item.category.as_str());
                    println!("  - {} {} ({})", item.colors.join("/"), label, id.to_string().dimmed());
                }
                None => println!("  - {}", id),
            }
        }
        if !outfit.description.is_empty() {
            println!("  {}", outfit.description);
        }
        if !outfit.tip.is_empty() {
            println!("  {} {}", "Tip:".cyan(), outfit.tip);
        }
        println!();
    }
}
