// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Wardrobe
//!
//! Clothing item aggregate and its attribute vocabularies.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Canonical item record shared by ingestion, composition and storage
//!
//! Field names are the wire contract (`camelCase`) and must stay stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque clothing item identifier (`item-<time-ordered uuid>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new() -> Self {
        Self(format!("item-{}", Uuid::now_v7()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Shoes,
    Outerwear,
    Accessory,
    Dress,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Top,
        Category::Bottom,
        Category::Shoes,
        Category::Outerwear,
        Category::Accessory,
        Category::Dress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Shoes => "shoes",
            Category::Outerwear => "outerwear",
            Category::Accessory => "accessory",
            Category::Dress => "dress",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown clothing category: '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Casual,
    Formal,
    Sporty,
    Streetwear,
    Bohemian,
    Minimalist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Work,
    Casual,
    Date,
    Party,
    Gym,
    Outdoor,
}

/// Attribute set produced by image analysis (or the neutral default)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedAttributes {
    pub category: Category,

    #[serde(default)]
    pub subcategory: Option<String>,

    pub colors: Vec<String>,

    pub style: Style,

    pub season: BTreeSet<Season>,

    pub occasions: BTreeSet<Occasion>,
}

impl DetectedAttributes {
    /// Substituted whenever detection is unavailable or fails
    pub fn neutral() -> Self {
        Self {
            category: Category::Top,
            subcategory: Some("unknown".to_string()),
            colors: vec!["unknown".to_string()],
            style: Style::Casual,
            season: Season::ALL.into_iter().collect(),
            occasions: BTreeSet::from([Occasion::Casual]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: ItemId,

    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    #[serde(default)]
    pub colors: Vec<String>,

    pub style: Style,

    #[serde(default)]
    pub season: BTreeSet<Season>,

    #[serde(default)]
    pub occasions: BTreeSet<Occasion>,

    /// Public path of the stored image (e.g. `/uploads/1700000000000-42.png`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl ClothingItem {
    /// Apply a whole-field replacement update. `id` never changes.
    pub fn apply_update(&mut self, update: ItemUpdate) {
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(subcategory) = update.subcategory {
            self.subcategory = Some(subcategory);
        }
        if let Some(colors) = update.colors {
            self.colors = colors;
        }
        if let Some(style) = update.style {
            self.style = style;
        }
        if let Some(season) = update.season {
            self.season = season;
        }
        if let Some(occasions) = update.occasions {
            self.occasions = occasions;
        }
    }
}

/// Replacement values for an existing item; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<BTreeSet<Season>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasions: Option<BTreeSet<Occasion>>,
}
