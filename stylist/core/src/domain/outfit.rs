// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::wardrobe::{ClothingItem, ItemId};

/// Saved outfit identifier (`outfit-<time-ordered uuid>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutfitId(pub String);

impl OutfitId {
    pub fn new() -> Self {
        Self(format!("outfit-{}", Uuid::now_v7()))
    }
}

impl Default for OutfitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OutfitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OutfitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Unsaved outfit suggestion returned by a composer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitProposal {
    pub name: String,

    pub item_ids: Vec<ItemId>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedOutfit {
    pub id: OutfitId,

    pub name: String,

    /// May reference items that have since been deleted
    pub items: Vec<ItemId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,

    pub saved_at: DateTime<Utc>,
}

impl SavedOutfit {
    pub fn new(name: String, items: Vec<ItemId>, occasion: Option<String>) -> Self {
        Self {
            id: OutfitId::new(),
            name,
            items,
            occasion,
            saved_at: Utc::now(),
        }
    }
}

/// A saved outfit's item reference, resolved against the current wardrobe
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResolvedItem {
    Present { item: ClothingItem },
    Removed { id: ItemId },
}
