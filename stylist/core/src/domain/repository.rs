// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contracts for each aggregate root: one repository per aggregate,
//! interface defined in the domain layer, implemented in
//! `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `WardrobeRepository` | `ClothingItem` | `InMemoryWardrobeRepository` |
//! | `OutfitRepository` | `SavedOutfit` | `InMemoryOutfitRepository` |
//!
//! Both preserve insertion order on listing. Deleting a clothing item never
//! touches saved outfits; their `items` may dangle.

use async_trait::async_trait;

use crate::domain::outfit::{OutfitId, SavedOutfit};
use crate::domain::wardrobe::{ClothingItem, ItemId};

/// Repository interface for ClothingItem aggregates
#[async_trait]
pub trait WardrobeRepository: Send + Sync {
    /// Save item (create, or replace in place keeping its position)
    async fn save(&self, item: &ClothingItem) -> Result<(), RepositoryError>;

    /// Find item by ID
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<ClothingItem>, RepositoryError>;

    /// List all items in insertion order
    async fn list_all(&self) -> Result<Vec<ClothingItem>, RepositoryError>;

    /// Delete item by ID; NotFound if absent
    async fn delete(&self, id: &ItemId) -> Result<(), RepositoryError>;
}

/// Repository interface for SavedOutfit aggregates
#[async_trait]
pub trait OutfitRepository: Send + Sync {
    /// Append a saved outfit
    async fn save(&self, outfit: &SavedOutfit) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &OutfitId) -> Result<Option<SavedOutfit>, RepositoryError>;

    /// List all outfits in insertion order
    async fn list_all(&self) -> Result<Vec<SavedOutfit>, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;

    /// Delete outfit by ID; NotFound if absent
    async fn delete(&self, id: &OutfitId) -> Result<(), RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
