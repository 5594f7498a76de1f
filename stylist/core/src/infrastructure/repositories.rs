// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// In-memory repositories. Vec-backed so listing keeps insertion order.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::domain::outfit::{OutfitId, SavedOutfit};
use crate::domain::repository::{OutfitRepository, RepositoryError, WardrobeRepository};
use crate::domain::wardrobe::{ClothingItem, ItemId};

#[derive(Clone, Default)]
pub struct InMemoryWardrobeRepository {
    items: Arc<RwLock<Vec<ClothingItem>>>,
}

impl InMemoryWardrobeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WardrobeRepository for InMemoryWardrobeRepository {
    async fn save(&self, item: &ClothingItem) -> Result<(), RepositoryError> {
        let mut items = self.items.write();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<ClothingItem>, RepositoryError> {
        Ok(self.items.read().iter().find(|i| &i.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<ClothingItem>, RepositoryError> {
        Ok(self.items.read().clone())
    }

    async fn delete(&self, id: &ItemId) -> Result<(), RepositoryError> {
        let mut items = self.items.write();
        let position = items
            .iter()
            .position(|i| &i.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        items.remove(position);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryOutfitRepository {
    outfits: Arc<RwLock<Vec<SavedOutfit>>>,
}

impl InMemoryOutfitRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OutfitRepository for InMemoryOutfitRepository {
    async fn save(&self, outfit: &SavedOutfit) -> Result<(), RepositoryError> {
        self.outfits.write().push(outfit.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OutfitId) -> Result<Option<SavedOutfit>, RepositoryError> {
        Ok(self.outfits.read().iter().find(|o| &o.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<SavedOutfit>, RepositoryError> {
        Ok(self.outfits.read().clone())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.outfits.read().len())
    }

    async fn delete(&self, id: &OutfitId) -> Result<(), RepositoryError> {
        let mut outfits = self.outfits.write();
        let position = outfits
            .iter()
            .position(|o| &o.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        outfits.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wardrobe::{Category, Style};
    use std::collections::BTreeSet;

    fn item(id: &str, category: Category) -> ClothingItem {
        ClothingItem {
            id: ItemId::from(id),
            category,
            subcategory: None,
            colors: vec![],
            style: Style::Casual,
            season: BTreeSet::new(),
            occasions: BTreeSet::new(),
            image_path: None,
            filename: None,
            uploaded_at: None,
        }
    }

    #[tokio::test]
    async fn test_wardrobe_upsert_keeps_position() {
        let repo = InMemoryWardrobeRepository::new();
        repo.save(&item("a", Category::Top)).await.unwrap();
        repo.save(&item("b", Category::Bottom)).await.unwrap();
        repo.save(&item("a", Category::Dress)).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, ItemId::from("a"));
        assert_eq!(all[0].category, Category::Dress);
        assert_eq!(all[1].id, ItemId::from("b"));
    }

    #[tokio::test]
    async fn test_wardrobe_delete_missing() {
        let repo = InMemoryWardrobeRepository::new();
        repo.save(&item("a", Category::Top)).await.unwrap();
        repo.delete(&ItemId::from("a")).await.unwrap();
        assert!(matches!(
            repo.delete(&ItemId::from("a")).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_outfits_in_insertion_order() {
        let repo = InMemoryOutfitRepository::new();
        let first = SavedOutfit::new("First".to_string(), vec![], None);
        let second = SavedOutfit::new("Second".to_string(), vec![], None);
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        let names: Vec<String> = repo.list_all().await.unwrap().into_iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["First", "Second"]);

        repo.delete(&first.id).await.unwrap();
        assert_eq!(repo.find_by_id(&first.id).await.unwrap(), None);
        assert_eq!(repo.find_by_id(&second.id).await.unwrap(), Some(second));
    }
}
