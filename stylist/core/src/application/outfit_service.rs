// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Outfit service
//!
//! Entry point for composition and the saved-outfit store.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Validate caller input, delegate to the composer, own saved outfits
//!
//! Saved outfits reference items by id only. Deleting an item leaves those
//! references dangling; [`OutfitService::resolve_items`] reports them as
//! removed rather than failing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::domain::composer::OutfitGenerator;
use crate::domain::outfit::{OutfitId, OutfitProposal, ResolvedItem, SavedOutfit};
use crate::domain::repository::{OutfitRepository, RepositoryError, WardrobeRepository};
use crate::domain::wardrobe::{ClothingItem, ItemId};
use crate::domain::weather::WeatherContext;

pub const DEFAULT_OCCASION: &str = "casual";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutfitsRequest {
    #[serde(default)]
    pub wardrobe_items: Vec<ClothingItem>,

    #[serde(default)]
    pub occasion: Option<String>,

    #[serde(default)]
    pub weather: Option<WeatherContext>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutfitRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub items: Vec<ItemId>,

    #[serde(default)]
    pub occasion: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum OutfitError {
    #[error("No wardrobe items provided")]
    EmptyWardrobe,

    #[error("Outfit not found: {0}")]
    NotFound(OutfitId),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

#[async_trait]
pub trait OutfitService: Send + Sync {
    async fn generate(&self, request: GenerateOutfitsRequest) -> Result<Vec<OutfitProposal>, OutfitError>;
    async fn save(&self, request: SaveOutfitRequest) -> Result<SavedOutfit, OutfitError>;
    async fn list(&self) -> Result<Vec<SavedOutfit>, OutfitError>;
    async fn delete(&self, id: &OutfitId) -> Result<(), OutfitError>;
    async fn resolve_items(&self, id: &OutfitId) -> Result<Vec<ResolvedItem>, OutfitError>;
}

pub struct StandardOutfitService {
    composer: Arc<dyn OutfitGenerator>,
    outfits: Arc<dyn OutfitRepository>,
    wardrobe: Arc<dyn WardrobeRepository>,
}

impl StandardOutfitService {
    pub fn new(
        composer: Arc<dyn OutfitGenerator>,
        outfits: Arc<dyn OutfitRepository>,
        wardrobe: Arc<dyn WardrobeRepository>,
    ) -> Self {
        Self {
            composer,
            outfits,
            wardrobe,
        }
    }
}

#[async_trait]
impl OutfitService for StandardOutfitService {
    async fn generate(&self, request: GenerateOutfitsRequest) -> Result<Vec<OutfitProposal>, OutfitError> {
        if request.wardrobe_items.is_empty() {
            return Err(OutfitError::EmptyWardrobe);
        }

        let occasion = request
            .occasion
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .unwrap_or(DEFAULT_OCCASION);

        let outfits = self
            .composer
            .compose(&request.wardrobe_items, occasion, request.weather.as_ref())
            .await;

        info!(
            occasion,
            wardrobe_size = request.wardrobe_items.len(),
            outfits = outfits.len(),
            "Outfits composed"
        );
        Ok(outfits)
    }

    async fn save(&self, request: SaveOutfitRequest) -> Result<SavedOutfit, OutfitError> {
        let name = match request.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Outfit {}", self.outfits.count().await? + 1),
        };

        let outfit = SavedOutfit::new(name, request.items, request.occasion);
        self.outfits.save(&outfit).await?;

        info!(outfit_id = %outfit.id, name = %outfit.name, "Outfit saved");
        Ok(outfit)
    }

    async fn list(&self) -> Result<Vec<SavedOutfit>, OutfitError> {
        Ok(self.outfits.list_all().await?)
    }

    async fn delete(&self, id: &OutfitId) -> Result<(), OutfitError> {
        match self.outfits.delete(id).await {
            Ok(()) => {
                info!(outfit_id = %id, "Outfit deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound(_)) => Err(OutfitError::NotFound(id.clone())),
            Err(e) => Err(e.into()),
        }
    }

    async fn resolve_items(&self, id: &OutfitId) -> Result<Vec<ResolvedItem>, OutfitError> {
        let outfit = self
            .outfits
            .find_by_id(id)
            .await?
            .ok_or_else(|| OutfitError::NotFound(id.clone()))?;

        let mut resolved = Vec::with_capacity(outfit.items.len());
        for item_id in outfit.items {
            match self.wardrobe.find_by_id(&item_id).await? {
                Some(item) => resolved.push(ResolvedItem::Present { item }),
                None => resolved.push(ResolvedItem::Removed { id: item_id }),
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback_composer::FallbackComposer;
    use crate::infrastructure::repositories::{InMemoryOutfitRepository, InMemoryWardrobeRepository};
    use parking_lot::Mutex;

    /// Records what the service passed through to the composer
    #[derive(Default)]
    struct RecordingComposer {
        calls: Mutex<Vec<(usize, String, bool)>>,
    }

    #[async_trait]
    impl OutfitGenerator for RecordingComposer {
        async fn compose(
            &self,
            wardrobe: &[ClothingItem],
            occasion: &str,
            weather: Option<&WeatherContext>,
        ) -> Vec<OutfitProposal> {
            self.calls
                .lock()
                .push((wardrobe.len(), occasion.to_string(), weather.is_some()));
            Vec::new()
        }
    }

    fn service_with(composer: Arc<dyn OutfitGenerator>) -> StandardOutfitService {
        StandardOutfitService::new(
            composer,
            Arc::new(InMemoryOutfitRepository::new()),
            Arc::new(InMemoryWardrobeRepository::new()),
        )
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_subset() {
        let composer = Arc::new(RecordingComposer::default());
        let service = service_with(composer.clone());

        let result = service.generate(GenerateOutfitsRequest::default()).await;
        assert!(matches!(result, Err(OutfitError::EmptyWardrobe)));
        assert!(composer.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_generate_defaults_occasion() {
        let composer = Arc::new(RecordingComposer::default());
        let service = service_with(composer.clone());
        let wardrobe: Vec<ClothingItem> = serde_json::from_value(serde_json::json!([
            {"id": "item-1", "category": "top", "style": "casual"}
        ]))
        .unwrap();

        service
            .generate(GenerateOutfitsRequest {
                wardrobe_items: wardrobe.clone(),
                occasion: Some("  ".to_string()),
                weather: None,
            })
            .await
            .unwrap();
        service
            .generate(GenerateOutfitsRequest {
                wardrobe_items: wardrobe,
                occasion: Some("date".to_string()),
                weather: Some(WeatherContext::neutral(None)),
            })
            .await
            .unwrap();

        let calls = composer.calls.lock();
        assert_eq!(calls[0], (1, "casual".to_string(), false));
        assert_eq!(calls[1], (1, "date".to_string(), true));
    }

    #[tokio::test]
    async fn test_blank_name_gets_default() {
        let service = service_with(Arc::new(FallbackComposer::seeded(3)));

        let first = service
            .save(SaveOutfitRequest {
                name: Some("   ".to_string()),
                items: vec![ItemId::from("item-1")],
                occasion: None,
            })
            .await
            .unwrap();
        let second = service
            .save(SaveOutfitRequest {
                name: Some("Brunch".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let third = service.save(SaveOutfitRequest::default()).await.unwrap();

        assert_eq!(first.name, "Outfit 1");
        assert_eq!(second.name, "Brunch");
        assert_eq!(third.name, "Outfit 3");
        assert!(first.id.0.starts_with("outfit-"));
        assert_ne!(first.id, third.id);
    }
}
