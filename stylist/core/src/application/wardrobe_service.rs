// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Wardrobe catalog use cases: ingestion, lookup, whole-field update, deletion.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::attributes::{AttributeResolver, ManualOverrideError, ManualOverrides};
use crate::domain::repository::{RepositoryError, WardrobeRepository};
use crate::domain::storage::{ImageStore, StorageError};
use crate::domain::vision::{ImageAnalyzer, ImageUpload};
use crate::domain::wardrobe::{ClothingItem, ItemId, ItemUpdate};

#[derive(Debug, thiserror::Error)]
pub enum WardrobeError {
    #[error("Uploaded image is empty")]
    EmptyImage,

    #[error("Unsupported image '{0}'. Only jpeg, jpg, png and webp images are allowed")]
    UnsupportedImage(String),

    #[error(transparent)]
    InvalidOverride(#[from] ManualOverrideError),

    #[error("Item not found: {0}")]
    NotFound(ItemId),

    #[error("Failed to store image: {0}")]
    Storage(#[from] StorageError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

#[async_trait]
pub trait WardrobeService: Send + Sync {
    async fn ingest(
        &self,
        upload: ImageUpload,
        overrides: ManualOverrides,
    ) -> Result<ClothingItem, WardrobeError>;
    async fn list(&self) -> Result<Vec<ClothingItem>, WardrobeError>;
    async fn get(&self, id: &ItemId) -> Result<ClothingItem, WardrobeError>;
    async fn update(&self, id: &ItemId, update: ItemUpdate) -> Result<ClothingItem, WardrobeError>;
    async fn delete(&self, id: &ItemId) -> Result<(), WardrobeError>;
}

pub struct StandardWardrobeService {
    repository: Arc<dyn WardrobeRepository>,
    images: Arc<dyn ImageStore>,
    analyzer: Option<Arc<dyn ImageAnalyzer>>,
}

impl StandardWardrobeService {
    pub fn new(
        repository: Arc<dyn WardrobeRepository>,
        images: Arc<dyn ImageStore>,
        analyzer: Option<Arc<dyn ImageAnalyzer>>,
    ) -> Self {
        Self {
            repository,
            images,
            analyzer,
        }
    }
}

#[async_trait]
impl WardrobeService for StandardWardrobeService {
    async fn ingest(
        &self,
        upload: ImageUpload,
        overrides: ManualOverrides,
    ) -> Result<ClothingItem, WardrobeError> {
        if upload.bytes.is_empty() {
            return Err(WardrobeError::EmptyImage);
        }
        if !upload.is_supported_image() {
            return Err(WardrobeError::UnsupportedImage(upload.file_name.clone()));
        }

        let stored = self.images.store(&upload).await?;

        let detected = AttributeResolver::detect(self.analyzer.as_deref(), &upload).await;
        let mut item = AttributeResolver::resolve(ItemId::new(), detected, &overrides);
        item.image_path = Some(stored.public_path);
        item.filename = Some(stored.filename);
        item.uploaded_at = Some(Utc::now());

        self.repository.save(&item).await?;

        info!(item_id = %item.id, category = %item.category, "Clothing item added to wardrobe");
        Ok(item)
    }

    async fn list(&self) -> Result<Vec<ClothingItem>, WardrobeError> {
        Ok(self.repository.list_all().await?)
    }

    async fn get(&self, id: &ItemId) -> Result<ClothingItem, WardrobeError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| WardrobeError::NotFound(id.clone()))
    }

    async fn update(&self, id: &ItemId, update: ItemUpdate) -> Result<ClothingItem, WardrobeError> {
        let mut item = self.get(id).await?;
        item.apply_update(update);
        self.repository.save(&item).await?;
        Ok(item)
    }

    async fn delete(&self, id: &ItemId) -> Result<(), WardrobeError> {
        match self.repository.delete(id).await {
            Ok(()) => {
                info!(item_id = %id, "Clothing item deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound(_)) => Err(WardrobeError::NotFound(id.clone())),
            Err(e) => Err(e.into()),
        }
    }
}
