// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Uploaded image storage interface. The local filesystem implementation lives
// in infrastructure/image_store.rs.

use async_trait::async_trait;

use crate::domain::vision::ImageUpload;

/// Where a stored image can be found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Generated file name (`{millis}-{random}{ext}`)
    pub filename: String,

    /// Public path served by the HTTP layer (`/uploads/<filename>`)
    pub public_path: String,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, image: &ImageUpload) -> Result<StoredImage, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
