// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Local filesystem image store. Files land in the uploads directory and are
// served back by the HTTP layer under /uploads.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::storage::{ImageStore, StorageError, StoredImage};
use crate::domain::vision::ImageUpload;

pub const PUBLIC_PREFIX: &str = "/uploads";

pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn generate_filename(extension: &str) -> String {
        let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
        format!("{}-{}{}", Utc::now().timestamp_millis(), suffix, extension)
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, image: &ImageUpload) -> Result<StoredImage, StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let filename = Self::generate_filename(&image.extension());
        let path = self.root.join(&filename);
        tokio::fs::write(&path, &image.bytes).await?;

        debug!(path = %path.display(), bytes = image.bytes.len(), "Stored uploaded image");
        Ok(StoredImage {
            public_path: format!("{}/{}", PUBLIC_PREFIX, filename),
            filename,
        })
    }
}
