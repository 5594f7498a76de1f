// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! In-process composition root
//!
//! Wires configuration, provider adapters, repositories and services together.
//! Used by `serve` for the HTTP API and by the offline commands directly.

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tracing::info;

use vibecraft_core::{
    application::{
        outfit_service::{OutfitService, StandardOutfitService},
        wardrobe_service::{StandardWardrobeService, WardrobeService},
        weather_service::WeatherService,
    },
    domain::{composer::OutfitComposer, stylist_config::StylistConfigManifest},
    infrastructure::{
        llm::registry::ProviderRegistry, InMemoryOutfitRepository, InMemoryWardrobeRepository,
        LocalImageStore,
    },
    presentation::{app, AppState},
};

pub struct EmbeddedStylist {
    config: StylistConfigManifest,
    wardrobe: Arc<dyn WardrobeService>,
    outfits: Arc<dyn OutfitService>,
    weather: WeatherService,
}

impl EmbeddedStylist {
    /// Validate the configuration and wire the services it describes
    pub fn from_config(config: StylistConfigManifest) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let registry = ProviderRegistry::from_config(&config.spec);

        let wardrobe_repo = Arc::new(InMemoryWardrobeRepository::new());
        let outfit_repo = Arc::new(InMemoryOutfitRepository::new());
        let image_store = Arc::new(LocalImageStore::new(config.spec.storage.uploads_dir.clone()));
        let composer = Arc::new(OutfitComposer::from_config(
            registry.generation(),
            &config.spec.composer,
        ));

        let wardrobe: Arc<dyn WardrobeService> = Arc::new(StandardWardrobeService::new(
            wardrobe_repo.clone(),
            image_store,
            registry.vision(),
        ));
        let outfits: Arc<dyn OutfitService> =
            Arc::new(StandardOutfitService::new(composer, outfit_repo, wardrobe_repo));
        let weather = WeatherService::new(registry.weather());

        info!(name = %config.metadata.name, "Stylist services initialized");

        Ok(Self {
            config,
            wardrobe,
            outfits,
            weather,
        })
    }

    pub fn config(&self) -> &StylistConfigManifest {
        &self.config
    }

    pub fn outfits(&self) -> &Arc<dyn OutfitService> {
        &self.outfits
    }

    pub fn weather(&self) -> &WeatherService {
        &self.weather
    }

    /// HTTP router over the shared services
    pub fn router(&self) -> Router {
        app(AppState {
            wardrobe: self.wardrobe.clone(),
            outfits: self.outfits.clone(),
            weather: self.weather.clone(),
            uploads_dir: self.config.spec.storage.uploads_dir.clone(),
            max_upload_bytes: self.config.spec.storage.max_upload_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_wires_without_providers() {
        let stylist = EmbeddedStylist::from_config(StylistConfigManifest::default()).unwrap();
        assert!(!stylist.weather().is_configured());
        assert_eq!(stylist.config().spec.network.port, 5000);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = StylistConfigManifest::default();
        config.kind = "NodeConfig".to_string();
        assert!(EmbeddedStylist::from_config(config).is_err());
    }
}
