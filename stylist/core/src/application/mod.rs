// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod wardrobe_service;
pub mod outfit_service;
pub mod weather_service;

// Re-export services for convenience
pub use wardrobe_service::{StandardWardrobeService, WardrobeError, WardrobeService};
pub use outfit_service::{
    GenerateOutfitsRequest, OutfitError, OutfitService, SaveOutfitRequest, StandardOutfitService,
};
pub use weather_service::WeatherService;
