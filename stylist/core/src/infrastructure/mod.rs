// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod repositories;
pub mod image_store;
pub mod llm;
pub mod weather;

pub use image_store::LocalImageStore;
pub use repositories::{InMemoryOutfitRepository, InMemoryWardrobeRepository};
pub use weather::OpenWeatherMapClient;
