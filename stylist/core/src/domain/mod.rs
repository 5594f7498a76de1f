// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain layer: wardrobe model, composition rules and collaborator interfaces.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Pure business rules; no transport or vendor details

pub mod wardrobe;
pub mod attributes;
pub mod outfit;
pub mod weather;
pub mod llm;
pub mod vision;
pub mod storage;
pub mod repository;
pub mod fallback_composer;
pub mod composer;
pub mod stylist_config;
