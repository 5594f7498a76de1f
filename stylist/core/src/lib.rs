// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # VibeCraft Stylist Core
//!
//! Wardrobe cataloguing and outfit composition engine.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Domain model, composition engine, collaborator adapters and HTTP surface

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
