// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the VibeCraft CLI

pub mod config;
pub mod outfit;
pub mod serve;
pub mod weather;

pub use self::config::ConfigCommand;
pub use self::outfit::OutfitCommand;
pub use self::weather::WeatherCommand;
