// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Weather
//!
//! Weather context threaded into outfit composition, the temperature-band
//! advisor, and the weather lookup collaborator interface.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Map observed conditions to clothing advice

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Degrees Celsius, rounded
    pub temp: i32,

    /// Lowercase condition category (e.g. "rain", "sunny")
    pub condition: String,

    #[serde(default)]
    pub humidity: u8,

    #[serde(default)]
    pub recommendation: String,
}

impl WeatherContext {
    /// Fixed context used when no weather source is configured
    pub fn neutral(city: Option<String>) -> Self {
        Self {
            city,
            temp: 22,
            condition: "sunny".to_string(),
            humidity: 45,
            recommendation: "light layers recommended".to_string(),
        }
    }

    /// Sentence injected into the composition prompt
    pub fn summary(&self) -> String {
        format!("The weather is {}°C and {}.", self.temp, self.condition)
    }
}

pub const RAIN_GEAR_SUFFIX: &str = ". Bring rain gear!";

/// Temperature bands are lower-inclusive, upper-exclusive.
pub struct WeatherAdvisor;

impl WeatherAdvisor {
    pub fn recommend(temp_celsius: f64, condition: &str) -> String {
        let mut recommendation = if temp_celsius < 10.0 {
            "warm layers and jacket needed"
        } else if temp_celsius < 20.0 {
            "light jacket or sweater"
        } else if temp_celsius < 28.0 {
            "light, breathable clothes"
        } else {
            "stay cool with loose, light clothing"
        }
        .to_string();

        if condition.trim().eq_ignore_ascii_case("rain") {
            recommendation.push_str(RAIN_GEAR_SUFFIX);
        }

        recommendation
    }
}

#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Fetch current conditions for a city
    async fn lookup(&self, city: &str) -> Result<WeatherContext, WeatherError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),
}
