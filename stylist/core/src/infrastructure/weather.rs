// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// OpenWeatherMap Adapter
//
// Anti-Corruption Layer for the current-weather endpoint. Converts the
// vendor payload into a WeatherContext, with the recommendation computed
// by WeatherAdvisor from the unrounded temperature.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::weather::{WeatherAdvisor, WeatherContext, WeatherError, WeatherLookup};

pub const DEFAULT_OPENWEATHERMAP_ENDPOINT: &str = "https://api.openweathermap.org";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Deserialize)]
struct CurrentWeather {
    main: MainReadings,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Deserialize)]
struct MainReadings {
    temp: f64,
    #[serde(default)]
    humidity: f64,
}

#[derive(Deserialize)]
struct Condition {
    main: String,
}

impl OpenWeatherMapClient {
    pub fn new(endpoint: Option<String>, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_OPENWEATHERMAP_ENDPOINT.to_string()),
            api_key,
        }
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherMapClient {
    async fn lookup(&self, city: &str) -> Result<WeatherContext, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(if status == 401 || status == 403 {
                WeatherError::Authentication(error_text)
            } else if status == 404 {
                WeatherError::CityNotFound(city.to_string())
            } else {
                WeatherError::Provider(format!("HTTP {}: {}", status, error_text))
            });
        }

        let current: CurrentWeather = response
            .json()
            .await
            .map_err(|e| WeatherError::Provider(format!("Failed to parse response: {}", e)))?;

        let raw_condition = current
            .weather
            .into_iter()
            .next()
            .map(|c| c.main)
            .ok_or_else(|| WeatherError::Provider("Response carried no condition".into()))?;

        Ok(WeatherContext {
            city: Some(city.to_string()),
            temp: current.main.temp.round() as i32,
            condition: raw_condition.to_lowercase(),
            humidity: current.main.humidity.round().clamp(0.0, 100.0) as u8,
            recommendation: WeatherAdvisor::recommend(current.main.temp, &raw_condition),
        })
    }
}
