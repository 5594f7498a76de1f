// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Provider Registry - builds the outbound collaborators from configuration
//
// Every slot is optional. A missing, disabled or unbuildable provider leaves
// its slot empty so callers take the neutral-default or fallback path.
// There are no retries here; a failed call is the caller's signal to degrade.

use crate::domain::llm::LLMProvider;
use crate::domain::stylist_config::{ProviderConfig, StylistConfigSpec};
use crate::domain::vision::ImageAnalyzer;
use crate::domain::weather::WeatherLookup;
use crate::infrastructure::weather::OpenWeatherMapClient;
use std::sync::Arc;
use tracing::{info, warn};

use super::gemini::GeminiAdapter;
use super::ollama::OllamaAdapter;
use super::openai::OpenAIAdapter;

#[derive(Clone, Default)]
pub struct ProviderRegistry {
    generation: Option<Arc<dyn LLMProvider>>,
    vision: Option<Arc<dyn ImageAnalyzer>>,
    weather: Option<Arc<dyn WeatherLookup>>,
}

impl ProviderRegistry {
    /// Create provider registry from stylist configuration
    pub fn from_config(spec: &StylistConfigSpec) -> Self {
        info!("Initializing provider registry");

        let generation = Self::build("generation", &spec.generation, Self::create_generation);
        let vision = Self::build("vision", &spec.vision, Self::create_vision);
        let weather = Self::build("weather", &spec.weather, Self::create_weather);

        if generation.is_none() {
            info!("No generative provider configured - outfits will come from the fallback composer");
        }
        if vision.is_none() {
            info!("No vision provider configured - uploads will get neutral attributes");
        }

        Self {
            generation,
            vision,
            weather,
        }
    }

    pub fn generation(&self) -> Option<Arc<dyn LLMProvider>> {
        self.generation.clone()
    }

    pub fn vision(&self) -> Option<Arc<dyn ImageAnalyzer>> {
        self.vision.clone()
    }

    pub fn weather(&self) -> Option<Arc<dyn WeatherLookup>> {
        self.weather.clone()
    }

    fn build<T: ?Sized>(
        slot: &str,
        config: &Option<ProviderConfig>,
        create: fn(&ProviderConfig) -> anyhow::Result<Arc<T>>,
    ) -> Option<Arc<T>> {
        let config = config.as_ref()?;

        if !config.enabled {
            info!("{} provider '{}' disabled, skipping", slot, config.name);
            return None;
        }

        match create(config) {
            Ok(provider) => {
                info!("Initialized {} provider: {} ({})", slot, config.name, config.provider_type);
                Some(provider)
            }
            Err(e) => {
                warn!("Failed to initialize {} provider '{}': {}", slot, config.name, e);
                None
            }
        }
    }

    fn create_generation(config: &ProviderConfig) -> anyhow::Result<Arc<dyn LLMProvider>> {
        let provider: Arc<dyn LLMProvider> = match config.provider_type.as_str() {
            "gemini" => Arc::new(GeminiAdapter::new(
                config.endpoint.clone(),
                Self::require_api_key(config)?,
                config.model.clone(),
            )),
            "openai" => Arc::new(OpenAIAdapter::new(
                config.endpoint.clone(),
                Self::require_api_key(config)?,
                config.model.clone(),
            )),
            "openai-compatible" => {
                // Local OpenAI-compatible servers usually run without auth
                let endpoint = config
                    .endpoint
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("openai-compatible providers need an endpoint"))?;
                Arc::new(OpenAIAdapter::new(
                    Some(endpoint),
                    Self::resolve_api_key(&config.api_key)?,
                    config.model.clone(),
                ))
            }
            "ollama" => Arc::new(OllamaAdapter::new(config.endpoint.clone(), config.model.clone())),
            _ => anyhow::bail!("Unsupported generation provider type: {}", config.provider_type),
        };

        Ok(provider)
    }

    fn create_vision(config: &ProviderConfig) -> anyhow::Result<Arc<dyn ImageAnalyzer>> {
        let analyzer: Arc<dyn ImageAnalyzer> = match config.provider_type.as_str() {
            "openai" => Arc::new(OpenAIAdapter::new(
                config.endpoint.clone(),
                Self::require_api_key(config)?,
                config.model.clone(),
            )),
            "openai-compatible" => {
                let endpoint = config
                    .endpoint
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("openai-compatible providers need an endpoint"))?;
                Arc::new(OpenAIAdapter::new(
                    Some(endpoint),
                    Self::resolve_api_key(&config.api_key)?,
                    config.model.clone(),
                ))
            }
            _ => anyhow::bail!("Unsupported vision provider type: {}", config.provider_type),
        };

        Ok(analyzer)
    }

    fn create_weather(config: &ProviderConfig) -> anyhow::Result<Arc<dyn WeatherLookup>> {
        match config.provider_type.as_str() {
            "openweathermap" => Ok(Arc::new(OpenWeatherMapClient::new(
                config.endpoint.clone(),
                Self::require_api_key(config)?,
            ))),
            _ => anyhow::bail!("Unsupported weather provider type: {}", config.provider_type),
        }
    }

    fn require_api_key(config: &ProviderConfig) -> anyhow::Result<String> {
        let key = Self::resolve_api_key(&config.api_key)?;
        if key.trim().is_empty() {
            anyhow::bail!("Provider type '{}' requires an api_key", config.provider_type);
        }
        Ok(key)
    }

    /// Resolve API key from config (supports "env:VAR_NAME" syntax)
    fn resolve_api_key(key: &Option<String>) -> anyhow::Result<String> {
        match key.as_deref() {
            Some(k) => match k.strip_prefix("env:") {
                Some(var_name) => std::env::var(var_name)
                    .map_err(|_| anyhow::anyhow!("Environment variable not set: {}", var_name)),
                None => Ok(k.to_string()),
            },
            None => Ok(String::new()),
        }
    }
}
