// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::weather::{WeatherContext, WeatherError, WeatherLookup};

/// Weather lookups with the neutral-context and omit-on-failure policies.
///
/// `lookup` surfaces upstream failures, `report` replaces them with the
/// neutral context, and `context_for` drops them so composition runs
/// without weather.
#[derive(Clone)]
pub struct WeatherService {
    source: Option<Arc<dyn WeatherLookup>>,
}

impl WeatherService {
    pub fn new(source: Option<Arc<dyn WeatherLookup>>) -> Self {
        Self { source }
    }

    pub fn is_configured(&self) -> bool {
        self.source.is_some()
    }

    pub async fn lookup(&self, city: &str) -> Result<WeatherContext, WeatherError> {
        match &self.source {
            Some(source) => source.lookup(city).await,
            None => {
                debug!(city, "No weather source configured, using neutral context");
                Ok(WeatherContext::neutral(Some(city.to_string())))
            }
        }
    }

    pub async fn report(&self, city: &str) -> WeatherContext {
        match self.lookup(city).await {
            Ok(context) => context,
            Err(e) => {
                warn!(city, "Weather lookup failed, using neutral context: {}", e);
                WeatherContext::neutral(Some(city.to_string()))
            }
        }
    }

    pub async fn context_for(&self, city: &str) -> Option<WeatherContext> {
        match self.lookup(city).await {
            Ok(context) => Some(context),
            Err(e) => {
                warn!(city, "Weather lookup failed, composing without weather: {}", e);
                None
            }
        }
    }
}
