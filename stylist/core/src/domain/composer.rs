// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Outfit composer
//!
//! Two-tier outfit generation: a generative attempt whose output is treated as
//! untrusted, backed by the [`FallbackComposer`].
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Orchestrate generative composition and its failure policy
//!
//! The generative attempt yields a [`GenerationOutcome`]. Every
//! [`RecoverableFailure`] is answered by the fallback and never reaches the
//! caller. Returned proposals only ever reference ids from the input wardrobe.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::fallback_composer::FallbackComposer;
use crate::domain::llm::{FinishReason, GenerationOptions, LLMError, LLMProvider};
use crate::domain::outfit::OutfitProposal;
use crate::domain::stylist_config::ComposerConfig;
use crate::domain::wardrobe::{Category, ClothingItem, ItemId, Style};
use crate::domain::weather::WeatherContext;

/// Anything that turns a wardrobe subset into outfit proposals
#[async_trait]
pub trait OutfitGenerator: Send + Sync {
    async fn compose(
        &self,
        wardrobe: &[ClothingItem],
        occasion: &str,
        weather: Option<&WeatherContext>,
    ) -> Vec<OutfitProposal>;
}

/// Result of the generative attempt
#[derive(Debug)]
pub enum GenerationOutcome {
    Generated(Vec<OutfitProposal>),
    Recoverable(RecoverableFailure),
}

/// Why a generative attempt was discarded
#[derive(Debug, thiserror::Error)]
pub enum RecoverableFailure {
    #[error("no generative backend configured")]
    Unavailable,

    #[error("generative backend failed: {0}")]
    Backend(#[from] LLMError),

    #[error("generative backend timed out after {0:?}")]
    TimedOut(Duration),

    #[error("response contained no structured block")]
    NoStructuredBlock,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("response was cut off at the token limit and could not be parsed")]
    Truncated,

    #[error("response contained no outfits referencing the wardrobe")]
    NoValidOutfits,
}

/// Reduced item projection sent to the generative backend
#[derive(Serialize)]
struct ItemSummary<'a> {
    id: &'a ItemId,
    category: Category,
    subcategory: Option<&'a str>,
    colors: &'a [String],
    style: Style,
}

pub struct OutfitComposer {
    provider: Option<Arc<dyn LLMProvider>>,
    fallback: FallbackComposer,
    options: GenerationOptions,
    timeout: Option<Duration>,
}

impl OutfitComposer {
    pub fn new(provider: Option<Arc<dyn LLMProvider>>, fallback: FallbackComposer) -> Self {
        Self {
            provider,
            fallback,
            options: GenerationOptions {
                json_output: true,
                ..Default::default()
            },
            timeout: None,
        }
    }

    pub fn from_config(provider: Option<Arc<dyn LLMProvider>>, config: &ComposerConfig) -> Self {
        Self::new(provider, FallbackComposer::new())
            .with_options(GenerationOptions {
                max_tokens: Some(config.max_tokens),
                temperature: Some(config.temperature),
                json_output: true,
            })
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn has_generative_backend(&self) -> bool {
        self.provider.is_some()
    }

    /// Single generative attempt. No retries.
    pub async fn attempt_generative(
        &self,
        wardrobe: &[ClothingItem],
        occasion: &str,
        weather: Option<&WeatherContext>,
    ) -> GenerationOutcome {
        let Some(provider) = &self.provider else {
            return GenerationOutcome::Recoverable(RecoverableFailure::Unavailable);
        };

        let prompt = match build_prompt(wardrobe, occasion, weather) {
            Ok(p) => p,
            Err(e) => {
                return GenerationOutcome::Recoverable(RecoverableFailure::Backend(
                    LLMError::InvalidInput(e.to_string()),
                ))
            }
        };

        let request = provider.generate(&prompt, &self.options);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, request).await {
                Ok(result) => result,
                Err(_) => return GenerationOutcome::Recoverable(RecoverableFailure::TimedOut(limit)),
            },
            None => request.await,
        };

        let response = match result {
            Ok(r) => r,
            Err(e) => return GenerationOutcome::Recoverable(e.into()),
        };

        info!(
            provider = %response.provider,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            finish_reason = ?response.finish_reason,
            "Generative composition returned"
        );

        match parse_outfits(&response.text, wardrobe) {
            Ok(outfits) => GenerationOutcome::Generated(outfits),
            Err(failure) if response.finish_reason == FinishReason::Length => {
                debug!("Unparsable reply hit the token limit: {}", failure);
                GenerationOutcome::Recoverable(RecoverableFailure::Truncated)
            }
            Err(failure) => GenerationOutcome::Recoverable(failure),
        }
    }
}

#[async_trait]
impl OutfitGenerator for OutfitComposer {
    async fn compose(
        &self,
        wardrobe: &[ClothingItem],
        occasion: &str,
        weather: Option<&WeatherContext>,
    ) -> Vec<OutfitProposal> {
        match self.attempt_generative(wardrobe, occasion, weather).await {
            GenerationOutcome::Generated(outfits) => outfits,
            GenerationOutcome::Recoverable(RecoverableFailure::Unavailable) => {
                debug!("No generative backend configured, using fallback composer");
                self.fallback.compose_from(wardrobe)
            }
            GenerationOutcome::Recoverable(failure) => {
                warn!("Generative composition discarded, using fallback composer: {}", failure);
                self.fallback.compose_from(wardrobe)
            }
        }
    }
}

fn build_prompt(
    wardrobe: &[ClothingItem],
    occasion: &str,
    weather: Option<&WeatherContext>,
) -> Result<String, serde_json::Error> {
    let summaries: Vec<ItemSummary<'_>> = wardrobe
        .iter()
        .map(|item| ItemSummary {
            id: &item.id,
            category: item.category,
            subcategory: item.subcategory.as_deref(),
            colors: &item.colors,
            style: item.style,
        })
        .collect();

    let items_json = serde_json::to_string_pretty(&summaries)?;
    let weather_line = weather.map(WeatherContext::summary).unwrap_or_default();

    Ok(format!(
        r#"Given these wardrobe items:
{items_json}

Create 3 outfit combinations for: {occasion}
{weather_line}

Return ONLY a JSON object with this structure:
{{
  "outfits": [
    {{
      "name": "creative outfit name",
      "itemIds": ["id1","id2"],
      "description": "why this works",
      "tip": "one styling tip"
    }}
  ]
}}
Return ONLY the JSON, no other text."#
    ))
}

/// Validate generative output and keep only ids present in the wardrobe
fn parse_outfits(
    text: &str,
    wardrobe: &[ClothingItem],
) -> Result<Vec<OutfitProposal>, RecoverableFailure> {
    let block = extract_structured_block(text).ok_or(RecoverableFailure::NoStructuredBlock)?;

    let mut parsed: serde_json::Value =
        serde_json::from_str(block).map_err(|e| RecoverableFailure::Malformed(e.to_string()))?;

    let outfits = parsed
        .get_mut("outfits")
        .map(serde_json::Value::take)
        .ok_or_else(|| RecoverableFailure::Malformed("missing 'outfits' field".to_string()))?;

    let serde_json::Value::Array(entries) = outfits else {
        return Err(RecoverableFailure::Malformed("'outfits' is not an array".to_string()));
    };

    if entries.is_empty() {
        return Err(RecoverableFailure::NoValidOutfits);
    }

    let mut undecodable = 0usize;
    let mut last_error = None;
    let proposals: Vec<OutfitProposal> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<OutfitProposal>(entry) {
            Ok(proposal) => Some(proposal),
            Err(e) => {
                undecodable += 1;
                last_error = Some(e.to_string());
                None
            }
        })
        .collect();

    if undecodable > 0 {
        warn!(undecodable, "Generative composition contained undecodable outfits");
    }

    if proposals.is_empty() {
        return Err(RecoverableFailure::Malformed(
            last_error.unwrap_or_else(|| "no decodable outfits".to_string()),
        ));
    }

    let known: HashSet<&ItemId> = wardrobe.iter().map(|i| &i.id).collect();
    let mut dropped_ids = 0usize;

    let valid: Vec<OutfitProposal> = proposals
        .into_iter()
        .filter_map(|mut proposal| {
            let before = proposal.item_ids.len();
            proposal.item_ids.retain(|id| known.contains(id));
            dropped_ids += before - proposal.item_ids.len();
            (!proposal.item_ids.is_empty()).then_some(proposal)
        })
        .collect();

    if dropped_ids > 0 {
        warn!(dropped_ids, "Generative composition referenced unknown item ids");
    }

    if valid.is_empty() {
        return Err(RecoverableFailure::NoValidOutfits);
    }

    Ok(valid)
}

/// First balanced `{...}` block, ignoring braces inside string literals
fn extract_structured_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}
