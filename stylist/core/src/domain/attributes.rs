// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Attribute resolution
//!
//! Merges detected attributes with the user's manual category/subcategory into
//! the canonical [`ClothingItem`].
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Ingestion-time reconciliation of AI and manual metadata
//!
//! Only `category` and `subcategory` can be overridden. Everything else comes
//! from detection (or the neutral default).

use tracing::{debug, warn};

use crate::domain::vision::{ImageAnalyzer, ImageUpload};
use crate::domain::wardrobe::{Category, ClothingItem, DetectedAttributes, ItemId, UnknownCategory};

/// Category value meaning "let detection decide"
pub const AUTO_CATEGORY: &str = "auto";

/// User-supplied overrides, already normalized
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualOverrides {
    pub category: Option<Category>,
    pub subcategory: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ManualOverrideError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
}

impl ManualOverrides {
    /// Normalize raw form values. `"auto"` and blank categories, and blank
    /// subcategories, are treated as absent.
    pub fn parse(
        category: Option<&str>,
        subcategory: Option<&str>,
    ) -> Result<Self, ManualOverrideError> {
        let category = match category.map(str::trim) {
            None | Some("") => None,
            Some(c) if c.eq_ignore_ascii_case(AUTO_CATEGORY) => None,
            Some(c) => Some(c.parse::<Category>()?),
        };

        let subcategory = subcategory
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self { category, subcategory })
    }
}

pub struct AttributeResolver;

impl AttributeResolver {
    /// Run image analysis, substituting the neutral default when no analyzer is
    /// configured or the analyzer fails. Never returns an error.
    pub async fn detect(
        analyzer: Option<&dyn ImageAnalyzer>,
        image: &ImageUpload,
    ) -> DetectedAttributes {
        let Some(analyzer) = analyzer else {
            debug!("No image analyzer configured, using neutral attributes");
            return DetectedAttributes::neutral();
        };

        match analyzer.analyze(image).await {
            Ok(attributes) => attributes,
            Err(e) => {
                warn!("Image analysis failed, using neutral attributes: {}", e);
                DetectedAttributes::neutral()
            }
        }
    }

    /// Build the canonical item. A manual value wins whenever it is present.
    pub fn resolve(
        id: ItemId,
        detected: DetectedAttributes,
        overrides: &ManualOverrides,
    ) -> ClothingItem {
        debug!(
            manual_category = ?overrides.category,
            detected_category = %detected.category,
            manual_subcategory = ?overrides.subcategory,
            detected_subcategory = ?detected.subcategory,
            "Resolving item attributes"
        );

        ClothingItem {
            id,
            category: overrides.category.unwrap_or(detected.category),
            subcategory: overrides.subcategory.clone().or(detected.subcategory),
            colors: detected.colors,
            style: detected.style,
            season: detected.season,
            occasions: detected.occasions,
            image_path: None,
            filename: None,
            uploaded_at: None,
        }
    }
}
