// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Fallback composer
//!
//! Dependency-free outfit builder used whenever the generative path is
//! unavailable or untrustworthy.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Availability fallback for outfit composition
//!
//! Structure is fixed: three rounds, each taking one random top, bottom and
//! pair of shoes when the wardrobe has them, plus outerwear on a coin flip.
//! Randomness only decides *which* item of a category is picked. If any round
//! comes up empty the whole composition returns no outfits.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::composer::OutfitGenerator;
use crate::domain::outfit::OutfitProposal;
use crate::domain::wardrobe::{Category, ClothingItem};
use crate::domain::weather::WeatherContext;

pub const FALLBACK_OUTFIT_COUNT: usize = 3;
pub const FALLBACK_DESCRIPTION: &str = "A balanced combo built from your available items.";
pub const FALLBACK_TIP: &str = "Try swapping colors for contrast.";

const OUTERWEAR_PROBABILITY: f64 = 0.5;

pub struct FallbackComposer {
    rng: Mutex<StdRng>,
}

impl FallbackComposer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible composer for tests and offline tooling
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self { rng: Mutex::new(rng) }
    }

    pub fn compose_from(&self, wardrobe: &[ClothingItem]) -> Vec<OutfitProposal> {
        let in_category = |category: Category| -> Vec<&ClothingItem> {
            wardrobe.iter().filter(|i| i.category == category).collect()
        };
        let tops = in_category(Category::Top);
        let bottoms = in_category(Category::Bottom);
        let shoes = in_category(Category::Shoes);
        let outerwear = in_category(Category::Outerwear);

        let mut rng = self.rng.lock();
        let mut outfits = Vec::with_capacity(FALLBACK_OUTFIT_COUNT);

        for n in 1..=FALLBACK_OUTFIT_COUNT {
            let mut item_ids = Vec::new();

            for group in [&tops, &bottoms, &shoes] {
                if let Some(item) = pick(&mut *rng, group) {
                    item_ids.push(item.id.clone());
                }
            }

            if !outerwear.is_empty() && rng.random_bool(OUTERWEAR_PROBABILITY) {
                if let Some(item) = pick(&mut *rng, &outerwear) {
                    item_ids.push(item.id.clone());
                }
            }

            if item_ids.is_empty() {
                debug!(round = n, "Fallback round selected no items, abandoning composition");
                return Vec::new();
            }

            outfits.push(OutfitProposal {
                name: format!("Everyday Fit {}", n),
                item_ids,
                description: FALLBACK_DESCRIPTION.to_string(),
                tip: FALLBACK_TIP.to_string(),
            });
        }

        outfits
    }
}

impl Default for FallbackComposer {
    fn default() -> Self {
        Self::new()
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, group: &[&'a ClothingItem]) -> Option<&'a ClothingItem> {
    if group.is_empty() {
        None
    } else {
        Some(group[rng.random_range(0..group.len())])
    }
}

#[async_trait]
impl OutfitGenerator for FallbackComposer {
    async fn compose(
        &self,
        wardrobe: &[ClothingItem],
        _occasion: &str,
        _weather: Option<&WeatherContext>,
    ) -> Vec<OutfitProposal> {
        self.compose_from(wardrobe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wardrobe::{ItemId, Style};
    use std::collections::BTreeSet;

    fn item(id: &str, category: Category) -> ClothingItem {
        ClothingItem {
            id: ItemId::from(id),
            category,
            subcategory: None,
            colors: vec!["black".to_string()],
            style: Style::Casual,
            season: BTreeSet::new(),
            occasions: BTreeSet::new(),
            image_path: None,
            filename: None,
            uploaded_at: None,
        }
    }

    fn two_of_each_without_outerwear() -> Vec<ClothingItem> {
        vec![
            item("top-1", Category::Top),
            item("top-2", Category::Top),
            item("bottom-1", Category::Bottom),
            item("bottom-2", Category::Bottom),
            item("shoes-1", Category::Shoes),
            item("shoes-2", Category::Shoes),
        ]
    }

    #[test]
    fn test_three_outfits_of_three_items() {
        let wardrobe = two_of_each_without_outerwear();
        let ids: BTreeSet<ItemId> = wardrobe.iter().map(|i| i.id.clone()).collect();

        for seed in 0..50 {
            let outfits = FallbackComposer::seeded(seed).compose_from(&wardrobe);
            assert_eq!(outfits.len(), 3);
            for outfit in &outfits {
                assert_eq!(outfit.item_ids.len(), 3);
                assert!(outfit.item_ids.iter().all(|id| ids.contains(id)));
                assert!(outfit.item_ids[0].as_str().starts_with("top-"));
                assert!(outfit.item_ids[1].as_str().starts_with("bottom-"));
                assert!(outfit.item_ids[2].as_str().starts_with("shoes-"));
            }
        }
    }

    #[test]
    fn test_generic_names_and_copy() {
        let outfits = FallbackComposer::seeded(7).compose_from(&two_of_each_without_outerwear());
        let names: Vec<&str> = outfits.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Everyday Fit 1", "Everyday Fit 2", "Everyday Fit 3"]);
        assert!(outfits.iter().all(|o| o.description == FALLBACK_DESCRIPTION));
        assert!(outfits.iter().all(|o| o.tip == FALLBACK_TIP));
    }

    #[test]
    fn test_only_accessories_yields_nothing() {
        let wardrobe = vec![item("belt", Category::Accessory), item("scarf", Category::Accessory)];
        assert!(FallbackComposer::seeded(1).compose_from(&wardrobe).is_empty());
    }

    #[test]
    fn test_dresses_are_not_composed() {
        let wardrobe = vec![item("dress-1", Category::Dress)];
        assert!(FallbackComposer::seeded(1).compose_from(&wardrobe).is_empty());
    }

    #[test]
    fn test_empty_wardrobe_yields_nothing() {
        assert!(FallbackComposer::seeded(1).compose_from(&[]).is_empty());
    }

    #[test]
    fn test_outerwear_is_optional_and_last() {
        let mut wardrobe = two_of_each_without_outerwear();
        wardrobe.push(item("coat-1", Category::Outerwear));

        let mut with_coat = 0;
        let mut without_coat = 0;
        for seed in 0..100 {
            for outfit in FallbackComposer::seeded(seed).compose_from(&wardrobe) {
                match outfit.item_ids.len() {
                    4 => {
                        assert_eq!(outfit.item_ids[3], ItemId::from("coat-1"));
                        with_coat += 1;
                    }
                    3 => without_coat += 1,
                    n => panic!("unexpected outfit size {}", n),
                }
            }
        }
        assert!(with_coat > 0);
        assert!(without_coat > 0);
    }

    #[test]
    fn test_same_seed_same_outfits() {
        let wardrobe = two_of_each_without_outerwear();
        let a = FallbackComposer::seeded(99).compose_from(&wardrobe);
        let b = FallbackComposer::seeded(99).compose_from(&wardrobe);
        assert_eq!(a, b);
    }
}
