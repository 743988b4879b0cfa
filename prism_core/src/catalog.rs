use std::collections::{HashMap, HashSet};
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::color::Rgb;
use crate::economy_config::CatalogTuning;
use prism_store::{Rarity, ZoneId};

pub const BUILTIN_NAME_POOL: &str = include_str!("data/name_pool.json");

/// Seed pinned for the reference catalog, so every process start agrees on
/// the same probabilities and coin values.
pub const REFERENCE_SEED: u64 = 0x1A2B_3C4D;

/// Names reserved for the hand-set epic and rare tiers; the general
/// assignment sequence never emits them.
const RESERVED_NAMES: [&str; 5] = ["Naïa", "Nathan", "Robion", "Xavier", "Natalie"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrizeId(String);

impl PrizeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrizeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq)]
pub struct PrizeTier {
    pub id: PrizeId,
    pub color: Rgb,
    pub display_name: String,
    pub rarity: Rarity,
    pub coin_value: u64,
    pub draw_probability: f64,
    pub zone: Option<ZoneId>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse prize name pool: {0}")]
    ParseNamePool(#[from] serde_json::Error),
    #[error("prize name pool is empty after filtering reserved names")]
    EmptyNamePool,
    #[error("duplicate display name '{0}' in generated catalog")]
    DuplicateName(String),
}

/// Injective display-name source: consumes the deduplicated pool in order,
/// then appends a generation suffix ("II", "III", ...) on each wrap so no
/// name ever repeats.
struct NameAssigner {
    pool: Vec<String>,
    cursor: usize,
    generation: u32,
}

impl NameAssigner {
    fn from_builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_NAME_POOL)
    }

    fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let names: Vec<String> = serde_json::from_str(raw)?;
        let mut seen = HashSet::new();
        let pool: Vec<String> = names
            .into_iter()
            .filter(|name| !RESERVED_NAMES.contains(&name.as_str()))
            .filter(|name| seen.insert(name.clone()))
            .collect();
        if pool.is_empty() {
            return Err(CatalogError::EmptyNamePool);
        }
        Ok(Self {
            pool,
            cursor: 0,
            generation: 0,
        })
    }

    fn next_name(&mut self) -> String {
        let base = &self.pool[self.cursor];
        let label = if self.generation == 0 {
            base.clone()
        } else {
            format!("{} {}", base, roman_numeral(self.generation + 1))
        };
        self.cursor += 1;
        if self.cursor == self.pool.len() {
            self.cursor = 0;
            self.generation += 1;
        }
        label
    }
}

fn roman_numeral(mut value: u32) -> String {
    const DIGITS: [(u32, &str); 7] = [
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (weight, glyph) in DIGITS {
        while value >= weight {
            out.push_str(glyph);
            value -= weight;
        }
    }
    out
}

/// The full prize catalog: fixed-size, probability-normalized, shared
/// read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct Catalog {
    tiers: Vec<PrizeTier>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build the reference catalog with the pinned seed.
    pub fn build_reference() -> Result<Self, CatalogError> {
        Self::build(&CatalogTuning::default(), REFERENCE_SEED)
    }

    /// Build a catalog from explicit tuning and seed. Identical inputs
    /// produce identical catalogs on every platform.
    pub fn build(tuning: &CatalogTuning, seed: u64) -> Result<Self, CatalogError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut names = NameAssigner::from_builtin()?;
        let mut tiers: Vec<PrizeTier> = Vec::with_capacity(tuning.size);

        // Hand-set epic and rare identities. Probabilities start at the
        // legacy placeholders and are overwritten below.
        let specials = [
            ("c-0001", Rgb::BLACK, "Naïa", Rarity::Epic, tuning.epic_value, 0.001),
            ("c-0002", Rgb::WHITE, "Nathan", Rarity::Epic, tuning.epic_value, 0.001),
            ("c-0003", Rgb::RED, "Robion", Rarity::Rare, tuning.rare_value, 0.01),
            ("c-0004", Rgb::GREEN, "Xavier", Rarity::Rare, tuning.rare_value, 0.01),
            ("c-0005", Rgb::BLUE, "Natalie", Rarity::Rare, tuning.rare_value, 0.01),
        ];
        for (id, color, name, rarity, value, prob) in specials {
            tiers.push(PrizeTier {
                id: PrizeId::new(id),
                color,
                display_name: name.to_string(),
                rarity,
                coin_value: value,
                draw_probability: prob,
                zone: None,
            });
        }

        // Gray ramp: near-white down to a mid-gray floor, values 10..1.
        let gray_count = tuning.gray_count;
        let gray_steps = (gray_count - 1) as f64;
        for i in 0..gray_count {
            let lightness = (95.0 - i as f64 * (60.0 / gray_steps)).round();
            let value = 1 + ((gray_steps - i as f64) * (9.0 / gray_steps)).round() as u64;
            tiers.push(PrizeTier {
                id: PrizeId::new(format!("c-g{:02}", i + 1)),
                color: Rgb::from_hsl(0.0, 0.0, lightness),
                display_name: names.next_name(),
                rarity: Rarity::CommonGray,
                coin_value: value,
                draw_probability: 0.0,
                zone: Some(ZoneId::Grays),
            });
        }

        // Common fill: golden-angle hue stride crossed with drifting
        // saturation/lightness. Ids continue the legacy numbering, which
        // skips c-0006.
        let remaining = tuning.size.saturating_sub(tiers.len());
        for i in 0..remaining {
            let hue = (i * 137) % 360;
            let saturation = 60 + (i * 53) % 30;
            let lightness = 45 + (i * 71) % 30;
            let zone = if hue < 60 || hue >= 300 {
                ZoneId::Warm
            } else if (120..240).contains(&hue) {
                ZoneId::Cold
            } else {
                ZoneId::Neutral
            };
            tiers.push(PrizeTier {
                id: PrizeId::new(format!("c-{:04}", i + 7)),
                color: Rgb::from_hsl(hue as f64, saturation as f64, lightness as f64),
                display_name: names.next_name(),
                rarity: Rarity::Common,
                coin_value: rng.gen_range(tuning.common_value_min..=tuning.common_value_max),
                draw_probability: 0.0,
                zone: Some(zone),
            });
        }

        assign_probabilities(&mut tiers, tuning, &mut rng);

        let mut seen = HashSet::new();
        for tier in &tiers {
            if !seen.insert(tier.display_name.clone()) {
                return Err(CatalogError::DuplicateName(tier.display_name.clone()));
            }
        }

        let index = tiers
            .iter()
            .enumerate()
            .map(|(position, tier)| (tier.id.as_str().to_string(), position))
            .collect();

        Ok(Self { tiers, index })
    }

    pub fn tiers(&self) -> &[PrizeTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PrizeTier> {
        self.index.get(id).map(|&position| &self.tiers[position])
    }

    pub fn tier(&self, id: &PrizeId) -> Option<&PrizeTier> {
        self.get(id.as_str())
    }

    pub fn tiers_in_zone(&self, zone: ZoneId) -> impl Iterator<Item = &PrizeTier> {
        self.tiers.iter().filter(move |tier| tier.zone == Some(zone))
    }

    pub fn zone_size(&self, zone: ZoneId) -> usize {
        self.tiers_in_zone(zone).count()
    }
}

/// Fix the final probability layout: hand-set epic/rare masses, a fixed
/// budget spread over the grays proportional to brightness, the remainder
/// spread over commons with mildly randomized weights, and any
/// floating-point drift folded into one designated entry.
fn assign_probabilities(tiers: &mut [PrizeTier], tuning: &CatalogTuning, rng: &mut ChaCha8Rng) {
    for tier in tiers.iter_mut() {
        match tier.rarity {
            Rarity::Epic => tier.draw_probability = tuning.epic_probability,
            Rarity::Rare => tier.draw_probability = tuning.rare_probability,
            _ => {}
        }
    }

    let reserved: f64 = tiers
        .iter()
        .filter(|tier| tier.rarity.is_boostable())
        .map(|tier| tier.draw_probability)
        .sum();
    let gray_budget = tuning.gray_budget;
    let common_budget = (1.0 - reserved - gray_budget).max(0.0);

    // Grays: lighter shade, larger share. All three channels are equal, so
    // the red channel stands in for brightness.
    let brightness_total: f64 = tiers
        .iter()
        .filter(|tier| tier.rarity == Rarity::CommonGray)
        .map(|tier| tier.color.r as f64)
        .sum();
    if brightness_total > 0.0 {
        for tier in tiers.iter_mut() {
            if tier.rarity == Rarity::CommonGray {
                tier.draw_probability = gray_budget * (tier.color.r as f64 / brightness_total);
            }
        }
    }

    let common_count = tiers
        .iter()
        .filter(|tier| tier.rarity == Rarity::Common)
        .count();
    if common_count > 0 {
        let weights: Vec<f64> = (0..common_count)
            .map(|_| rng.gen_range(tuning.common_weight_min..tuning.common_weight_max))
            .collect();
        let weight_total: f64 = weights.iter().sum();
        let mut next_weight = weights.into_iter();
        for tier in tiers.iter_mut() {
            if tier.rarity == Rarity::Common {
                let weight = next_weight.next().expect("weight per common tier");
                tier.draw_probability = (weight / weight_total) * common_budget;
            }
        }
    }

    let total: f64 = tiers.iter().map(|tier| tier.draw_probability).sum();
    let drift = 1.0 - total;
    if drift.abs() > 1e-12 {
        let has_common = tiers.iter().any(|tier| tier.rarity == Rarity::Common);
        let target = if has_common {
            tiers.iter_mut().find(|tier| tier.rarity == Rarity::Common)
        } else {
            tiers.first_mut()
        };
        if let Some(tier) = target {
            tier.draw_probability += drift;
        }
    }
}
