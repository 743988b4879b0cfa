use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::zones::AutoUnlockRule;
use prism_store::ZoneId;

pub const BUILTIN_ECONOMY_CONFIG: &str = include_str!("data/economy_config.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read economy config at '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse economy config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All tunable economy numbers in one document.
///
/// Every section carries defaults matching the builtin JSON, so a partial
/// override file only needs the sections it changes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub booster: BoosterTuning,
    pub attack: AttackTuning,
    pub zones: ZoneTuning,
    pub catalog: CatalogTuning,
    pub draw: DrawTuning,
    pub payout: PayoutTuning,
}

impl EconomyConfig {
    pub fn load_builtin() -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(BUILTIN_ECONOMY_CONFIG)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Income booster pricing: factor applied to draw payouts, lifetime, and
/// coin cost.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoosterTuning {
    pub factor: f64,
    pub duration_secs: u64,
    pub cost: u64,
}

impl Default for BoosterTuning {
    fn default() -> Self {
        Self {
            factor: 2.0,
            duration_secs: 30,
            cost: 150,
        }
    }
}

/// Attack-currency pricing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AttackTuning {
    pub currency_price_coins: u64,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            currency_price_coins: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ZoneTuning {
    pub unlock_costs: ZoneCosts,
    pub auto_unlock: Vec<AutoUnlockRule>,
}

impl Default for ZoneTuning {
    fn default() -> Self {
        Self {
            unlock_costs: ZoneCosts::default(),
            auto_unlock: vec![
                AutoUnlockRule {
                    zone: ZoneId::Cold,
                    watch_zone: ZoneId::Grays,
                    owned_fraction: 0.8,
                },
                AutoUnlockRule {
                    zone: ZoneId::Warm,
                    watch_zone: ZoneId::Grays,
                    owned_fraction: 1.0,
                },
            ],
        }
    }
}

/// Paid unlock cost per zone. Grays has no entry: it is always unlocked.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ZoneCosts {
    pub warm: u64,
    pub cold: u64,
    pub neutral: u64,
}

impl Default for ZoneCosts {
    fn default() -> Self {
        Self {
            warm: 50_000,
            cold: 10_000,
            neutral: 1_500,
        }
    }
}

/// Knobs for catalog construction. The special-tier identities (colors and
/// reserved names) are fixed by the builder; these control sizes, values,
/// and probability budgets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogTuning {
    pub size: usize,
    pub gray_count: usize,
    pub gray_budget: f64,
    pub epic_probability: f64,
    pub rare_probability: f64,
    pub epic_value: u64,
    pub rare_value: u64,
    pub common_value_min: u64,
    pub common_value_max: u64,
    pub common_weight_min: f64,
    pub common_weight_max: f64,
}

impl Default for CatalogTuning {
    fn default() -> Self {
        Self {
            size: 500,
            gray_count: 30,
            gray_budget: 0.6,
            epic_probability: 0.00005,
            rare_probability: 0.0001,
            epic_value: 10_000,
            rare_value: 1_000,
            common_value_min: 30,
            common_value_max: 50,
            common_weight_min: 0.85,
            common_weight_max: 1.15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DrawTuning {
    /// Rare/epic weight bonus applied during a boosted ("mega") draw.
    pub mega_boost: f64,
}

impl Default for DrawTuning {
    fn default() -> Self {
        Self { mega_boost: 0.2 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PayoutTuning {
    pub collection_bonus_per_item: f64,
    pub mega_bonus: f64,
    pub bonus_drop: BonusDropTuning,
}

impl Default for PayoutTuning {
    fn default() -> Self {
        Self {
            collection_bonus_per_item: 0.1,
            mega_bonus: 1.3,
            bonus_drop: BonusDropTuning::default(),
        }
    }
}

/// Spontaneous bonus-drop rewards and wave sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BonusDropTuning {
    pub min_reward: u64,
    pub max_reward: u64,
    /// Ascending roll thresholds; the first cut whose threshold exceeds the
    /// roll decides the wave size, otherwise the wave is empty.
    pub wave_cuts: Vec<WaveCut>,
}

impl Default for BonusDropTuning {
    fn default() -> Self {
        Self {
            min_reward: 100,
            max_reward: 200,
            wave_cuts: vec![
                WaveCut {
                    threshold: 0.01,
                    count: 25,
                },
                WaveCut {
                    threshold: 0.06,
                    count: 5,
                },
                WaveCut {
                    threshold: 0.16,
                    count: 3,
                },
                WaveCut {
                    threshold: 0.36,
                    count: 1,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WaveCut {
    pub threshold: f64,
    pub count: u32,
}
