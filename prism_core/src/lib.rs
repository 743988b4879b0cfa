//! Economy core for the Prism color-collection clicker.
//!
//! Builds the probability-normalized prize catalog, performs weighted
//! draws, and owns per-account progression: coin and attack-currency
//! balances, the owned-color collection, time-limited boosters, zone
//! unlocks, and PvP attacks. Persistence and the session cache are
//! external collaborators reached through the traits in [`prism_store`].

mod account;
mod attack;
mod catalog;
mod color;
mod draw;
mod economy_config;
mod ledger;
mod metrics;
mod payout;
mod session;
mod shop;
mod zones;

use std::time::{SystemTime, UNIX_EPOCH};

pub use account::{Account, AttackNotice, Booster, Credential, Theme};
pub use attack::{attack_cost, AttackError, AttackReport};
pub use catalog::{Catalog, CatalogError, PrizeId, PrizeTier, BUILTIN_NAME_POOL, REFERENCE_SEED};
pub use color::Rgb;
pub use draw::{weighted_draw, WEIGHT_EPSILON};
pub use economy_config::{
    AttackTuning, BonusDropTuning, BoosterTuning, CatalogTuning, ConfigError, DrawTuning,
    EconomyConfig, PayoutTuning, WaveCut, ZoneCosts, ZoneTuning, BUILTIN_ECONOMY_CONFIG,
};
pub use ledger::{DrawOutcome, LedgerError, ProgressionLedger};
pub use metrics::EconomyMetrics;
pub use payout::{draw_payout, roll_bonus_reward, roll_bonus_wave, DrawKind};
pub use session::{AuthError, LeaderboardRow, SessionManager};
pub use shop::{buy_attack_currency, buy_booster, ShopError};
pub use zones::{AutoUnlockRule, ZonePolicy};

pub use prism_store::{Rarity, ZoneId};

/// Milliseconds since the Unix epoch, the timestamp unit used across the
/// ledger.
pub fn epoch_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
