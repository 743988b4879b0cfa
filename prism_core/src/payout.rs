use rand::Rng;

use crate::economy_config::{BonusDropTuning, PayoutTuning};

/// Draw flavor: a mega draw carries the rare/epic probability boost and a
/// larger coin payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Standard,
    Mega,
}

/// Coins earned for one draw: base tier value scaled by the active booster
/// multiplier, the per-item collection bonus, and the mega bonus.
pub fn draw_payout(
    rules: &PayoutTuning,
    base_value: u64,
    multiplier: f64,
    collection_len: usize,
    kind: DrawKind,
) -> u64 {
    let collection_bonus = 1.0 + rules.collection_bonus_per_item * collection_len as f64;
    let mega_bonus = match kind {
        DrawKind::Standard => 1.0,
        DrawKind::Mega => rules.mega_bonus,
    };
    (base_value as f64 * multiplier * collection_bonus * mega_bonus).round() as u64
}

/// Coin reward for clicking one bonus drop.
pub fn roll_bonus_reward<R: Rng>(rules: &BonusDropTuning, rng: &mut R) -> u64 {
    rng.gen_range(rules.min_reward..=rules.max_reward)
}

/// Number of bonus drops in a spawn wave. Most waves are empty; the
/// ascending cut table maps rare low rolls to large waves.
pub fn roll_bonus_wave<R: Rng>(rules: &BonusDropTuning, rng: &mut R) -> u32 {
    let roll: f64 = rng.gen();
    for cut in &rules.wave_cuts {
        if roll < cut.threshold {
            return cut.count;
        }
    }
    0
}
