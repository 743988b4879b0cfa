use thiserror::Error;

use crate::account::Booster;
use crate::economy_config::{AttackTuning, BoosterTuning};
use crate::ledger::{LedgerError, ProgressionLedger};

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("a booster is already active")]
    BoosterAlreadyActive,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Booster purchase flow. The ledger itself allows stacking; this calling
/// layer enforces the one-active-booster storefront rule.
pub fn buy_booster(
    ledger: &mut ProgressionLedger,
    pricing: &BoosterTuning,
    now_ms: u64,
) -> Result<Booster, ShopError> {
    let has_active = ledger
        .account()
        .boosters()
        .iter()
        .any(|booster| !booster.is_expired(now_ms));
    if has_active {
        return Err(ShopError::BoosterAlreadyActive);
    }
    let booster =
        ledger.purchase_multiplier(pricing.factor, pricing.duration_secs, pricing.cost, now_ms)?;
    Ok(booster)
}

/// Attack-currency purchase flow. Returns the new attack-currency balance.
pub fn buy_attack_currency(
    ledger: &mut ProgressionLedger,
    pricing: &AttackTuning,
) -> Result<u64, ShopError> {
    Ok(ledger.buy_attack_currency(pricing.currency_price_coins)?)
}
