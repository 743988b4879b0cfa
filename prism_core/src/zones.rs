use serde::Deserialize;

use crate::account::Account;
use crate::catalog::{Catalog, PrizeTier};
use crate::economy_config::ZoneTuning;
use prism_store::ZoneId;

/// Milestone-driven free unlock: `zone` opens once the account owns at
/// least `owned_fraction` of the tiers in `watch_zone`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AutoUnlockRule {
    pub zone: ZoneId,
    pub watch_zone: ZoneId,
    pub owned_fraction: f64,
}

/// Zone cost table plus auto-unlock rules, gating draw eligibility and
/// paid unlocks.
#[derive(Debug, Clone)]
pub struct ZonePolicy {
    tuning: ZoneTuning,
}

impl ZonePolicy {
    pub fn new(tuning: ZoneTuning) -> Self {
        Self { tuning }
    }

    /// Coin cost to unlock `zone`. Grays is free and always unlocked.
    pub fn unlock_cost(&self, zone: ZoneId) -> u64 {
        match zone {
            ZoneId::Grays => 0,
            ZoneId::Warm => self.tuning.unlock_costs.warm,
            ZoneId::Cold => self.tuning.unlock_costs.cold,
            ZoneId::Neutral => self.tuning.unlock_costs.neutral,
        }
    }

    /// Tiers the account may draw: zoneless tiers plus tiers in an
    /// unlocked zone.
    pub fn eligible_tiers<'a>(&self, catalog: &'a Catalog, account: &Account) -> Vec<&'a PrizeTier> {
        catalog
            .tiers()
            .iter()
            .filter(|tier| match tier.zone {
                None => true,
                Some(zone) => account.is_zone_unlocked(zone),
            })
            .collect()
    }

    /// Zones whose milestone is now met but which the account has not yet
    /// unlocked, in rule order.
    pub fn pending_auto_unlocks(&self, catalog: &Catalog, account: &Account) -> Vec<ZoneId> {
        self.tuning
            .auto_unlock
            .iter()
            .filter(|rule| !account.is_zone_unlocked(rule.zone))
            .filter(|rule| owned_fraction(catalog, account, rule.watch_zone) >= rule.owned_fraction)
            .map(|rule| rule.zone)
            .collect()
    }
}

fn owned_fraction(catalog: &Catalog, account: &Account, zone: ZoneId) -> f64 {
    let total = catalog.zone_size(zone);
    if total == 0 {
        return 0.0;
    }
    let owned = account
        .collection()
        .iter()
        .filter(|id| {
            catalog
                .tier(id)
                .map_or(false, |tier| tier.zone == Some(zone))
        })
        .count();
    owned as f64 / total as f64
}
