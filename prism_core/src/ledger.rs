use std::sync::Arc;

use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use crate::account::{Account, AttackNotice, Booster, Theme};
use crate::catalog::{Catalog, PrizeId, PrizeTier};
use crate::draw::weighted_draw;
use crate::economy_config::EconomyConfig;
use crate::metrics::EconomyMetrics;
use crate::payout::{draw_payout, DrawKind};
use crate::zones::ZonePolicy;
use prism_store::{AccountStore, PersistOutbox, ZoneId};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient funds: need {needed} coins, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("profile color must reference an owned prize")]
    ProfileColorNotOwned,
    #[error("no tier is eligible for this account's draw")]
    NoEligibleTiers,
}

/// Result of one full draw: selection, award, auto-unlocks, payout.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub tier_id: PrizeId,
    pub newly_owned: bool,
    pub payout: u64,
    pub unlocked_zones: Vec<ZoneId>,
}

/// Owns one account's authoritative state and is its sole writer.
///
/// Every mutating operation runs to completion against the in-memory copy
/// and concludes by queueing a full snapshot on the persistence outbox.
/// There is no version check against the remote store: concurrent writers
/// race last-writer-wins.
pub struct ProgressionLedger {
    pub(crate) account: Account,
    pub(crate) store: Arc<dyn AccountStore>,
    pub(crate) outbox: PersistOutbox,
    pub(crate) metrics: EconomyMetrics,
}

impl ProgressionLedger {
    pub fn new(account: Account, store: Arc<dyn AccountStore>, outbox: PersistOutbox) -> Self {
        Self {
            account,
            store,
            outbox,
            metrics: EconomyMetrics::default(),
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn metrics(&self) -> &EconomyMetrics {
        &self.metrics
    }

    /// Record a drawn tier. First-time acquisitions join the collection and
    /// credit the tier's base value; repeats are valid no-ops. Returns
    /// whether the tier was newly owned.
    pub fn award(&mut self, tier: &PrizeTier) -> bool {
        self.metrics.draws_awarded += 1;
        if self.account.owns(&tier.id) {
            return false;
        }
        self.account.collection.push(tier.id.clone());
        self.account.coins += tier.coin_value;
        self.metrics.first_acquisitions += 1;
        self.metrics.coins_credited += tier.coin_value;
        debug!(
            "'{}' acquired {} ({})",
            self.account.username, tier.id, tier.display_name
        );
        self.persist();
        true
    }

    /// Adjust the coin balance by a signed delta, clamping at zero.
    pub fn credit_coins(&mut self, delta: i64) {
        if delta >= 0 {
            self.account.coins = self.account.coins.saturating_add(delta as u64);
            self.metrics.coins_credited += delta as u64;
        } else {
            self.account.coins = self.account.coins.saturating_sub(delta.unsigned_abs());
        }
        self.persist();
    }

    /// Purge expired boosters, then return the product of the remaining
    /// factors (1 when none are active). Concurrent boosters stack
    /// multiplicatively; the purchase flow, not the ledger, limits how
    /// many can be active.
    pub fn current_multiplier(&mut self, now_ms: u64) -> f64 {
        let before = self.account.boosters.len();
        self.account
            .boosters
            .retain(|booster| !booster.is_expired(now_ms));
        if self.account.boosters.len() != before {
            self.persist();
        }
        self.account
            .boosters
            .iter()
            .map(|booster| booster.factor)
            .product()
    }

    pub fn purchase_multiplier(
        &mut self,
        factor: f64,
        duration_secs: u64,
        cost: u64,
        now_ms: u64,
    ) -> Result<Booster, LedgerError> {
        if self.account.coins < cost {
            return Err(LedgerError::InsufficientFunds {
                needed: cost,
                available: self.account.coins,
            });
        }
        self.account.coins -= cost;
        let booster = Booster {
            factor,
            expires_at_ms: now_ms + duration_secs * 1_000,
        };
        self.account.boosters.push(booster);
        self.metrics.boosters_sold += 1;
        self.persist();
        Ok(booster)
    }

    /// Paid zone unlock. Already-unlocked zones succeed as a no-op;
    /// insufficient funds fail without mutating the balance.
    pub fn unlock_zone(&mut self, zone: ZoneId, cost: u64) -> bool {
        if self.account.is_zone_unlocked(zone) {
            return true;
        }
        if self.account.coins < cost {
            return false;
        }
        self.account.coins -= cost;
        self.account.unlocked_zones.insert(zone);
        self.metrics.zones_unlocked += 1;
        info!("'{}' unlocked zone {zone}", self.account.username);
        self.persist();
        true
    }

    /// Grant every zone whose auto-unlock milestone is now met. Returns
    /// the newly opened zones.
    pub fn auto_unlock_zones(&mut self, policy: &ZonePolicy, catalog: &Catalog) -> Vec<ZoneId> {
        let newly = policy.pending_auto_unlocks(catalog, &self.account);
        if newly.is_empty() {
            return newly;
        }
        for zone in &newly {
            self.account.unlocked_zones.insert(*zone);
            self.metrics.zones_unlocked += 1;
            info!(
                "'{}' reached the milestone for zone {zone}",
                self.account.username
            );
        }
        self.persist();
        newly
    }

    /// Zero balances, clear collection and boosters, relock every zone but
    /// grays. The profile picture survives.
    pub fn reset_progress(&mut self) {
        self.account.coins = 0;
        self.account.attack_coins = 0;
        self.account.collection.clear();
        self.account.boosters.clear();
        self.account.unlocked_zones.clear();
        self.account.unlocked_zones.insert(ZoneId::Grays);
        self.persist();
    }

    /// Read-once delivery: returns the queued notices and clears the
    /// queue. A notice handed out here is never handed out again.
    pub fn drain_attack_notices(&mut self) -> Vec<AttackNotice> {
        let notices = std::mem::take(&mut self.account.pending_attacks);
        if !notices.is_empty() {
            self.persist();
        }
        notices
    }

    /// Convert coins into one unit of attack currency. Returns the new
    /// attack-currency balance.
    pub fn buy_attack_currency(&mut self, price: u64) -> Result<u64, LedgerError> {
        if self.account.coins < price {
            return Err(LedgerError::InsufficientFunds {
                needed: price,
                available: self.account.coins,
            });
        }
        self.account.coins -= price;
        self.account.attack_coins += 1;
        self.persist();
        Ok(self.account.attack_coins)
    }

    pub fn credit_attack_currency(&mut self, amount: u64) {
        self.account.attack_coins = self.account.attack_coins.saturating_add(amount);
        self.persist();
    }

    pub fn set_profile_color(&mut self, tier: &PrizeTier) -> Result<(), LedgerError> {
        if !self.account.owns(&tier.id) {
            return Err(LedgerError::ProfileColorNotOwned);
        }
        self.account.profile_color = Some(tier.color);
        self.persist();
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.account.theme = theme;
        self.persist();
    }

    /// One complete draw: filter by zone eligibility, select, award, run
    /// the auto-unlock check, then credit the payout.
    pub fn play_draw<R: Rng>(
        &mut self,
        catalog: &Catalog,
        policy: &ZonePolicy,
        config: &EconomyConfig,
        kind: DrawKind,
        rng: &mut R,
        now_ms: u64,
    ) -> Result<DrawOutcome, LedgerError> {
        let eligible = policy.eligible_tiers(catalog, &self.account);
        let boost = match kind {
            DrawKind::Standard => 0.0,
            DrawKind::Mega => config.draw.mega_boost,
        };
        let tier = weighted_draw(&eligible, boost, rng).ok_or(LedgerError::NoEligibleTiers)?;

        let newly_owned = self.award(tier);
        let unlocked_zones = self.auto_unlock_zones(policy, catalog);
        let multiplier = self.current_multiplier(now_ms);
        let payout = draw_payout(
            &config.payout,
            tier.coin_value,
            multiplier,
            self.account.collection.len(),
            kind,
        );
        self.credit_coins(payout as i64);

        Ok(DrawOutcome {
            tier_id: tier.id.clone(),
            newly_owned,
            payout,
            unlocked_zones,
        })
    }

    pub(crate) fn persist(&self) {
        self.outbox.enqueue(self.account.snapshot());
    }
}
