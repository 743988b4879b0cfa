use log::info;
use rand::Rng;
use thiserror::Error;

use crate::account::{Account, AttackNotice};
use crate::catalog::PrizeId;
use crate::ledger::ProgressionLedger;
use prism_store::StoreError;

#[derive(Debug, Error)]
pub enum AttackError {
    #[error("target account '{0}' not found")]
    TargetNotFound(String),
    #[error("target '{0}' has nothing to destroy")]
    TargetEmpty(String),
    #[error("insufficient attack currency: need {needed}, have {available}")]
    InsufficientAttackCurrency { needed: u64, available: u64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a resolved attack.
#[derive(Debug, Clone)]
pub struct AttackReport {
    pub destroyed: PrizeId,
    pub cost: u64,
}

/// Attack price from collection-size asymmetry.
///
/// Leading the victim's collection makes the attack cost the lead;
/// attacking a larger collection bottoms out at the floor of 1. Callers
/// must not flip this polarity, counter-intuitive as it reads.
pub fn attack_cost(attacker_items: usize, victim_items: usize) -> u64 {
    attacker_items.saturating_sub(victim_items).max(1) as u64
}

impl ProgressionLedger {
    /// Destroy one random prize in the victim's collection.
    ///
    /// Debits the attacker's attack currency by [`attack_cost`], removes a
    /// uniformly chosen item (destroyed, not transferred), queues a notice
    /// for the victim, and persists both accounts. The victim record is
    /// read fresh from the store and written back without a version check,
    /// so a concurrent victim session can race this write.
    pub fn attack<R: Rng>(
        &mut self,
        victim_username: &str,
        rng: &mut R,
        now_ms: u64,
    ) -> Result<AttackReport, AttackError> {
        let record = self
            .store
            .get(victim_username)?
            .ok_or_else(|| AttackError::TargetNotFound(victim_username.to_string()))?;
        let mut victim = Account::from(record);

        if victim.collection.is_empty() {
            return Err(AttackError::TargetEmpty(victim_username.to_string()));
        }

        let cost = attack_cost(self.account.collection.len(), victim.collection.len());
        if self.account.attack_coins < cost {
            return Err(AttackError::InsufficientAttackCurrency {
                needed: cost,
                available: self.account.attack_coins,
            });
        }

        self.account.attack_coins -= cost;

        let position = rng.gen_range(0..victim.collection.len());
        let destroyed = victim.collection.remove(position);
        victim.pending_attacks.push(AttackNotice {
            from: self.account.username.clone(),
            destroyed: destroyed.clone(),
            at_ms: now_ms,
        });

        self.metrics.attacks_resolved += 1;
        self.metrics.attack_currency_spent += cost;
        info!(
            "'{}' destroyed {destroyed} of '{victim_username}' for {cost}",
            self.account.username
        );

        self.outbox.enqueue(victim.snapshot());
        self.persist();

        Ok(AttackReport { destroyed, cost })
    }
}
