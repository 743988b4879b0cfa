/// Running counters for one ledger's economy activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct EconomyMetrics {
    pub draws_awarded: u64,
    pub first_acquisitions: u64,
    pub coins_credited: u64,
    pub boosters_sold: u64,
    pub zones_unlocked: u64,
    pub attacks_resolved: u64,
    pub attack_currency_spent: u64,
}
