use rand::Rng;

use crate::catalog::PrizeTier;

/// Subset weight totals at or below this are treated as all-zero and fall
/// back to uniform selection.
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Select one tier from `tiers` by weighted random draw.
///
/// `boost` > 0 multiplies the weight of every rare/epic tier by
/// `1 + boost` in a local weight vector; stored catalog probabilities are
/// never touched. The walk subtracts weights in subset order and returns
/// the tier at which the remainder crosses zero, with the last entry as
/// the floating-point drift fallback. Returns `None` only for an empty
/// subset.
pub fn weighted_draw<'a, R: Rng>(
    tiers: &[&'a PrizeTier],
    boost: f64,
    rng: &mut R,
) -> Option<&'a PrizeTier> {
    if tiers.is_empty() {
        return None;
    }

    let mut weights: Vec<f64> = tiers
        .iter()
        .map(|tier| tier.draw_probability.max(0.0))
        .collect();
    let mut total: f64 = weights.iter().sum();

    if total <= WEIGHT_EPSILON {
        // Nothing usable to weight by.
        let position = rng.gen_range(0..tiers.len());
        return Some(tiers[position]);
    }

    if boost > 0.0 {
        for (weight, tier) in weights.iter_mut().zip(tiers) {
            if tier.rarity.is_boostable() {
                *weight *= 1.0 + boost;
            }
        }
        total = weights.iter().sum();
    }

    let mut remaining = rng.gen_range(0.0..total);
    for (&tier, weight) in tiers.iter().zip(&weights) {
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(tier);
        }
    }
    tiers.last().copied()
}
