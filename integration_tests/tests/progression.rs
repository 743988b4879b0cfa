mod common;

use anyhow::Result;
use prism_core::{buy_booster, DrawKind, PrizeId, ZoneId};

#[test]
fn booster_scales_payouts_until_it_expires() -> Result<()> {
    let harness = common::harness();
    let mut rng = common::rng(303);
    let mut ledger = harness.manager.register("booster-fan", "secret", &mut rng)?;

    ledger.credit_coins(1_000);
    let booster = buy_booster(&mut ledger, &harness.config.booster, 0)?;
    assert_eq!(booster.expires_at_ms, 30_000);
    assert_eq!(ledger.account().coins(), 850);

    let boosted = ledger.play_draw(
        &harness.catalog,
        &harness.policy,
        &harness.config,
        DrawKind::Standard,
        &mut rng,
        1_000,
    )?;
    let tier = harness.catalog.tier(&boosted.tier_id).expect("tier exists");
    let expected = (tier.coin_value as f64
        * 2.0
        * (1.0 + 0.1 * ledger.account().collection().len() as f64))
        .round() as u64;
    assert_eq!(boosted.payout, expected, "x2 booster applies while active");

    // Past expiry the multiplier is gone and the booster list is purged.
    assert_eq!(ledger.current_multiplier(30_000), 1.0);
    assert!(ledger.account().boosters().is_empty());
    Ok(())
}

#[test]
fn gray_completion_opens_zones_automatically() -> Result<()> {
    let harness = common::harness();
    let mut rng = common::rng(404);
    let mut ledger = harness.manager.register("collector", "secret", &mut rng)?;

    let gray_ids: Vec<PrizeId> = harness
        .catalog
        .tiers_in_zone(ZoneId::Grays)
        .map(|tier| tier.id.clone())
        .collect();

    // 23 grays: below the 80% cold milestone.
    for id in gray_ids.iter().take(23) {
        let tier = harness.catalog.tier(id).expect("gray tier");
        ledger.award(tier);
    }
    assert!(ledger
        .auto_unlock_zones(&harness.policy, &harness.catalog)
        .is_empty());

    // The 24th gray tips cold over its milestone.
    let tier = harness.catalog.tier(&gray_ids[23]).expect("gray tier");
    ledger.award(tier);
    let unlocked = ledger.auto_unlock_zones(&harness.policy, &harness.catalog);
    assert_eq!(unlocked, vec![ZoneId::Cold]);
    assert!(ledger.account().is_zone_unlocked(ZoneId::Cold));

    // Completing the ramp opens warm as well.
    for id in gray_ids.iter().skip(24) {
        let tier = harness.catalog.tier(id).expect("gray tier");
        ledger.award(tier);
    }
    let unlocked = ledger.auto_unlock_zones(&harness.policy, &harness.catalog);
    assert_eq!(unlocked, vec![ZoneId::Warm]);

    // Cold tiers are now eligible for draws.
    let eligible = harness.policy.eligible_tiers(&harness.catalog, ledger.account());
    let cold_count = harness.catalog.zone_size(ZoneId::Cold);
    let warm_count = harness.catalog.zone_size(ZoneId::Warm);
    assert_eq!(eligible.len(), 35 + cold_count + warm_count);
    Ok(())
}

#[test]
fn paid_unlock_and_reset_round_trip() -> Result<()> {
    let harness = common::harness();
    let mut rng = common::rng(505);
    let mut ledger = harness.manager.register("spender", "secret", &mut rng)?;

    let neutral_cost = harness.policy.unlock_cost(ZoneId::Neutral);
    assert_eq!(neutral_cost, 1_500);

    ledger.credit_coins(100);
    assert!(
        !ledger.unlock_zone(ZoneId::Neutral, neutral_cost),
        "100 coins cannot buy a 1500-coin zone"
    );
    assert_eq!(ledger.account().coins(), 100);

    ledger.credit_coins(1_400);
    assert!(ledger.unlock_zone(ZoneId::Neutral, neutral_cost));
    assert_eq!(ledger.account().coins(), 0);

    // Give the account a profile color, then reset: progress clears, the
    // profile survives.
    let first_gray = harness.catalog.get("c-g01").expect("gray tier");
    ledger.award(first_gray);
    ledger.set_profile_color(first_gray)?;
    ledger.reset_progress();

    assert_eq!(ledger.account().coins(), 0);
    assert!(ledger.account().collection().is_empty());
    assert!(!ledger.account().is_zone_unlocked(ZoneId::Neutral));
    assert_eq!(ledger.account().profile_color(), Some(first_gray.color));
    Ok(())
}
