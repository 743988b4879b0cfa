mod common;

use anyhow::Result;
use prism_core::{attack_cost, buy_attack_currency, AttackError, PrizeId};

#[test]
fn attack_flow_destroys_and_notifies() -> Result<()> {
    let harness = common::harness();
    let mut rng = common::rng(606);

    // Victim collects three grays, then the session moves on.
    let mut victim = harness.manager.register("victim", "secret", &mut rng)?;
    for id in ["c-g01", "c-g02", "c-g03"] {
        let tier = harness.catalog.get(id).expect("gray tier");
        victim.award(tier);
    }
    harness.manager.logout();

    // Attacker with a ten-color lead: cost is the lead, 10 - 3 = 7.
    let mut attacker = harness.manager.register("attacker", "secret", &mut rng)?;
    let gray_ids: Vec<PrizeId> = harness
        .catalog
        .tiers_in_zone(prism_core::ZoneId::Grays)
        .map(|tier| tier.id.clone())
        .collect();
    for id in gray_ids.iter().take(10) {
        attacker.award(harness.catalog.tier(id).expect("gray tier"));
    }

    attacker.credit_coins(10_000);
    for _ in 0..8 {
        buy_attack_currency(&mut attacker, &harness.config.attack)?;
    }
    assert_eq!(attacker.account().attack_coins(), 8);
    assert_eq!(attacker.account().coins(), 2_000);

    // The attacker's own snapshot must be visible before the victim is
    // loaded by username.
    harness.manager.outbox().flush();
    assert_eq!(attack_cost(attacker.account().collection().len(), 3), 7);
    let report = attacker.attack("victim", &mut rng, 42_000)?;
    assert_eq!(report.cost, 7);
    assert_eq!(attacker.account().attack_coins(), 1);

    // Victim's next login sees the damage and drains the notice once.
    harness.manager.outbox().flush();
    let mut victim = harness.manager.login("victim", "secret")?;
    assert_eq!(victim.account().collection().len(), 2);
    assert!(!victim.account().owns(&report.destroyed));

    let notices = victim.drain_attack_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].from, "attacker");
    assert_eq!(notices[0].destroyed, report.destroyed);
    assert_eq!(notices[0].at_ms, 42_000);
    assert!(victim.drain_attack_notices().is_empty(), "read-once delivery");
    Ok(())
}

#[test]
fn attacking_up_always_costs_the_floor() -> Result<()> {
    let harness = common::harness();
    let mut rng = common::rng(707);

    let mut leader = harness.manager.register("leader", "secret", &mut rng)?;
    for id in ["c-g01", "c-g02", "c-g03", "c-g04", "c-g05"] {
        leader.award(harness.catalog.get(id).expect("gray tier"));
    }
    harness.manager.logout();

    let mut underdog = harness.manager.register("underdog", "secret", &mut rng)?;
    underdog.award(harness.catalog.get("c-g06").expect("gray tier"));
    underdog.credit_attack_currency(1);

    harness.manager.outbox().flush();
    let report = underdog.attack("leader", &mut rng, 0)?;
    assert_eq!(report.cost, 1, "attacking a larger collection hits the floor");
    assert_eq!(underdog.account().attack_coins(), 0);
    Ok(())
}

#[test]
fn empty_victim_is_protected() -> Result<()> {
    let harness = common::harness();
    let mut rng = common::rng(808);

    harness.manager.register("empty", "secret", &mut rng)?;
    harness.manager.logout();

    let mut attacker = harness.manager.register("bully", "secret", &mut rng)?;
    attacker.credit_attack_currency(5);

    harness.manager.outbox().flush();
    let err = attacker
        .attack("empty", &mut rng, 0)
        .expect_err("no colors to destroy");
    assert!(matches!(err, AttackError::TargetEmpty(_)));
    assert_eq!(
        attacker.account().attack_coins(),
        5,
        "failed attack must not debit attack currency"
    );
    Ok(())
}
