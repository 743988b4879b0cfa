mod common;

use anyhow::Result;
use prism_core::DrawKind;
use prism_store::AccountStore;
use serde_json::Value;

#[test]
fn snapshot_documents_keep_the_expected_shape() -> Result<()> {
    let harness = common::harness();
    let mut rng = common::rng(909);
    let mut ledger = harness.manager.register("document", "secret", &mut rng)?;

    let gray = harness.catalog.get("c-g01").expect("gray tier");
    ledger.award(gray);
    ledger.set_profile_color(gray)?;
    harness.manager.outbox().flush();

    let record = harness
        .store
        .get("document")?
        .expect("snapshot persisted");
    let document: Value = serde_json::to_value(&record)?;

    assert_eq!(document["username"], "document");
    assert_eq!(document["collection"][0], "c-g01");
    assert_eq!(document["unlocked_zones"][0], "grays");
    assert_eq!(document["profile_color"], gray.color.hex());
    assert!(document["password_digest"].as_str().is_some());
    assert_ne!(
        document["password_digest"], "secret",
        "credential is stored as a digest, not in clear"
    );
    Ok(())
}

#[test]
fn a_new_session_resumes_from_the_cache_with_stored_progress() -> Result<()> {
    let harness = common::harness();
    let mut rng = common::rng(1010);

    let mut ledger = harness.manager.register("returning", "secret", &mut rng)?;
    for _ in 0..5 {
        ledger.play_draw(
            &harness.catalog,
            &harness.policy,
            &harness.config,
            DrawKind::Standard,
            &mut rng,
            0,
        )?;
    }
    let coins = ledger.account().coins();
    let owned = ledger.account().collection().len();
    assert!(coins > 0 && owned > 0);
    harness.manager.outbox().flush();
    drop(ledger);

    // Same store and cache, fresh manager: the situation after a process
    // restart.
    let manager = prism_core::SessionManager::new(harness.store.clone(), harness.cache.clone());
    let resumed = manager
        .resume()?
        .expect("cached session restores without re-auth");
    assert_eq!(resumed.account().username(), "returning");
    assert_eq!(resumed.account().coins(), coins);
    assert_eq!(resumed.account().collection().len(), owned);

    manager.logout();
    assert!(manager.resume()?.is_none(), "logout forgets the session");
    Ok(())
}

#[test]
fn later_snapshot_supersedes_earlier_ones() -> Result<()> {
    let harness = common::harness();
    let mut rng = common::rng(1111);
    let mut ledger = harness.manager.register("writer", "secret", &mut rng)?;

    ledger.credit_coins(10);
    ledger.credit_coins(20);
    ledger.credit_coins(30);
    harness.manager.outbox().flush();

    let record = harness.store.get("writer")?.expect("snapshot persisted");
    assert_eq!(record.coins, 60, "writes apply in order, last state wins");
    Ok(())
}
