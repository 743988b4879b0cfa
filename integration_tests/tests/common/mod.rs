#![allow(dead_code)]

use std::sync::Arc;

use prism_core::{Catalog, EconomyConfig, SessionManager, ZonePolicy};
use prism_store::{MemorySessionCache, MemoryStore};
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub cache: Arc<MemorySessionCache>,
    pub manager: SessionManager,
    pub catalog: Catalog,
    pub config: EconomyConfig,
    pub policy: ZonePolicy,
}

pub fn harness() -> Harness {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(MemorySessionCache::new());
    let manager = SessionManager::new(store.clone(), cache.clone());
    let config = EconomyConfig::load_builtin().expect("builtin economy config parses");
    let catalog = Catalog::build_reference().expect("reference catalog builds");
    let policy = ZonePolicy::new(config.zones.clone());
    Harness {
        store,
        cache,
        manager,
        catalog,
        config,
        policy,
    }
}

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
