use std::sync::Arc;

use log::{info, warn};
use rand::Rng;
use thiserror::Error;

use crate::account::{Account, Credential};
use crate::color::Rgb;
use crate::ledger::ProgressionLedger;
use prism_store::{AccountStore, ListOrder, PersistOutbox, SessionCache, StoreError};

/// Leaderboard queries fetch at most this many records from the store.
const LEADERBOARD_LIMIT: usize = 100;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("a username is required")]
    MissingUsername,
    #[error("a password is required")]
    MissingPassword,
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
    #[error("no account named '{0}'")]
    UserNotFound(String),
    #[error("invalid credentials")]
    InvalidCredential,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One leaderboard entry after client-side re-ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub username: String,
    pub coins: u64,
    pub collection_size: usize,
    pub profile_color: Option<Rgb>,
}

/// Explicit session context: authenticates against the remote store,
/// remembers the current username in the session cache, and hands out a
/// ledger bound to the authenticated account. There is no process-global
/// user registry.
pub struct SessionManager {
    store: Arc<dyn AccountStore>,
    cache: Arc<dyn SessionCache>,
    outbox: PersistOutbox,
}

impl SessionManager {
    pub fn new(store: Arc<dyn AccountStore>, cache: Arc<dyn SessionCache>) -> Self {
        let outbox = PersistOutbox::spawn(store.clone());
        Self {
            store,
            cache,
            outbox,
        }
    }

    /// Create a new account. The initial snapshot is written through
    /// synchronously so a username collision cannot slip past the check.
    pub fn register<R: Rng>(
        &self,
        username: &str,
        secret: &str,
        rng: &mut R,
    ) -> Result<ProgressionLedger, AuthError> {
        if username.is_empty() {
            return Err(AuthError::MissingUsername);
        }
        if secret.is_empty() {
            return Err(AuthError::MissingPassword);
        }
        if self.store.get(username)?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let account = Account::register(username, Credential::derive(secret, rng));
        self.store.put(username, &account.snapshot())?;
        self.cache.save(username);
        info!("registered account '{username}'");
        Ok(self.ledger_for(account))
    }

    pub fn login(&self, username: &str, secret: &str) -> Result<ProgressionLedger, AuthError> {
        if username.is_empty() {
            return Err(AuthError::MissingUsername);
        }
        if secret.is_empty() {
            return Err(AuthError::MissingPassword);
        }
        let record = self
            .store
            .get(username)?
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))?;
        let account = Account::from(record);
        if !account.verify_secret(secret) {
            return Err(AuthError::InvalidCredential);
        }
        self.cache.save(username);
        Ok(self.ledger_for(account))
    }

    /// Restore the session cached from a previous run, if any. A cached
    /// username with no backing record clears the stale cache entry.
    pub fn resume(&self) -> Result<Option<ProgressionLedger>, AuthError> {
        let Some(username) = self.cache.load() else {
            return Ok(None);
        };
        match self.store.get(&username)? {
            Some(record) => Ok(Some(self.ledger_for(Account::from(record)))),
            None => {
                warn!("cached session for '{username}' has no stored account; clearing");
                self.cache.clear();
                Ok(None)
            }
        }
    }

    pub fn logout(&self) {
        self.cache.clear();
    }

    /// Ranked standings. The store orders by its own sort key; ranking is
    /// recomputed here by coin balance rather than trusting store order.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardRow>, StoreError> {
        let records = self
            .store
            .list_all(ListOrder::CollectionSize, LEADERBOARD_LIMIT)?;
        let mut rows: Vec<LeaderboardRow> = records
            .into_iter()
            .map(|record| LeaderboardRow {
                username: record.username,
                coins: record.coins,
                collection_size: record.collection.len(),
                profile_color: record.profile_color.as_deref().and_then(Rgb::parse),
            })
            .collect();
        rows.sort_by(|a, b| b.coins.cmp(&a.coins));
        Ok(rows)
    }

    /// Outbox shared by every ledger this session hands out.
    pub fn outbox(&self) -> &PersistOutbox {
        &self.outbox
    }

    fn ledger_for(&self, account: Account) -> ProgressionLedger {
        ProgressionLedger::new(account, self.store.clone(), self.outbox.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_store::{MemorySessionCache, MemoryStore};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn manager() -> (SessionManager, Arc<MemoryStore>, Arc<MemorySessionCache>) {
        let store = Arc::new(MemoryStore::new());
        let cache = Arc::new(MemorySessionCache::new());
        let manager = SessionManager::new(store.clone(), cache.clone());
        (manager, store, cache)
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(6)
    }

    #[test]
    fn register_validates_and_persists() {
        let (manager, store, cache) = manager();
        let mut rng = rng();

        assert!(matches!(
            manager.register("", "pw", &mut rng),
            Err(AuthError::MissingUsername)
        ));
        assert!(matches!(
            manager.register("ada", "", &mut rng),
            Err(AuthError::MissingPassword)
        ));

        let ledger = manager.register("ada", "pw", &mut rng).expect("registers");
        assert_eq!(ledger.account().username(), "ada");
        assert_eq!(cache.load(), Some("ada".to_string()));
        assert!(store.get("ada").unwrap().is_some(), "initial snapshot written through");

        assert!(matches!(
            manager.register("ada", "other", &mut rng),
            Err(AuthError::UsernameTaken(_))
        ));
    }

    #[test]
    fn login_checks_credentials() {
        let (manager, _store, cache) = manager();
        let mut rng = rng();
        manager.register("ada", "pw", &mut rng).expect("registers");
        manager.logout();
        assert_eq!(cache.load(), None);

        assert!(matches!(
            manager.login("ghost", "pw"),
            Err(AuthError::UserNotFound(_))
        ));
        assert!(matches!(
            manager.login("ada", "wrong"),
            Err(AuthError::InvalidCredential)
        ));

        let ledger = manager.login("ada", "pw").expect("logs in");
        assert_eq!(ledger.account().username(), "ada");
        assert_eq!(cache.load(), Some("ada".to_string()));
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let (manager, _store, _cache) = manager();
        let mut rng = rng();
        manager.register("Ada", "pw", &mut rng).expect("registers");
        assert!(matches!(
            manager.login("ada", "pw"),
            Err(AuthError::UserNotFound(_))
        ));
    }

    #[test]
    fn resume_follows_the_cache() {
        let (manager, _store, cache) = manager();
        let mut rng = rng();

        assert!(manager.resume().expect("resume").is_none());

        manager.register("ada", "pw", &mut rng).expect("registers");
        let resumed = manager.resume().expect("resume").expect("session cached");
        assert_eq!(resumed.account().username(), "ada");

        // A stale cache entry is cleared rather than surfaced.
        cache.save("ghost");
        assert!(manager.resume().expect("resume").is_none());
        assert_eq!(cache.load(), None);
    }

    #[test]
    fn leaderboard_reranks_by_coins() {
        let (manager, _store, _cache) = manager();
        let mut rng = rng();

        let mut rich = manager.register("rich", "pw", &mut rng).expect("registers");
        rich.credit_coins(5_000);
        let mut hoarder = manager.register("hoarder", "pw", &mut rng).expect("registers");
        hoarder.credit_coins(100);
        let mut middling = manager.register("middling", "pw", &mut rng).expect("registers");
        middling.credit_coins(700);
        manager.outbox().flush();

        let rows = manager.leaderboard().expect("leaderboard");
        let names: Vec<&str> = rows.iter().map(|row| row.username.as_str()).collect();
        assert_eq!(names, vec!["rich", "middling", "hoarder"]);
        assert_eq!(rows[0].coins, 5_000);
    }
}
