use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::record::AccountRecord;

/// Server-side sort key hint for [`AccountStore::list_all`].
///
/// The store orders results as a convenience; callers that care about a
/// specific ranking re-sort client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    CollectionSize,
    CoinBalance,
}

/// Error raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("account store unavailable: {0}")]
    Unavailable(String),
    #[error("stored document for '{username}' is corrupt: {reason}")]
    Corrupt { username: String, reason: String },
}

/// Remote account document store, keyed by username.
///
/// Modeled as blocking RPC from the core's perspective. `put` is an upsert
/// of the full snapshot; there are no multi-document transactional
/// guarantees, so concurrent writers race last-writer-wins.
pub trait AccountStore: Send + Sync {
    fn get(&self, username: &str) -> Result<Option<AccountRecord>, StoreError>;

    fn put(&self, username: &str, record: &AccountRecord) -> Result<(), StoreError>;

    /// Up to `limit` records, ordered descending by the given sort key.
    fn list_all(&self, order: ListOrder, limit: usize) -> Result<Vec<AccountRecord>, StoreError>;
}

/// In-memory reference store used by tests and local sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<String, AccountRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.read().expect("account map poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AccountStore for MemoryStore {
    fn get(&self, username: &str) -> Result<Option<AccountRecord>, StoreError> {
        let accounts = self.accounts.read().expect("account map poisoned");
        Ok(accounts.get(username).cloned())
    }

    fn put(&self, username: &str, record: &AccountRecord) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().expect("account map poisoned");
        accounts.insert(username.to_string(), record.clone());
        Ok(())
    }

    fn list_all(&self, order: ListOrder, limit: usize) -> Result<Vec<AccountRecord>, StoreError> {
        let accounts = self.accounts.read().expect("account map poisoned");
        let mut records: Vec<AccountRecord> = accounts.values().cloned().collect();
        match order {
            ListOrder::CollectionSize => {
                records.sort_by(|a, b| b.collection.len().cmp(&a.collection.len()))
            }
            ListOrder::CoinBalance => records.sort_by(|a, b| b.coins.cmp(&a.coins)),
        }
        records.truncate(limit);
        Ok(records)
    }
}
