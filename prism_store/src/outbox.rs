use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Sender};
use log::{debug, warn};

use crate::record::AccountRecord;
use crate::store::AccountStore;

enum OutboxCommand {
    Persist {
        username: String,
        record: AccountRecord,
    },
    Flush(Sender<()>),
}

/// Best-effort persistence queue.
///
/// Ledger operations enqueue the full account snapshot after every mutation
/// and continue immediately; a worker thread applies the writes in order.
/// A failed write is logged and dropped; the in-memory state stands
/// uncorrected and the next successful snapshot supersedes it.
#[derive(Clone)]
pub struct PersistOutbox {
    sender: Sender<OutboxCommand>,
}

impl PersistOutbox {
    /// Spawn the worker thread draining writes into `store`.
    ///
    /// The worker exits once every `PersistOutbox` clone has been dropped
    /// and the queue is empty.
    pub fn spawn(store: Arc<dyn AccountStore>) -> Self {
        let (sender, receiver) = unbounded::<OutboxCommand>();
        thread::spawn(move || {
            while let Ok(command) = receiver.recv() {
                match command {
                    OutboxCommand::Persist { username, record } => {
                        match store.put(&username, &record) {
                            Ok(()) => debug!("persisted account snapshot for '{username}'"),
                            Err(err) => warn!(
                                "account persist failed for '{username}': {err}; \
                                 in-memory state retained"
                            ),
                        }
                    }
                    OutboxCommand::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });
        Self { sender }
    }

    /// Queue a snapshot write. Never blocks and never fails from the
    /// caller's perspective.
    pub fn enqueue(&self, record: AccountRecord) {
        let command = OutboxCommand::Persist {
            username: record.username.clone(),
            record,
        };
        let _ = self.sender.send(command);
    }

    /// Block until every previously queued write has been attempted.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = unbounded();
        if self.sender.send(OutboxCommand::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ListOrder, MemoryStore, StoreError};

    #[test]
    fn enqueued_snapshots_reach_the_store() {
        let store = Arc::new(MemoryStore::new());
        let outbox = PersistOutbox::spawn(store.clone());

        let mut record = AccountRecord::fresh("ada", String::new(), String::new());
        record.coins = 7;
        outbox.enqueue(record.clone());
        record.coins = 11;
        outbox.enqueue(record);
        outbox.flush();

        let loaded = store.get("ada").unwrap().expect("snapshot persisted");
        assert_eq!(loaded.coins, 11, "later write wins");
    }

    struct FailingStore;

    impl AccountStore for FailingStore {
        fn get(&self, _username: &str) -> Result<Option<AccountRecord>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        fn put(&self, _username: &str, _record: &AccountRecord) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        fn list_all(
            &self,
            _order: ListOrder,
            _limit: usize,
        ) -> Result<Vec<AccountRecord>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn store_failure_is_swallowed() {
        let outbox = PersistOutbox::spawn(Arc::new(FailingStore));
        outbox.enqueue(AccountRecord::fresh("ada", String::new(), String::new()));
        // Must not panic or block; the failure is logged and dropped.
        outbox.flush();
    }
}
