//! Persistence contracts for the Prism economy core.
//!
//! Defines the serializable account snapshot exchanged with the remote
//! document store, the collaborator traits ([`AccountStore`],
//! [`SessionCache`]) the core talks to, in-memory reference implementations,
//! and the best-effort persistence outbox.

mod outbox;
mod record;
mod session;
mod store;

pub use outbox::PersistOutbox;
pub use record::{AccountRecord, AttackNoticeState, BoosterState, Rarity, ThemeState, ZoneId};
pub use session::{MemorySessionCache, SessionCache, SESSION_KEY};
pub use store::{AccountStore, ListOrder, MemoryStore, StoreError};
