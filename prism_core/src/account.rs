use std::collections::BTreeSet;
use std::fmt::Write as _;

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::catalog::PrizeId;
use crate::color::Rgb;
use prism_store::{AccountRecord, AttackNoticeState, BoosterState, ThemeState, ZoneId};

/// Salted SHA-256 credential. The stored secret is never kept in clear;
/// verification recomputes the digest from the supplied secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    salt: String,
    digest: String,
}

impl Credential {
    pub fn derive<R: Rng>(secret: &str, rng: &mut R) -> Self {
        let salt_bytes: [u8; 16] = rng.gen();
        let salt = hex_string(&salt_bytes);
        let digest = digest_for(&salt, secret);
        Self { salt, digest }
    }

    pub fn from_parts(salt: String, digest: String) -> Self {
        Self { salt, digest }
    }

    pub fn verify(&self, secret: &str) -> bool {
        digest_for(&self.salt, secret) == self.digest
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

fn digest_for(salt: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn hex_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Time-limited income multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Booster {
    pub factor: f64,
    pub expires_at_ms: u64,
}

impl Booster {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.expires_at_ms <= now_ms
    }
}

/// Incoming-attack notification awaiting delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackNotice {
    pub from: String,
    pub destroyed: PrizeId,
    pub at_ms: u64,
}

/// Cosmetic theme overrides chosen by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Theme {
    pub background: Option<Rgb>,
    pub accent: Option<Rgb>,
}

/// Authoritative in-memory state for one registered account.
///
/// Fields are crate-private: all mutation flows through the progression
/// ledger, which persists a snapshot after every operation.
#[derive(Debug, Clone)]
pub struct Account {
    pub(crate) username: String,
    pub(crate) credential: Credential,
    pub(crate) coins: u64,
    pub(crate) attack_coins: u64,
    pub(crate) collection: Vec<PrizeId>,
    pub(crate) boosters: Vec<Booster>,
    pub(crate) unlocked_zones: BTreeSet<ZoneId>,
    pub(crate) profile_color: Option<Rgb>,
    pub(crate) theme: Theme,
    pub(crate) pending_attacks: Vec<AttackNotice>,
}

impl Account {
    /// Fresh account with registration defaults: zero balances, empty
    /// collection, grays unlocked.
    pub fn register(username: impl Into<String>, credential: Credential) -> Self {
        Self {
            username: username.into(),
            credential,
            coins: 0,
            attack_coins: 0,
            collection: Vec::new(),
            boosters: Vec::new(),
            unlocked_zones: BTreeSet::from([ZoneId::Grays]),
            profile_color: None,
            theme: Theme::default(),
            pending_attacks: Vec::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn attack_coins(&self) -> u64 {
        self.attack_coins
    }

    pub fn collection(&self) -> &[PrizeId] {
        &self.collection
    }

    pub fn owns(&self, id: &PrizeId) -> bool {
        self.collection.contains(id)
    }

    pub fn boosters(&self) -> &[Booster] {
        &self.boosters
    }

    pub fn is_zone_unlocked(&self, zone: ZoneId) -> bool {
        zone == ZoneId::Grays || self.unlocked_zones.contains(&zone)
    }

    pub fn unlocked_zones(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.unlocked_zones.iter().copied()
    }

    pub fn profile_color(&self) -> Option<Rgb> {
        self.profile_color
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn pending_attacks(&self) -> &[AttackNotice] {
        &self.pending_attacks
    }

    pub fn verify_secret(&self, secret: &str) -> bool {
        self.credential.verify(secret)
    }

    /// Full snapshot for persistence.
    pub fn snapshot(&self) -> AccountRecord {
        AccountRecord::from(self)
    }
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        AccountRecord {
            username: account.username.clone(),
            password_salt: account.credential.salt().to_string(),
            password_digest: account.credential.digest().to_string(),
            coins: account.coins,
            attack_coins: account.attack_coins,
            collection: account
                .collection
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            boosters: account
                .boosters
                .iter()
                .map(|booster| BoosterState {
                    factor: booster.factor,
                    expires_at_ms: booster.expires_at_ms,
                })
                .collect(),
            unlocked_zones: account.unlocked_zones.iter().copied().collect(),
            profile_color: account.profile_color.map(|color| color.hex()),
            theme: ThemeState {
                background: account.theme.background.map(|color| color.hex()),
                accent: account.theme.accent.map(|color| color.hex()),
            },
            attacks: account
                .pending_attacks
                .iter()
                .map(|notice| AttackNoticeState {
                    from: notice.from.clone(),
                    destroyed: notice.destroyed.as_str().to_string(),
                    at_ms: notice.at_ms,
                })
                .collect(),
        }
    }
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        let mut unlocked_zones: BTreeSet<ZoneId> = record.unlocked_zones.into_iter().collect();
        unlocked_zones.insert(ZoneId::Grays);

        let mut collection = Vec::with_capacity(record.collection.len());
        for id in record.collection {
            let id = PrizeId::new(id);
            if !collection.contains(&id) {
                collection.push(id);
            }
        }

        Self {
            username: record.username,
            credential: Credential::from_parts(record.password_salt, record.password_digest),
            coins: record.coins,
            attack_coins: record.attack_coins,
            collection,
            boosters: record
                .boosters
                .into_iter()
                .map(|state| Booster {
                    factor: state.factor,
                    expires_at_ms: state.expires_at_ms,
                })
                .collect(),
            unlocked_zones,
            profile_color: record
                .profile_color
                .as_deref()
                .and_then(Rgb::parse),
            theme: Theme {
                background: record.theme.background.as_deref().and_then(Rgb::parse),
                accent: record.theme.accent.as_deref().and_then(Rgb::parse),
            },
            pending_attacks: record
                .attacks
                .into_iter()
                .map(|state| AttackNotice {
                    from: state.from,
                    destroyed: PrizeId::new(state.destroyed),
                    at_ms: state.at_ms,
                })
                .collect(),
        }
    }
}
