use std::fmt;

use serde::{Deserialize, Serialize};

/// Rarity class of a prize tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Epic,
    Rare,
    CommonGray,
    Common,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Epic => "epic",
            Rarity::Rare => "rare",
            Rarity::CommonGray => "common_gray",
            Rarity::Common => "common",
        }
    }

    /// Tiers in these classes receive the boosted-draw weight bonus.
    pub fn is_boostable(&self) -> bool {
        matches!(self, Rarity::Epic | Rarity::Rare)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partition tag gating draw eligibility for common-rarity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneId {
    Grays,
    Warm,
    Cold,
    Neutral,
}

impl ZoneId {
    pub const ALL: [ZoneId; 4] = [ZoneId::Grays, ZoneId::Warm, ZoneId::Cold, ZoneId::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneId::Grays => "grays",
            ZoneId::Warm => "warm",
            ZoneId::Cold => "cold",
            ZoneId::Neutral => "neutral",
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active income multiplier as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoosterState {
    pub factor: f64,
    pub expires_at_ms: u64,
}

/// Incoming-attack notification as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackNoticeState {
    pub from: String,
    pub destroyed: String,
    pub at_ms: u64,
}

/// Per-account cosmetic overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeState {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub accent: Option<String>,
}

/// Full account snapshot, keyed by username in the remote document store.
///
/// Every field except `username` carries a serde default so documents
/// written by older revisions (or merged partially) still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub username: String,
    #[serde(default)]
    pub password_salt: String,
    #[serde(default)]
    pub password_digest: String,
    #[serde(default)]
    pub coins: u64,
    #[serde(default)]
    pub attack_coins: u64,
    #[serde(default)]
    pub collection: Vec<String>,
    #[serde(default)]
    pub boosters: Vec<BoosterState>,
    #[serde(default)]
    pub unlocked_zones: Vec<ZoneId>,
    #[serde(default)]
    pub profile_color: Option<String>,
    #[serde(default)]
    pub theme: ThemeState,
    #[serde(default)]
    pub attacks: Vec<AttackNoticeState>,
}

impl AccountRecord {
    /// Fresh record for a newly registered account: zero balances, empty
    /// collection, grays unlocked.
    pub fn fresh(username: impl Into<String>, salt: String, digest: String) -> Self {
        Self {
            username: username.into(),
            password_salt: salt,
            password_digest: digest,
            coins: 0,
            attack_coins: 0,
            collection: Vec::new(),
            boosters: Vec::new(),
            unlocked_zones: vec![ZoneId::Grays],
            profile_color: None,
            theme: ThemeState::default(),
            attacks: Vec::new(),
        }
    }
}
