use std::sync::Mutex;

/// Fixed key under which the current username is cached.
pub const SESSION_KEY: &str = "cc_current_v1";

/// Local session cache holding exactly one value: the authenticated
/// username. Absence means "no session". Cache failures are swallowed by
/// implementations; losing the cache only costs a re-login.
pub trait SessionCache: Send + Sync {
    fn load(&self) -> Option<String>;

    fn save(&self, username: &str);

    fn clear(&self);
}

/// In-memory session cache for tests and single-process use.
#[derive(Debug, Default)]
pub struct MemorySessionCache {
    current: Mutex<Option<String>>,
}

impl MemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionCache for MemorySessionCache {
    fn load(&self) -> Option<String> {
        self.current.lock().expect("session cache poisoned").clone()
    }

    fn save(&self, username: &str) {
        let mut current = self.current.lock().expect("session cache poisoned");
        *current = Some(username.to_string());
    }

    fn clear(&self) {
        let mut current = self.current.lock().expect("session cache poisoned");
        *current = None;
    }
}
