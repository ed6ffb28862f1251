use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};

/// Idle time after which a session is forgotten unless configured otherwise.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Key/value storage behind the per-browser sessions.
///
/// Implementations must be cheap to call from request handlers; none of the
/// operations is async and callers never hold anything across an `.await`.
pub trait SessionStore: Send + Sync {
    fn get(&self, session_id: &str, key: &str) -> Option<String>;

    fn insert(&self, session_id: &str, key: &str, value: String);

    /// Removes `key` and returns the value it held.
    fn remove(&self, session_id: &str, key: &str) -> Option<String>;

    /// Drops every session idle for longer than the store's timeout and
    /// returns how many were dropped.
    fn evict_idle(&self) -> usize;
}

#[derive(Debug)]
struct Entry {
    values: HashMap<String, String>,
    touched: Instant,
}

impl Entry {
    fn new() -> Self {
        Self {
            values: HashMap::new(),
            touched: Instant::now(),
        }
    }

    fn is_idle(&self, timeout: Duration) -> bool {
        self.touched.elapsed() > timeout
    }
}

/// In-process [`SessionStore`] keyed by session id.
///
/// Every read or write refreshes the session's idle clock. A session idle for
/// longer than the timeout reads as empty and is dropped on the next access or
/// the next [`SessionStore::evict_idle`] sweep.
#[derive(Debug)]
pub struct MemoryStore {
    sessions: Mutex<HashMap<String, Entry>>,
    idle_timeout: Duration,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Number of sessions holding at least one key.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // a panic while holding the lock cannot leave a map half-written
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Live entry of `session_id` with its idle clock reset, dropping it first
    /// when it has expired.
    fn live<'a>(
        &self,
        sessions: &'a mut HashMap<String, Entry>,
        session_id: &str,
    ) -> Option<&'a mut Entry> {
        if sessions
            .get(session_id)
            .is_some_and(|entry| entry.is_idle(self.idle_timeout))
        {
            sessions.remove(session_id);
            return None;
        }

        let entry = sessions.get_mut(session_id)?;
        entry.touched = Instant::now();
        Some(entry)
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, session_id: &str, key: &str) -> Option<String> {
        let mut sessions = self.lock();
        self.live(&mut sessions, session_id)
            .and_then(|entry| entry.values.get(key))
            .cloned()
    }

    fn insert(&self, session_id: &str, key: &str, value: String) {
        let mut sessions = self.lock();
        if self.live(&mut sessions, session_id).is_none() {
            sessions.insert(session_id.to_string(), Entry::new());
        }
        if let Some(entry) = sessions.get_mut(session_id) {
            entry.values.insert(key.to_string(), value);
        }
    }

    fn remove(&self, session_id: &str, key: &str) -> Option<String> {
        let mut sessions = self.lock();
        let entry = self.live(&mut sessions, session_id)?;
        let removed = entry.values.remove(key);
        if entry.values.is_empty() {
            sessions.remove(session_id);
        }
        removed
    }

    fn evict_idle(&self) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_idle(self.idle_timeout));
        before - sessions.len()
    }
}
