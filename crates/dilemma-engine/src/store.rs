//! Session store: opponent identity to in-flight session
//!
//! Plain map with no locking of its own; the engine owns the only instance
//! and serializes access to it.

use std::collections::{BTreeMap, HashMap};

use crate::session::{Session, Timestamp};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, opponent: &str) -> Option<&Session> {
        self.sessions.get(opponent)
    }

    pub fn contains(&self, opponent: &str) -> bool {
        self.sessions.contains_key(opponent)
    }

    /// Insert or overwrite unconditionally.
    pub fn put(&mut self, opponent: impl Into<String>, session: Session) {
        self.sessions.insert(opponent.into(), session);
    }

    /// Remove a session, returning it. No-op if absent.
    pub fn delete(&mut self, opponent: &str) -> Option<Session> {
        self.sessions.remove(opponent)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Session)> {
        self.sessions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of every session, ordered by opponent for stable output.
    pub fn snapshot_all(&self) -> BTreeMap<String, Session> {
        self.sessions
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Discard current contents and bulk-load `sessions`.
    pub fn replace_all(&mut self, sessions: impl IntoIterator<Item = (String, Session)>) {
        self.sessions = sessions.into_iter().collect();
    }

    /// Drop sessions idle for longer than `timeout_secs`, returning their opponents.
    pub fn remove_expired(&mut self, now: Timestamp, timeout_secs: i64) -> Vec<String> {
        let mut expired: Vec<String> = self
            .sessions
            .iter()
            .filter(|(_, s)| s.is_expired(now, timeout_secs))
            .map(|(k, _)| k.clone())
            .collect();
        expired.sort();

        for opponent in &expired {
            self.sessions.remove(opponent);
        }
        expired
    }
}
