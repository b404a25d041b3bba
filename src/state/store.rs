//! Session store: connection id to session.
//!
//! # Thread Safety
//!
//! All operations are thread-safe via DashMap. Values are cloned in and out,
//! so no shard lock outlives a single call. Each connection task only touches
//! its own key, which keeps sessions private to their connection.

use super::dashmap_ext::DashMapExt;
use super::session::{ConnectionId, Session};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

/// Sessions of every live connection.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<ConnectionId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the session for `id`, creating an empty one if none exists.
    ///
    /// Repeated calls with the same id never create a second session.
    pub fn get_or_create(&self, id: &str) -> Session {
        match self.sessions.entry(id.to_string()) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => {
                debug!(conn = %id, "Session created");
                slot.insert(Session::new(id)).value().clone()
            }
        }
    }

    /// Return the session for `id` without creating one.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions.get_cloned(id)
    }

    /// Replace the stored session with `session`.
    ///
    /// Returns `false` (and stores nothing) when no session exists for
    /// `session.id`, so a commit racing a removal cannot resurrect it.
    pub fn commit(&self, session: Session) -> bool {
        match self.sessions.get_mut(&session.id) {
            Some(mut slot) => {
                *slot = session;
                true
            }
            None => false,
        }
    }

    /// Remove and return the session for `id`.
    pub fn remove(&self, id: &str) -> Option<Session> {
        let removed = self.sessions.remove(id).map(|(_, session)| session);
        if removed.is_some() {
            debug!(conn = %id, "Session removed");
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
