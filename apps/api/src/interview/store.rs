//! In-memory session store.
//!
//! Sessions live only for the lifetime of the process — there is no durable
//! persistence. The outer map uses a std `RwLock` and is never held across
//! an await; each session is guarded by its own `tokio::sync::Mutex`, held
//! for the full duration of a user action. That serializes the actions of
//! one interview (each action runs its external calls to completion before
//! the next begins) while leaving independent sessions free to proceed.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::interview::session::InterviewSession;

type SessionHandle = Arc<Mutex<InterviewSession>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session under its id and returns the id.
    pub fn insert(&self, session: InterviewSession) -> Uuid {
        let id = session.id;
        self.inner
            .write()
            .expect("session map poisoned")
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Fetches a handle to a live session. The caller locks the handle for
    /// the duration of the action it is about to run.
    pub fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.inner
            .read()
            .expect("session map poisoned")
            .get(&id)
            .cloned()
    }

    /// Discards a session entirely (the restart action). Returns false when
    /// no such session existed.
    pub fn remove(&self, id: Uuid) -> bool {
        self.inner
            .write()
            .expect("session map poisoned")
            .remove(&id)
            .is_some()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.inner.read().expect("session map poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> InterviewSession {
        InterviewSession::new(
            "Looking for a Rust Developer".to_string(),
            vec!["Why Rust?".to_string()],
        )
    }

    #[test]
    fn test_insert_then_get() {
        let store = SessionStore::new();
        let id = store.insert(sample_session());
        assert!(store.get(id).is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let store = SessionStore::new();
        assert!(store.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_remove_discards_session() {
        let store = SessionStore::new();
        let id = store.insert(sample_session());
        assert!(store.remove(id));
        assert!(store.get(id).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_remove_unknown_id_is_false() {
        let store = SessionStore::new();
        assert!(!store.remove(Uuid::new_v4()));
    }

    #[tokio::test]
    async fn test_session_mutation_through_handle() {
        let store = SessionStore::new();
        let id = store.insert(sample_session());

        {
            let handle = store.get(id).unwrap();
            let mut session = handle.lock().await;
            session.state.set_answer("because of the borrow checker".to_string());
        }

        let handle = store.get(id).unwrap();
        let session = handle.lock().await;
        assert!(session.state.has_answer());
    }
}
