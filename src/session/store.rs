//! In-memory session store
//!
//! Maps opaque session identifiers (carried in a browser-session cookie) to
//! their [`SessionState`]. Each session is isolated; the lock is held only
//! for the in-memory update of a single request.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::state::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session store lock poisoned")]
    Poisoned,
}

/// Result of running a closure against a session
#[derive(Debug)]
pub struct SessionAccess<R> {
    pub id: SessionId,
    /// True when the session was created by this access (cookie must be set)
    pub created: bool,
    pub output: R,
}

pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, SessionState>>,
    idle_timeout: Duration,
    /// At capacity, creating a session drops the least recently seen one
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Run `f` against the session `id`, creating a fresh session when the
    /// id is absent, unknown or expired.
    pub fn with_session<R>(
        &self,
        id: Option<SessionId>,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> Result<SessionAccess<R>, SessionError> {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        self.evict_idle(&mut sessions, now);

        let (id, created) = match id {
            Some(id) if sessions.contains_key(&id) => (id, false),
            _ => (SessionId::generate(), true),
        };
        if created {
            self.evict_oldest(&mut sessions, now);
            info!(session = %id, active = sessions.len() + 1, "Created session");
        }

        let state = sessions.entry(id).or_insert_with(SessionState::new);
        state.touch(now);
        let output = f(state);

        Ok(SessionAccess {
            id,
            created,
            output,
        })
    }

    /// Run `f` against the session `id` only if it already exists.
    /// Never creates a session; a hit refreshes its idle timer.
    pub fn with_existing<R>(
        &self,
        id: Option<SessionId>,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> Result<Option<R>, SessionError> {
        let Some(id) = id else {
            return Ok(None);
        };

        let now = Instant::now();
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        self.evict_idle(&mut sessions, now);

        Ok(sessions.get_mut(&id).map(|state| {
            state.touch(now);
            f(state)
        }))
    }

    /// Read an existing session without creating or refreshing it
    pub fn peek<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&SessionState) -> R,
    ) -> Result<Option<R>, SessionError> {
        let sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(sessions.get(&id).map(f))
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn evict_oldest(&self, sessions: &mut HashMap<SessionId, SessionState>, now: Instant) {
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .max_by_key(|(_, state)| state.idle_for(now))
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            debug!(session = %oldest, "Evicted least recently seen session");
        }
    }

    fn evict_idle(&self, sessions: &mut HashMap<SessionId, SessionState>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, state| state.idle_for(now) < self.idle_timeout);

        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiosk::View;

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_secs(3600), 100)
    }

    #[test]
    fn test_session_id_round_trip() {
        let id = SessionId::generate();
        assert_eq!(id.to_string().parse::<SessionId>().unwrap(), id);
        assert!("not-a-session".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_creates_session_without_id() {
        let store = store();
        let access = store.with_session(None, |_| ()).unwrap();
        assert!(access.created);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reuses_known_session() {
        let store = store();
        let first = store.with_session(None, |s| s.enter(Some("A"))).unwrap();
        let second = store
            .with_session(Some(first.id), |s| s.submit("x").is_some())
            .unwrap();

        assert!(!second.created);
        assert_eq!(second.id, first.id);
        assert!(second.output);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_id_gets_fresh_session() {
        let store = store();
        let stale = SessionId::generate();
        let access = store.with_session(Some(stale), |_| ()).unwrap();
        assert!(access.created);
        assert_ne!(access.id, stale);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = store();
        let a = store.with_session(None, |s| s.enter(Some("A"))).unwrap().id;
        let b = store.with_session(None, |s| s.enter(Some("B"))).unwrap().id;

        store.with_session(Some(a), |s| s.submit("from-a").is_some()).unwrap();

        let b_records = store.peek(b, |s| s.records().len()).unwrap();
        let a_records = store.peek(a, |s| s.records().len()).unwrap();
        assert_eq!(b_records, Some(0));
        assert_eq!(a_records, Some(1));
    }

    #[test]
    fn test_peek_unknown_session() {
        let store = store();
        assert_eq!(store.peek(SessionId::generate(), |_| ()).unwrap(), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_idle_sessions_evicted() {
        let store = SessionStore::new(Duration::ZERO, 100);
        let first = store.with_session(None, |_| ()).unwrap();

        // Every session is past a zero timeout by the next access
        let second = store.with_session(Some(first.id), |_| ()).unwrap();
        assert!(second.created);
        assert_ne!(second.id, first.id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_with_existing_never_creates() {
        let store = store();
        for _ in 0..50 {
            let output = store.with_existing(None, |s| s.enter(None)).unwrap();
            assert_eq!(output, None);
        }
        let stale = store
            .with_existing(Some(SessionId::generate()), |s| s.enter(None))
            .unwrap();
        assert_eq!(stale, None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_with_existing_updates_known_session() {
        let store = store();
        let id = store.with_session(None, |s| s.enter(Some("A"))).unwrap().id;

        let view = store.with_existing(Some(id), |s| s.enter(None)).unwrap();
        assert_eq!(view, Some(View::Home));
        assert_eq!(store.peek(id, |s| s.view()).unwrap(), Some(View::Home));
    }

    #[test]
    fn test_capacity_evicts_least_recently_seen() {
        let store = SessionStore::new(Duration::from_secs(3600), 2);
        let a = store.with_session(None, |_| ()).unwrap().id;
        std::thread::sleep(Duration::from_millis(5));
        let b = store.with_session(None, |_| ()).unwrap().id;
        std::thread::sleep(Duration::from_millis(5));

        // Touching `a` makes `b` the oldest
        store.with_session(Some(a), |_| ()).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        let c = store.with_session(None, |_| ()).unwrap().id;

        assert_eq!(store.len(), 2);
        assert!(store.peek(a, |_| ()).unwrap().is_some());
        assert!(store.peek(b, |_| ()).unwrap().is_none());
        assert!(store.peek(c, |_| ()).unwrap().is_some());
    }

    #[test]
    fn test_capacity_bounds_cookieless_clients() {
        let store = SessionStore::new(Duration::from_secs(3600), 16);
        for _ in 0..1000 {
            store.with_session(None, |s| s.enter(None)).unwrap();
        }
        assert_eq!(store.len(), 16);
    }
}
