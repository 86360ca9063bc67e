//! Registry of live matches.
//!
//! The store is owned by the service that hosts matches; it is not a
//! global. Sessions are shared as `Arc<MatchSession>` so a request can
//! release the registry lock before it takes the session lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use tracing::{error, info};

use super::events::{MatchId, MatchObserver};
use super::live::{MatchKind, MatchSession};
use crate::core::{Color, EngineError, MatchState};
use crate::rules::{MatchResult, TriadRules};
use crate::timer::{Clock, TimeoutOutcome};

/// Live matches by id.
#[derive(Debug, Default)]
pub struct MatchStore {
    sessions: RwLock<FxHashMap<MatchId, Arc<MatchSession>>>,
    next_id: AtomicU64,
}

impl MatchStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a match under a fresh id and register it.
    pub fn create(
        &self,
        kind: MatchKind,
        rules: TriadRules,
        state: MatchState,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn MatchObserver>,
    ) -> Result<Arc<MatchSession>, EngineError> {
        let id = MatchId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let session = MatchSession::start(id, kind, rules, state, clock, observer)?;
        self.insert(session)
    }

    /// Register a started session.
    pub fn insert(&self, session: MatchSession) -> Result<Arc<MatchSession>, EngineError> {
        let id = session.id();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if sessions.contains_key(&id) {
            return Err(EngineError::InvalidSetup(format!("{id} already exists")));
        }
        let session = Arc::new(session);
        sessions.insert(id, Arc::clone(&session));
        Ok(session)
    }

    /// Look up a match.
    #[must_use]
    pub fn get(&self, id: MatchId) -> Option<Arc<MatchSession>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Remove a match.
    pub fn remove(&self, id: MatchId) -> Option<Arc<MatchSession>> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    /// End a match because `color` left, and drop it from the store.
    pub fn disconnect(&self, id: MatchId, color: Color) -> Option<Result<MatchResult, EngineError>> {
        let session = self.remove(id)?;
        info!(match_id = %id, %color, "player disconnected");
        Some(session.disconnect(color))
    }

    /// Number of live matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fire every due timer, then drop finished matches.
    ///
    /// A session that reports an error is logged and dropped as well.
    /// Returns the expiries that did something.
    pub fn poll_timeouts(&self) -> Vec<(MatchId, TimeoutOutcome)> {
        let sessions: Vec<Arc<MatchSession>> = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        let mut fired = Vec::new();
        let mut finished = Vec::new();
        for session in sessions {
            match session.poll_timeout() {
                Ok(Some(TimeoutOutcome::Stale)) | Ok(None) => {}
                Ok(Some(outcome)) => fired.push((session.id(), outcome)),
                Err(err) => {
                    error!(match_id = %session.id(), error = %err, "timeout handling failed");
                    finished.push(session.id());
                    continue;
                }
            }
            if session.is_over().unwrap_or(true) {
                finished.push(session.id());
            }
        }

        if !finished.is_empty() {
            let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
            for id in finished {
                sessions.remove(&id);
            }
        }
        fired
    }

    /// Drop every finished match. Returns how many were removed.
    pub fn prune_finished(&self) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_over().unwrap_or(true));
        before - sessions.len()
    }
}
