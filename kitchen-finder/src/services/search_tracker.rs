//! Keeps only the newest search result per browser session
//!
//! Each search from a session takes a ticket with a sequence number that
//! increases within that session. A finished search is recorded as the
//! session's latest state only if no newer search from the same session has
//! begun since. Sessions never see each other's searches.

use crate::models::SearchState;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Sessions idle longer than this are forgotten
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

/// Longest accepted session id
pub const MAX_SESSION_ID_LEN: usize = 64;

/// Session id: 1-64 characters of `[A-Za-z0-9_-]`
pub fn is_valid_session_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_SESSION_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Sequence number handed to one search invocation of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub session: String,
    pub sequence: u64,
}

struct SessionLatest {
    sequence: u64,
    state: SearchState,
    touched: Instant,
}

/// Tracks the newest search and its state for every session
pub struct SearchTracker {
    sessions: RwLock<HashMap<String, SessionLatest>>,
    idle_limit: Duration,
}

impl SearchTracker {
    pub fn new() -> Self {
        Self::with_idle_limit(DEFAULT_SESSION_IDLE)
    }

    pub fn with_idle_limit(idle_limit: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_limit,
        }
    }

    /// Start a search: supersedes the session's in-flight search and marks
    /// the session Loading
    pub async fn begin(&self, session: &str) -> SearchTicket {
        let mut sessions = self.sessions.write().await;

        let idle_limit = self.idle_limit;
        let before = sessions.len();
        sessions.retain(|_, latest| latest.touched.elapsed() < idle_limit);
        if sessions.len() < before {
            debug!(dropped = before - sessions.len(), "Forgot idle search sessions");
        }

        let latest = sessions
            .entry(session.to_string())
            .or_insert_with(|| SessionLatest {
                sequence: 0,
                state: SearchState::Idle,
                touched: Instant::now(),
            });
        latest.sequence += 1;
        latest.state = SearchState::Loading;
        latest.touched = Instant::now();

        SearchTicket {
            session: session.to_string(),
            sequence: latest.sequence,
        }
    }

    /// Finish a search
    ///
    /// Returns `true` when the state was recorded, `false` if a newer search
    /// from the same session started after this ticket was issued.
    pub async fn complete(&self, ticket: &SearchTicket, state: SearchState) -> bool {
        let mut sessions = self.sessions.write().await;
        let Some(latest) = sessions.get_mut(&ticket.session) else {
            debug!(session = %ticket.session, "Session expired before search finished");
            return false;
        };

        if latest.sequence != ticket.sequence {
            warn!(
                session = %ticket.session,
                sequence = ticket.sequence,
                newest = latest.sequence,
                "Discarding stale search result"
            );
            return false;
        }

        latest.state = state;
        latest.touched = Instant::now();
        true
    }

    /// Newest sequence number and state of a session; `(0, Idle)` if unknown
    pub async fn snapshot(&self, session: &str) -> (u64, SearchState) {
        let sessions = self.sessions.read().await;
        sessions
            .get(session)
            .map(|latest| (latest.sequence, latest.state.clone()))
            .unwrap_or((0, SearchState::Idle))
    }

    /// Sessions currently remembered
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SearchTracker {
    fn default() -> Self {
        Self::new()
    }
}
