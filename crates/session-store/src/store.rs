//! In-memory session storage with per-user locking and TTL expiration.

use crate::types::*;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info, instrument};

/// Entry in the session store with expiration tracking.
struct SessionEntry {
    session: Session,
    expires_at: Instant,
}

type SharedEntry = Arc<Mutex<SessionEntry>>;

/// In-memory session store.
///
/// Each user's session sits behind its own mutex. `acquire` hands out that
/// mutex's guard, so two events from the same user are processed one after
/// the other while different users never block each other.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<i64, SharedEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a new in-memory session store.
    ///
    /// Spawns a background task that evicts idle and expired sessions.
    pub fn new(ttl: Duration) -> Self {
        let store = Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        };

        let cleanup_store = store.clone();
        tokio::spawn(async move {
            cleanup_store.cleanup_loop().await;
        });

        info!("In-memory session store initialized (ttl={:?})", ttl);

        store
    }

    async fn cleanup_loop(&self) {
        let cleanup_interval = Duration::from_secs(60);

        loop {
            tokio::time::sleep(cleanup_interval).await;
            let removed = self.purge_expired().await;
            if removed > 0 {
                debug!("Cleaned up {} sessions", removed);
            }
        }
    }

    /// Remove sessions that are idle or past their TTL. Sessions someone
    /// holds or waits on are left alone. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, entry| {
            // The map write lock stops new clones, so a count of one means
            // nobody else can be holding or awaiting this entry.
            if Arc::strong_count(entry) > 1 {
                return true;
            }
            match entry.try_lock() {
                Ok(entry) => !(entry.session.is_idle() || entry.expires_at <= now),
                Err(_) => true,
            }
        });

        before - sessions.len()
    }

    /// Lock a user's session, creating it if needed.
    ///
    /// An expired session is handed back reset to `Idle`.
    #[instrument(skip(self))]
    pub async fn acquire(&self, user_id: i64) -> SessionGuard {
        let entry = self.entry(user_id).await;
        let mut guard = entry.lock_owned().await;

        if guard.expires_at <= Instant::now() && !guard.session.is_idle() {
            debug!("Session for {} expired, starting over", user_id);
            guard.session.reset();
        }
        guard.expires_at = Instant::now() + self.ttl;

        SessionGuard {
            guard,
            ttl: self.ttl,
        }
    }

    async fn entry(&self, user_id: i64) -> SharedEntry {
        if let Some(entry) = self.sessions.read().await.get(&user_id) {
            return entry.clone();
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(user_id)
            .or_insert_with(|| {
                Arc::new(Mutex::new(SessionEntry {
                    session: Session::new(user_id),
                    expires_at: Instant::now(),
                }))
            })
            .clone()
    }

    /// Snapshot of a user's session. Waits for any in-flight event for
    /// that user to finish.
    pub async fn get(&self, user_id: i64) -> Option<Session> {
        let entry = self.sessions.read().await.get(&user_id).cloned()?;
        let entry = entry.lock().await;

        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some(entry.session.clone())
    }

    /// Reset a user's session to `Idle`. Returns true if it was mid-flow.
    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: i64) -> bool {
        let Some(entry) = self.sessions.read().await.get(&user_id).cloned() else {
            return false;
        };
        let mut entry = entry.lock().await;
        let was_active = !entry.session.is_idle();
        entry.session.reset();

        if was_active {
            info!("Cleared session for {}", user_id);
        }
        was_active
    }

    /// Number of sessions currently mid-flow.
    pub async fn active_count(&self) -> usize {
        let entries: Vec<SharedEntry> = self.sessions.read().await.values().cloned().collect();
        let now = Instant::now();

        let mut count = 0;
        for entry in entries {
            let entry = entry.lock().await;
            if !entry.session.is_idle() && entry.expires_at > now {
                count += 1;
            }
        }
        count
    }
}

/// Exclusive access to one user's session.
///
/// Dropping the guard releases the user's lock.
pub struct SessionGuard {
    guard: OwnedMutexGuard<SessionEntry>,
    ttl: Duration,
}

impl SessionGuard {
    /// End the flow and return to `Idle`.
    pub fn clear(&mut self) {
        self.guard.session.reset();
        self.guard.expires_at = Instant::now() + self.ttl;
    }
}

impl Deref for SessionGuard {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.guard.session
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Session {
        &mut self.guard.session
    }
}
