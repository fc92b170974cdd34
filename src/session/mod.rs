//! Session (credential) store.
//!
//! Holds the bearer token and the cached admin profile behind a `RwLock`,
//! and writes every mutation through to a [`SessionStorage`] backend so a
//! restart restores the session. No network calls originate here.

pub mod storage;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::auth::AdminProfile;

pub use storage::{FileSessionStorage, MemorySessionStorage, SessionSnapshot, SessionStorage};

/// Process-wide session state: one credential, one optional profile snapshot.
///
/// Shared across in-flight requests via `Arc`; reads and writes are atomic
/// with respect to each other, so callers never observe a partial mutation.
pub struct SessionStore {
    state: RwLock<SessionSnapshot>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Create a store over the given backend, hydrating from any persisted
    /// snapshot.
    pub async fn open(storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let state = match storage.load().await {
            Ok(Some(snapshot)) => {
                info!(source = storage.name(), "Restored session from storage");
                snapshot
            }
            Ok(None) => SessionSnapshot::default(),
            Err(e) => {
                // A corrupt session file must not brick the console; start
                // signed out and let the user log in again.
                warn!("Failed to load session: {}", e);
                SessionSnapshot::default()
            }
        };
        Ok(Self {
            state: RwLock::new(state),
            storage,
        })
    }

    /// Create an in-memory store with no persistence backing, for tests and
    /// embedders that manage persistence themselves.
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(SessionSnapshot::default()),
            storage: Arc::new(MemorySessionStorage::new()),
        }
    }

    /// Store a credential. A blank token is treated as "clear the credential"
    /// (which also drops the profile), never as a silent no-op.
    pub async fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.trim().is_empty() {
            return self.clear().await;
        }
        let mut state = self.state.write().await;
        state.token = Some(token);
        self.persist(&state).await
    }

    /// Current credential, or `None` when signed out. Never fails.
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    /// Cache a profile snapshot.
    pub async fn set_profile(&self, profile: AdminProfile) -> Result<()> {
        let mut state = self.state.write().await;
        state.profile = Some(profile);
        self.persist(&state).await
    }

    /// Cached profile snapshot, if any.
    pub async fn profile(&self) -> Option<AdminProfile> {
        self.state.read().await.profile.clone()
    }

    /// Drop the cached profile without touching the credential.
    pub async fn clear_profile(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.profile = None;
        self.persist(&state).await
    }

    /// Clear the credential and the profile. Idempotent.
    pub async fn clear(&self) -> Result<()> {
        let mut state = self.state.write().await;
        *state = SessionSnapshot::default();
        debug!("Session cleared");
        self.storage.remove().await
    }

    /// Whether a non-blank credential is present.
    pub async fn is_authenticated(&self) -> bool {
        matches!(&self.state.read().await.token, Some(t) if !t.trim().is_empty())
    }

    async fn persist(&self, state: &SessionSnapshot) -> Result<()> {
        if let Err(e) = self.storage.save(state).await {
            warn!(backend = self.storage.name(), "Failed to persist session: {}", e);
            return Err(e);
        }
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("backend", &self.storage.name())
            .finish()
    }
}
