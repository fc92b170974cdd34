//! Durable storage backends for the session snapshot.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::config;
use crate::error::{Error, Result};
use crate::models::auth::AdminProfile;

/// What gets persisted between runs: the bearer token and the cached profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<AdminProfile>,
}

/// Trait for session persistence backends.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Load the persisted snapshot, if any.
    async fn load(&self) -> Result<Option<SessionSnapshot>>;

    /// Persist the snapshot.
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;

    /// Remove any persisted snapshot. Idempotent.
    async fn remove(&self) -> Result<()>;

    /// Name of this storage backend.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// File-based session storage using JSON with 0600 permissions.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Create storage at the specified path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create storage at the default path:
    /// `<config dir>/console-client/session.json`
    pub fn default_path() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot determine config directory".into()))?;
        let path = config_dir.join(config::CONFIG_DIR).join(config::SESSION_FILE);
        Ok(Self::new(path))
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> Result<Option<SessionSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::storage_io(&self.path, e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let snapshot =
            serde_json::from_str(&content).map_err(|e| Error::StorageSerialization(e.to_string()))?;
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::storage_io(parent, e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| Error::StorageSerialization(e.to_string()))?;
        std::fs::write(&self.path, &content)
            .map_err(|e| Error::storage_io(&self.path, e.to_string()))?;

        // Set 0600 permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .map_err(|e| Error::storage_io(&self.path, format!("chmod: {}", e)))?;
        }

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .map_err(|e| Error::storage_io(&self.path, e.to_string()))?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// In-memory session storage, primarily for testing.
#[derive(Default)]
pub struct MemorySessionStorage {
    snapshot: RwLock<Option<SessionSnapshot>>,
}

impl MemorySessionStorage {
    /// Create a new empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        *self.snapshot.write().await = Some(snapshot.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        *self.snapshot.write().await = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
