//! Durable session storage
//!
//! One JSON file per client directory, named after the `session_user` key.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::client::Identity;

use crate::ClientResult;

/// 持久化会话的键名 (文件名不含扩展名)
pub const SESSION_KEY: &str = "session_user";

/// Persisted session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: Identity,
    pub token: String,
    /// Token expiry (unix seconds)
    pub expires_at: i64,
    /// Login time (unix millis)
    pub logged_in_at: i64,
}

impl StoredSession {
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at <= now_secs
    }
}

#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    /// Storage rooted at `dir` (`{dir}/session_user.json`)
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session
    ///
    /// `Ok(None)` when nothing is stored; unparseable content is an error so
    /// the caller can discard it.
    pub async fn load(&self) -> ClientResult<Option<StoredSession>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Write atomically (temp file + rename)
    pub async fn save(&self, session: &StoredSession) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(session)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Remove the stored session; missing file is fine
    pub async fn clear(&self) -> ClientResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
