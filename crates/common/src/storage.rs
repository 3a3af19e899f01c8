//! Object storage access for uploaded evidence files.
//!
//! Only the read side lives here: moderation resolves stored evidence keys
//! to servable URLs and verifies the file is still present. Uploads happen
//! outside this system.

use std::path::PathBuf;

use crate::AppResult;

/// Storage backend trait.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Get the public URL for a key.
    fn public_url(&self, key: &str) -> String;

    /// Check if a file exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStorage {
    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let path = self.base_path.join(key);
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_joins_base() {
        let storage = LocalStorage::new(PathBuf::from("/tmp/files"), "/files".to_string());
        assert_eq!(storage.public_url("evidence/a.png"), "/files/evidence/a.png");
    }

    #[test]
    fn test_public_url_trims_trailing_slash() {
        let storage = LocalStorage::new(
            PathBuf::from("/tmp/files"),
            "https://cdn.example.com/files/".to_string(),
        );
        assert_eq!(
            storage.public_url("evidence/a.png"),
            "https://cdn.example.com/files/evidence/a.png"
        );
    }

    #[tokio::test]
    async fn test_exists_missing_file() {
        let storage = LocalStorage::new(PathBuf::from("/nonexistent-dir"), "/files".to_string());
        assert!(!storage.exists("nope.png").await.unwrap());
    }
}
