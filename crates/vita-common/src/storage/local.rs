//! Local filesystem file store
//!
//! Writes uploaded assets under a configured directory and serves them
//! through a public base URL.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, instrument, warn};
use vita_core::{DomainError, FileStore, StoreResult};

/// File store backed by a local directory.
pub struct LocalFileStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reject absolute paths and parent-directory components.
    fn resolve(&self, path: &str) -> StoreResult<PathBuf> {
        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || path.is_empty() {
            return Err(DomainError::Validation(format!("invalid storage path: {path}")));
        }
        Ok(self.root.join(relative))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }

    /// Accept either a bare path or a URL produced by [`Self::public_url`].
    fn strip_base(&self, path_or_url: &str) -> String {
        path_or_url
            .strip_prefix(&self.public_base_url)
            .map_or(path_or_url, |rest| rest.trim_start_matches('/'))
            .to_string()
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    fn name(&self) -> &'static str {
        "local-fs"
    }

    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    async fn store(&self, path: &str, bytes: &[u8]) -> StoreResult<String> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::StoreFault(format!("create dir failed: {e}")))?;
        }

        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| DomainError::StoreFault(format!("write failed: {e}")))?;

        debug!(path, "stored file");
        Ok(self.public_url(path))
    }

    #[instrument(skip(self))]
    async fn remove(&self, path: &str) -> StoreResult<()> {
        let relative = self.strip_base(path);
        let target = self.resolve(&relative)?;

        if let Err(e) = tokio::fs::remove_file(&target).await {
            // Removal is best-effort, a missing file is not an error
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path, error = %e, "failed to remove file");
                return Err(DomainError::StoreFault(format!("remove failed: {e}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LocalFileStore {
        LocalFileStore::new("/tmp/vita-test-uploads", "/uploads")
    }

    #[test]
    fn rejects_path_traversal() {
        let s = store();
        assert!(s.resolve("../etc/passwd").is_err());
        assert!(s.resolve("/etc/passwd").is_err());
        assert!(s.resolve("").is_err());
        assert!(s.resolve("posts/1/image.jpg").is_ok());
    }

    #[test]
    fn builds_public_urls() {
        let s = store();
        assert_eq!(s.public_url("posts/1.jpg"), "/uploads/posts/1.jpg");
    }

    #[test]
    fn strips_base_url() {
        let s = store();
        assert_eq!(s.strip_base("/uploads/posts/1.jpg"), "posts/1.jpg");
        assert_eq!(s.strip_base("posts/1.jpg"), "posts/1.jpg");
    }

    #[tokio::test]
    async fn stores_and_removes_files() {
        let dir = std::env::temp_dir().join(format!("vita-store-{}", std::process::id()));
        let s = LocalFileStore::new(&dir, "/uploads");

        let url = s.store("avatars/a.png", b"png-bytes").await.unwrap();
        assert_eq!(url, "/uploads/avatars/a.png");
        assert_eq!(
            tokio::fs::read(dir.join("avatars/a.png")).await.unwrap(),
            b"png-bytes"
        );

        s.remove(&url).await.unwrap();
        assert!(!dir.join("avatars/a.png").exists());

        // Removing again is fine
        s.remove("avatars/a.png").await.unwrap();

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
