//! Filesystem adapter for workspace allocation and reclamation

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::model::{JobId, Workspace};
use crate::ports::WorkspacePort;

/// Millisecond timestamps alone can collide under concurrent requests;
/// the process-wide counter makes each name distinct.
static WORKSPACE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Workspace adapter rooted at a configurable directory
pub struct FsWorkspaceAdapter {
    root: PathBuf,
}

impl FsWorkspaceAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn next_token() -> String {
        format!(
            "video_{}_{}",
            Utc::now().timestamp_millis(),
            WORKSPACE_SEQ.fetch_add(1, Ordering::Relaxed)
        )
    }

    fn workspace_error(context: &str, path: &Path, source: std::io::Error) -> DomainError {
        DomainError::Workspace {
            reason: format!("{} {}: {}", context, path.display(), source),
        }
    }
}

#[async_trait]
impl WorkspacePort for FsWorkspaceAdapter {
    async fn allocate(&self) -> DomainResult<Workspace> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Self::workspace_error("creating work root", &self.root, e))?;

        let token = Self::next_token();
        let dir = self.root.join(&token);
        // create_dir (not create_dir_all) so an existing directory of the
        // same name surfaces as a collision instead of being reused
        tokio::fs::create_dir(&dir)
            .await
            .map_err(|e| Self::workspace_error("allocating workspace", &dir, e))?;

        debug!(workspace = %dir.display(), "workspace allocated");
        Ok(Workspace::new(JobId::new(token), dir))
    }

    async fn reclaim(&self, dir: &Path) -> DomainResult<()> {
        match tokio::fs::remove_dir_all(dir).await {
            Ok(()) => {
                debug!(workspace = %dir.display(), "workspace removed");
                Ok(())
            }
            // Already gone counts as reclaimed
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::workspace_error("removing workspace", dir, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allocates_distinct_existing_directories() {
        let root = tempfile::tempdir().unwrap();
        let adapter = FsWorkspaceAdapter::new(root.path());

        let first = adapter.allocate().await.unwrap();
        let second = adapter.allocate().await.unwrap();

        assert_ne!(first.dir, second.dir);
        assert!(first.dir.is_dir());
        assert!(second.dir.is_dir());
        assert!(first.id.as_str().starts_with("video_"));
    }

    #[tokio::test]
    async fn reclaim_removes_contents_and_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let adapter = FsWorkspaceAdapter::new(root.path());

        let workspace = adapter.allocate().await.unwrap();
        tokio::fs::write(workspace.dir.join("output.mp4"), b"clip")
            .await
            .unwrap();

        adapter.reclaim(&workspace.dir).await.unwrap();
        assert!(!workspace.dir.exists());

        // Second reclaim of the same path is not an error
        adapter.reclaim(&workspace.dir).await.unwrap();
    }
}
