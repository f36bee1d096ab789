// Ports - interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::model::{StreamKind, Workspace};

/// Port for the external media-retrieval capability.
///
/// One call downloads exactly one elementary stream of a remote source to
/// the given path. Retries are the caller's business; an implementation
/// makes a single attempt.
#[async_trait]
pub trait FetchPort: Send + Sync {
    /// Download one stream of `url` into `dest`. Success means the tool
    /// exited cleanly; callers still verify the file before using it.
    async fn fetch_stream(&self, url: &str, stream: StreamKind, dest: &Path) -> DomainResult<()>;
}

/// Port for the external media-processing capability
#[async_trait]
pub trait ProcessPort: Send + Sync {
    /// Multiplex a video-only and an audio-only file into `dest` using
    /// stream copy (no re-encoding). Inputs are left in place.
    async fn merge(&self, video: &Path, audio: &Path, dest: &Path) -> DomainResult<()>;

    /// Seek to `start_seconds` in `input` and emit `duration_seconds` of
    /// media into `dest`.
    async fn trim(
        &self,
        input: &Path,
        dest: &Path,
        start_seconds: f64,
        duration_seconds: f64,
    ) -> DomainResult<()>;
}

/// Port for workspace directory lifecycle
#[async_trait]
pub trait WorkspacePort: Send + Sync {
    /// Create a fresh, collision-free working directory
    async fn allocate(&self) -> DomainResult<Workspace>;

    /// Recursively remove a workspace directory. Idempotent: reclaiming a
    /// path that no longer exists is not an error.
    async fn reclaim(&self, dir: &Path) -> DomainResult<()>;
}
