// Job interactor - orchestrates one fetch/merge/trim job

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::app::cleanup::CleanupScheduler;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::model::{
    AssetKind, ClipRange, Job, JobStatus, StreamKind, TimeSpec,
};
use crate::ports::{FetchPort, ProcessPort, WorkspacePort};

/// Result of a completed job, serialized for the caller
#[derive(Debug, Clone, Serialize)]
pub struct ClipOutcome {
    pub job_id: String,
    pub artifact_path: PathBuf,
    pub clip_seconds: f64,
}

/// Interactor for the clip pipeline use case
pub struct JobInteractor {
    fetch_port: Arc<dyn FetchPort>,
    process_port: Arc<dyn ProcessPort>,
    workspace_port: Arc<dyn WorkspacePort>,
    cleanup: Arc<CleanupScheduler>,
    download_timeout: Option<Duration>,
    process_timeout: Option<Duration>,
}

impl JobInteractor {
    pub fn new(
        fetch_port: Arc<dyn FetchPort>,
        process_port: Arc<dyn ProcessPort>,
        workspace_port: Arc<dyn WorkspacePort>,
        cleanup: Arc<CleanupScheduler>,
        download_timeout: Option<Duration>,
        process_timeout: Option<Duration>,
    ) -> Self {
        Self {
            fetch_port,
            process_port,
            workspace_port,
            cleanup,
            download_timeout,
            process_timeout,
        }
    }

    /// Run one job end to end and return the artifact location.
    ///
    /// The range is validated before anything touches the filesystem or
    /// spawns a process. The first stage error is terminal: no retries, no
    /// partial recovery; resubmission means a new job with a new
    /// workspace. On success the workspace is handed to the cleanup
    /// scheduler.
    pub async fn run(&self, url: &str, start: TimeSpec, end: TimeSpec) -> DomainResult<ClipOutcome> {
        let range = ClipRange::new(start, end)?;

        let workspace = self.workspace_port.allocate().await?;
        let mut job = Job::new(url, range, workspace);
        info!(job = %job.id(), url, range = %job.range(), workspace = %job.workspace().dir.display(), "job accepted");

        match self.execute(&mut job).await {
            Ok(artifact_path) => {
                job.advance(JobStatus::Done);
                self.cleanup
                    .schedule(job.id().clone(), job.workspace().dir.clone())
                    .await;
                info!(
                    job = %job.id(),
                    artifact = %artifact_path.display(),
                    retention_secs = self.cleanup.retention().as_secs(),
                    "job done, cleanup scheduled"
                );
                Ok(ClipOutcome {
                    job_id: job.id().to_string(),
                    artifact_path,
                    clip_seconds: job.range().duration_seconds(),
                })
            }
            Err(e) => {
                // Log the originating stage and cause here; callers only
                // see a generic processing failure. The workspace is left
                // in place for diagnostics.
                error!(job = %job.id(), stage = %job.status(), error = %e, "job failed");
                job.mark_failed();
                Err(e)
            }
        }
    }

    async fn execute(&self, job: &mut Job) -> DomainResult<PathBuf> {
        let url = job.source_url().to_string();
        let workspace = job.workspace().clone();

        // Downloading: both streams concurrently, first failure wins. A
        // failed sibling cancels the other future, which kills its child
        // process on drop.
        job.advance(JobStatus::Downloading);
        let video = workspace.asset(AssetKind::VideoOnly);
        let audio = workspace.asset(AssetKind::AudioOnly);
        tokio::try_join!(
            bounded(
                self.download_timeout,
                self.fetch_port.fetch_stream(&url, StreamKind::Video, &video.path),
                || download_timeout_error(StreamKind::Video, &url, self.download_timeout),
            ),
            bounded(
                self.download_timeout,
                self.fetch_port.fetch_stream(&url, StreamKind::Audio, &audio.path),
                || download_timeout_error(StreamKind::Audio, &url, self.download_timeout),
            ),
        )?;

        // The retrieval tool can report success without producing usable
        // output; check both files before going on.
        for (asset, stream) in [(&video, StreamKind::Video), (&audio, StreamKind::Audio)] {
            if let Err(reason) = non_empty_file(&asset.path).await {
                return Err(DomainError::Download {
                    stream,
                    url: url.clone(),
                    reason: reason.to_string(),
                });
            }
        }
        info!(job = %job.id(), "both streams downloaded");

        // Merging: strictly after both streams exist. Inputs are removed
        // only on success; a failed merge keeps them for diagnostics.
        job.advance(JobStatus::Merging);
        let merged = workspace.asset(AssetKind::Merged);
        bounded(
            self.process_timeout,
            self.process_port.merge(&video.path, &audio.path, &merged.path),
            || DomainError::Merge {
                reason: timeout_reason(self.process_timeout),
            },
        )
        .await?;
        if let Err(reason) = non_empty_file(&merged.path).await {
            return Err(DomainError::Merge {
                reason: reason.to_string(),
            });
        }
        tokio::fs::remove_file(&video.path).await?;
        tokio::fs::remove_file(&audio.path).await?;
        debug!(job = %job.id(), "intermediate streams removed");

        // Trimming: the final stage; its output is the artifact.
        job.advance(JobStatus::Trimming);
        let trimmed = workspace.asset(AssetKind::Trimmed);
        bounded(
            self.process_timeout,
            self.process_port.trim(
                &merged.path,
                &trimmed.path,
                job.range().start_seconds(),
                job.range().duration_seconds(),
            ),
            || DomainError::Trim {
                reason: timeout_reason(self.process_timeout),
            },
        )
        .await?;
        if let Err(reason) = non_empty_file(&trimmed.path).await {
            return Err(DomainError::Trim {
                reason: reason.to_string(),
            });
        }

        // The merged intermediate is spent; losing it is not worth
        // failing a finished job over.
        if let Err(e) = tokio::fs::remove_file(&merged.path).await {
            tracing::warn!(job = %job.id(), error = %e, "could not remove merged intermediate");
        }

        Ok(trimmed.path)
    }
}

/// Await `fut`, bounded by `limit` when one is configured.
async fn bounded<F>(
    limit: Option<Duration>,
    fut: F,
    on_timeout: impl FnOnce() -> DomainError,
) -> DomainResult<()>
where
    F: Future<Output = DomainResult<()>>,
{
    match limit {
        None => fut.await,
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(on_timeout()),
        },
    }
}

async fn non_empty_file(path: &Path) -> Result<(), &'static str> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.len() > 0 => Ok(()),
        Ok(_) => Err("tool reported success but produced an empty file"),
        Err(_) => Err("tool reported success but produced no file"),
    }
}

fn download_timeout_error(stream: StreamKind, url: &str, limit: Option<Duration>) -> DomainError {
    DomainError::Download {
        stream,
        url: url.to_string(),
        reason: timeout_reason(limit),
    }
}

fn timeout_reason(limit: Option<Duration>) -> String {
    match limit {
        Some(limit) => format!("timed out after {}s", limit.as_secs()),
        None => "timed out".to_string(),
    }
}
