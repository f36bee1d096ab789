//! Deferred one-shot workspace reclamation
//!
//! When a job finishes, ownership of its workspace passes to this
//! scheduler, which removes the directory after the retention window.
//! Firing never blocks new jobs, and a workspace that is already gone is
//! fine.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::model::JobId;
use crate::ports::WorkspacePort;

/// Process-wide registry of pending reclamation timers, keyed by job id
pub struct CleanupScheduler {
    workspace_port: Arc<dyn WorkspacePort>,
    retention: Duration,
    pending: Arc<Mutex<HashMap<JobId, JoinHandle<()>>>>,
}

impl CleanupScheduler {
    pub fn new(workspace_port: Arc<dyn WorkspacePort>, retention: Duration) -> Self {
        Self {
            workspace_port,
            retention,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Number of timers currently armed
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Arm the one-shot timer for a finished job. Removal failures are
    /// logged, never escalated: the job is already terminal. The fired
    /// timer deregisters itself, so finished jobs do not accumulate in
    /// the registry.
    pub async fn schedule(&self, job_id: JobId, workspace_dir: PathBuf) {
        let port = Arc::clone(&self.workspace_port);
        let retention = self.retention;
        let registry = Arc::clone(&self.pending);
        let id = job_id.clone();

        // Insert under the same lock acquisition the task needs for its
        // own removal, so a zero-delay timer cannot fire before its entry
        // exists.
        let mut pending = self.pending.lock().await;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(retention).await;
            match port.reclaim(&workspace_dir).await {
                Ok(()) => {
                    info!(job = %id, workspace = %workspace_dir.display(), "workspace reclaimed")
                }
                Err(e) => {
                    warn!(job = %id, workspace = %workspace_dir.display(), error = %e, "scheduled reclaim failed")
                }
            }
            registry.lock().await.remove(&id);
        });

        if let Some(previous) = pending.insert(job_id, handle) {
            // A job id is scheduled at most once; replacing means the
            // caller re-armed, so drop the stale timer
            previous.abort();
        }
    }

    /// Cancel a pending reclamation. Returns whether a timer was armed.
    pub async fn cancel(&self, job_id: &JobId) -> bool {
        match self.pending.lock().await.remove(job_id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Block until the timer for `job_id` has fired (or was cancelled).
    pub async fn wait(&self, job_id: &JobId) {
        let handle = self.pending.lock().await.remove(job_id);
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}
