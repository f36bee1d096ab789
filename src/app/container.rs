use std::sync::Arc;

use crate::adapters::{FfmpegExecAdapter, FsWorkspaceAdapter, YtdlpFetchAdapter};
use crate::app::cleanup::CleanupScheduler;
use crate::app::job_interactor::JobInteractor;
use crate::config::AppConfig;
use crate::ports::{FetchPort, ProcessPort, WorkspacePort};

/// Wires concrete adapters into the use-case interactor
pub struct AppContainer {
    job_interactor: Arc<JobInteractor>,
    cleanup: Arc<CleanupScheduler>,
}

impl AppContainer {
    pub fn new(config: &AppConfig) -> Self {
        let fetch_port = Arc::new(YtdlpFetchAdapter::new(config)) as Arc<dyn FetchPort>;
        let process_port = Arc::new(FfmpegExecAdapter::new(config)) as Arc<dyn ProcessPort>;
        let workspace_port =
            Arc::new(FsWorkspaceAdapter::new(config.work_root.clone())) as Arc<dyn WorkspacePort>;

        let cleanup = Arc::new(CleanupScheduler::new(
            Arc::clone(&workspace_port),
            config.retention(),
        ));

        let job_interactor = Arc::new(JobInteractor::new(
            fetch_port,
            process_port,
            workspace_port,
            Arc::clone(&cleanup),
            config.download_timeout(),
            config.process_timeout(),
        ));

        Self {
            job_interactor,
            cleanup,
        }
    }

    pub fn job_interactor(&self) -> Arc<JobInteractor> {
        Arc::clone(&self.job_interactor)
    }

    pub fn cleanup(&self) -> Arc<CleanupScheduler> {
        Arc::clone(&self.cleanup)
    }
}
