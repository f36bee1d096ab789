// Application layer - use-case orchestration and wiring

pub mod cleanup;
pub mod container;
pub mod job_interactor;

pub use cleanup::CleanupScheduler;
pub use container::AppContainer;
pub use job_interactor::{ClipOutcome, JobInteractor};
