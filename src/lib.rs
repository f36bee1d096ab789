//! Clipfetch
//!
//! Fetches separate video and audio streams of a remote source
//! concurrently, multiplexes them into one container without re-encoding,
//! cuts the requested time range, and reclaims the per-job workspace
//! after a retention window. The retrieval and media engines (yt-dlp,
//! ffmpeg) are driven as child processes behind narrow ports.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use app::{AppContainer, CleanupScheduler, ClipOutcome, JobInteractor};
pub use config::AppConfig;
pub use domain::errors::{DomainError, DomainResult};
pub use domain::model::{
    AssetKind, ClipRange, Job, JobId, JobStatus, MediaAsset, StreamKind, TimeSpec, Workspace,
};
