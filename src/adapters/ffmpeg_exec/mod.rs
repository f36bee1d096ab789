//! ffmpeg adapter for the media-processing port
//!
//! Drives the ffmpeg binary as a child process. The merge path is pure
//! stream copy; the trim path re-encodes, which keeps cut points exact.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::adapters::stderr_excerpt;
use crate::config::AppConfig;
use crate::domain::errors::{DomainError, DomainResult};
use crate::ports::ProcessPort;

/// Process adapter backed by the ffmpeg binary
pub struct FfmpegExecAdapter {
    binary: String,
}

impl FfmpegExecAdapter {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            binary: config.ffmpeg_path.clone(),
        }
    }

    fn merge_args(video: &Path, audio: &Path, dest: &Path) -> Vec<OsString> {
        vec![
            OsString::from("-y"),
            OsString::from("-i"),
            video.as_os_str().to_os_string(),
            OsString::from("-i"),
            audio.as_os_str().to_os_string(),
            OsString::from("-c"),
            OsString::from("copy"),
            dest.as_os_str().to_os_string(),
        ]
    }

    fn trim_args(input: &Path, dest: &Path, start_seconds: f64, duration_seconds: f64) -> Vec<OsString> {
        vec![
            OsString::from("-y"),
            OsString::from("-ss"),
            OsString::from(format_seconds(start_seconds)),
            OsString::from("-i"),
            input.as_os_str().to_os_string(),
            OsString::from("-t"),
            OsString::from(format_seconds(duration_seconds)),
            dest.as_os_str().to_os_string(),
        ]
    }

    async fn run(&self, args: Vec<OsString>) -> Result<(), String> {
        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| format!("failed to spawn {}: {}", self.binary, e))?;

        if !output.status.success() {
            return Err(format!(
                "{} ({})",
                stderr_excerpt(&output.stderr),
                output.status
            ));
        }
        Ok(())
    }
}

/// Seconds rendered the way ffmpeg expects them on the command line.
fn format_seconds(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{}", seconds as u64)
    } else {
        format!("{:.3}", seconds)
    }
}

#[async_trait]
impl ProcessPort for FfmpegExecAdapter {
    async fn merge(&self, video: &Path, audio: &Path, dest: &Path) -> DomainResult<()> {
        debug!(video = %video.display(), audio = %audio.display(), dest = %dest.display(), "merging streams");
        self.run(Self::merge_args(video, audio, dest))
            .await
            .map_err(|reason| DomainError::Merge { reason })?;
        info!(dest = %dest.display(), "merge finished");
        Ok(())
    }

    async fn trim(
        &self,
        input: &Path,
        dest: &Path,
        start_seconds: f64,
        duration_seconds: f64,
    ) -> DomainResult<()> {
        debug!(input = %input.display(), dest = %dest.display(), start_seconds, duration_seconds, "trimming");
        self.run(Self::trim_args(input, dest, start_seconds, duration_seconds))
            .await
            .map_err(|reason| DomainError::Trim { reason })?;
        info!(dest = %dest.display(), "trimming finished");
        Ok(())
    }
}
