//! yt-dlp adapter for the media-retrieval port
//!
//! Drives the yt-dlp binary as a child process, one invocation per
//! elementary stream.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::adapters::stderr_excerpt;
use crate::config::AppConfig;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::model::StreamKind;
use crate::ports::FetchPort;

/// Fetch adapter backed by the yt-dlp binary
pub struct YtdlpFetchAdapter {
    binary: String,
    video_format: String,
    audio_format: String,
}

impl YtdlpFetchAdapter {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            binary: config.ytdlp_path.clone(),
            video_format: config.video_format.clone(),
            audio_format: config.audio_format.clone(),
        }
    }

    fn format_for(&self, stream: StreamKind) -> &str {
        match stream {
            StreamKind::Video => &self.video_format,
            StreamKind::Audio => &self.audio_format,
        }
    }

    fn build_args(format: &str, dest: &Path, url: &str) -> Vec<OsString> {
        vec![
            OsString::from("-f"),
            OsString::from(format),
            OsString::from("-o"),
            dest.as_os_str().to_os_string(),
            OsString::from("--no-playlist"),
            OsString::from(url),
        ]
    }

    fn download_error(stream: StreamKind, url: &str, reason: impl Into<String>) -> DomainError {
        DomainError::Download {
            stream,
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl FetchPort for YtdlpFetchAdapter {
    async fn fetch_stream(&self, url: &str, stream: StreamKind, dest: &Path) -> DomainResult<()> {
        let args = Self::build_args(self.format_for(stream), dest, url);
        debug!(%url, %stream, dest = %dest.display(), "starting download");

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                Self::download_error(stream, url, format!("failed to spawn {}: {}", self.binary, e))
            })?;

        if !output.status.success() {
            return Err(Self::download_error(
                stream,
                url,
                format!("{} ({})", stderr_excerpt(&output.stderr), output.status),
            ));
        }

        info!(%url, %stream, dest = %dest.display(), "download finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_carry_format_output_and_url() {
        let args = YtdlpFetchAdapter::build_args(
            "bestvideo[ext=mp4]",
            Path::new("/ws/video.mp4"),
            "https://example.com/watch?v=abc123",
        );
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-f",
                "bestvideo[ext=mp4]",
                "-o",
                "/ws/video.mp4",
                "--no-playlist",
                "https://example.com/watch?v=abc123",
            ]
        );
    }

    #[test]
    fn format_selection_follows_stream_kind() {
        let adapter = YtdlpFetchAdapter::new(&AppConfig::default());
        assert_eq!(adapter.format_for(StreamKind::Video), "bestvideo[ext=mp4]");
        assert_eq!(adapter.format_for(StreamKind::Audio), "bestaudio[ext=m4a]");
    }
}
