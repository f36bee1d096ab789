//! Runtime configuration with TOML file override

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Application configuration. Every field has a working default; a TOML
/// file may override any subset of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Retrieval tool binary
    pub ytdlp_path: String,
    /// Media-processing tool binary
    pub ffmpeg_path: String,
    /// Directory under which per-job workspaces are created
    pub work_root: PathBuf,
    /// Format selector for the video-only download
    pub video_format: String,
    /// Format selector for the audio-only download
    pub audio_format: String,
    /// Seconds the finished artifact stays on disk before its workspace
    /// is reclaimed
    pub retention_secs: u64,
    /// Per-download timeout in seconds; 0 disables the bound
    pub download_timeout_secs: u64,
    /// Per-merge/trim timeout in seconds; 0 disables the bound
    pub process_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: "yt-dlp".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            work_root: PathBuf::from("workspaces"),
            video_format: "bestvideo[ext=mp4]".to_string(),
            audio_format: "bestaudio[ext=m4a]".to_string(),
            retention_secs: 600,
            download_timeout_secs: 1800,
            process_timeout_secs: 600,
        }
    }
}

impl AppConfig {
    /// Load configuration, overlaying the file at `path` (if any) on the
    /// defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))
            }
        }
    }

    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_secs)
    }

    pub fn download_timeout(&self) -> Option<Duration> {
        nonzero_secs(self.download_timeout_secs)
    }

    pub fn process_timeout(&self) -> Option<Duration> {
        nonzero_secs(self.process_timeout_secs)
    }
}

fn nonzero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.retention(), Duration::from_secs(600));
        assert_eq!(config.video_format, "bestvideo[ext=mp4]");
        assert_eq!(config.audio_format, "bestaudio[ext=m4a]");
        assert!(config.download_timeout().is_some());
    }

    #[test]
    fn partial_toml_overrides_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
            retention_secs = 60
            process_timeout_secs = 0
            "#,
        )
        .unwrap();
        assert_eq!(parsed.ffmpeg_path, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(parsed.retention_secs, 60);
        assert_eq!(parsed.process_timeout(), None);
        // Untouched fields keep their defaults
        assert_eq!(parsed.ytdlp_path, "yt-dlp");
    }
}
