// Domain models - core types for jobs, workspaces, and media assets

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::errors::DomainError;

/// Time specification in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSpec {
    seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Parse a time string as plain seconds, `MM:SS(.ms)`, or `HH:MM:SS(.ms)`
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        if let Ok(seconds) = trimmed.parse::<f64>() {
            // NaN and infinities parse as f64 too; a time must be a real,
            // non-negative number of seconds
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(DomainError::bad_time(
                    trimmed,
                    "time must be a finite, non-negative number of seconds",
                ));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let (hours, minutes, seconds_part) = match parts.as_slice() {
            &[m, s] => (0u32, parse_component::<u32>(trimmed, m)?, parse_component::<f64>(trimmed, s)?),
            &[h, m, s] => (
                parse_component::<u32>(trimmed, h)?,
                parse_component::<u32>(trimmed, m)?,
                parse_component::<f64>(trimmed, s)?,
            ),
            _ => {
                return Err(DomainError::bad_time(
                    trimmed,
                    "expected seconds, MM:SS, or HH:MM:SS",
                ))
            }
        };

        if minutes >= 60 {
            return Err(DomainError::bad_time(trimmed, "minutes must be less than 60"));
        }
        if !(0.0..60.0).contains(&seconds_part) {
            return Err(DomainError::bad_time(trimmed, "seconds must be in 0..60"));
        }

        Ok(Self::from_seconds(
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds_part,
        ))
    }
}

fn parse_component<T: std::str::FromStr>(full: &str, part: &str) -> Result<T, DomainError> {
    part.parse::<T>()
        .map_err(|_| DomainError::bad_time(full, "invalid numeric component"))
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds)
    }
}

/// Validated clip range; construction guarantees `end > start >= 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRange {
    start: TimeSpec,
    end: TimeSpec,
}

impl ClipRange {
    pub fn new(start: TimeSpec, end: TimeSpec) -> Result<Self, DomainError> {
        let (s, e) = (start.as_seconds(), end.as_seconds());
        // NaN makes every comparison false, so the ordering check alone
        // would wave non-finite endpoints through
        if !s.is_finite() || !e.is_finite() || s < 0.0 || e <= s {
            return Err(DomainError::InvalidRange { start: s, end: e });
        }
        Ok(Self { start, end })
    }

    pub fn start_seconds(&self) -> f64 {
        self.start.as_seconds()
    }

    pub fn end_seconds(&self) -> f64 {
        self.end.as_seconds()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.end.as_seconds() - self.start.as_seconds()
    }
}

impl fmt::Display for ClipRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Which elementary stream a retrieval targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Video => write!(f, "video"),
            StreamKind::Audio => write!(f, "audio"),
        }
    }
}

/// Stage a file inside a workspace belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    VideoOnly,
    AudioOnly,
    Merged,
    Trimmed,
}

impl AssetKind {
    /// Fixed basename inside the workspace, so the artifact location is
    /// derivable from the workspace path alone.
    pub fn basename(&self) -> &'static str {
        match self {
            AssetKind::VideoOnly => "video.mp4",
            AssetKind::AudioOnly => "audio.m4a",
            AssetKind::Merged => "merged_video.mp4",
            AssetKind::Trimmed => "output.mp4",
        }
    }
}

/// A typed file produced by one pipeline stage and consumed by the next
#[derive(Debug, Clone)]
pub struct MediaAsset {
    pub kind: AssetKind,
    pub path: PathBuf,
}

impl MediaAsset {
    pub fn in_workspace(kind: AssetKind, workspace_dir: &Path) -> Self {
        Self {
            path: workspace_dir.join(kind.basename()),
            kind,
        }
    }
}

/// Unique job identifier; doubles as the workspace directory name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An allocated, job-exclusive working directory
#[derive(Debug, Clone)]
pub struct Workspace {
    pub id: JobId,
    pub dir: PathBuf,
}

impl Workspace {
    pub fn new(id: JobId, dir: PathBuf) -> Self {
        Self { id, dir }
    }

    pub fn asset(&self, kind: AssetKind) -> MediaAsset {
        MediaAsset::in_workspace(kind, &self.dir)
    }
}

/// Job lifecycle states; `Done` and `Failed` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Downloading,
    Merging,
    Trimming,
    Done,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Downloading => "downloading",
            JobStatus::Merging => "merging",
            JobStatus::Trimming => "trimming",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// One fetch/merge/trim request in flight
#[derive(Debug)]
pub struct Job {
    id: JobId,
    source_url: String,
    range: ClipRange,
    workspace: Workspace,
    status: JobStatus,
}

impl Job {
    pub fn new(source_url: impl Into<String>, range: ClipRange, workspace: Workspace) -> Self {
        Self {
            id: workspace.id.clone(),
            source_url: source_url.into(),
            range,
            workspace,
            status: JobStatus::Pending,
        }
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn range(&self) -> &ClipRange {
        &self.range
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Move to the next pipeline state. Transitions out of a terminal
    /// state are a logic error and are ignored with a warning.
    pub fn advance(&mut self, next: JobStatus) {
        if self.status.is_terminal() {
            tracing::warn!(job = %self.id, from = %self.status, to = %next, "ignoring transition out of terminal state");
            return;
        }
        tracing::debug!(job = %self.id, from = %self.status, to = %next, "job status");
        self.status = next;
    }

    pub fn mark_failed(&mut self) {
        self.advance(JobStatus::Failed);
    }
}

#[cfg(test)]
mod tests;
