// Adapters - external tool and filesystem implementations

pub mod ffmpeg_exec;
pub mod fs_workspace;
pub mod ytdlp_fetch;

// Re-export adapters
pub use ffmpeg_exec::FfmpegExecAdapter;
pub use fs_workspace::FsWorkspaceAdapter;
pub use ytdlp_fetch::YtdlpFetchAdapter;

/// Last few stderr lines of a failed child process, for error messages.
pub(crate) fn stderr_excerpt(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let tail = lines.len().saturating_sub(4);
    let excerpt = lines[tail..].join(" | ");
    if excerpt.is_empty() {
        "no diagnostic output".to_string()
    } else {
        excerpt
    }
}

#[cfg(test)]
mod tests {
    use super::stderr_excerpt;

    #[test]
    fn excerpt_keeps_only_the_tail() {
        let stderr = b"line1\nline2\n\nline3\nline4\nline5\n";
        assert_eq!(stderr_excerpt(stderr), "line2 | line3 | line4 | line5");
    }

    #[test]
    fn excerpt_handles_silence() {
        assert_eq!(stderr_excerpt(b""), "no diagnostic output");
        assert_eq!(stderr_excerpt(b"\n  \n"), "no diagnostic output");
    }
}
