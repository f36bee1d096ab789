// CLI argument definitions

use std::path::PathBuf;

use clap::Parser;

/// Fetch a remote video, merge its streams losslessly, and cut a clip
#[derive(Parser, Debug)]
#[command(name = "clipfetch", version, about)]
pub struct Cli {
    /// Source video URL
    #[arg(long)]
    pub url: String,

    /// Clip start time (seconds, MM:SS, or HH:MM:SS)
    #[arg(long)]
    pub start: String,

    /// Clip end time (seconds, MM:SS, or HH:MM:SS)
    #[arg(long)]
    pub end: String,

    /// Path to a TOML configuration file
    #[arg(long, env = "CLIPFETCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the workspace root directory
    #[arg(long)]
    pub work_root: Option<PathBuf>,

    /// Stay alive through the retention window so the workspace is
    /// reclaimed before the process exits. Without this flag the process
    /// exits right after printing the artifact location and the workspace
    /// (with its clip) is left on disk.
    #[arg(long)]
    pub wait: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_arguments() {
        let cli = Cli::parse_from([
            "clipfetch",
            "--url",
            "https://example.com/watch?v=abc123",
            "--start",
            "10",
            "--end",
            "25",
        ]);
        assert_eq!(cli.url, "https://example.com/watch?v=abc123");
        assert_eq!(cli.start, "10");
        assert_eq!(cli.end, "25");
        assert!(!cli.wait);
        assert!(cli.config.is_none());
    }

    #[test]
    fn missing_range_is_rejected() {
        let result = Cli::try_parse_from(["clipfetch", "--url", "https://example.com/v"]);
        assert!(result.is_err());
    }
}
