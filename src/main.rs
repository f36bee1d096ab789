//! Clipfetch CLI
//!
//! Thin front end over the clip pipeline: parse `{url, start, end}`, run
//! one job, print the artifact location as JSON. Stage-level failure
//! detail goes to the log; the caller only sees a generic failure.
//!
//! Deferred workspace reclamation rides on the process: pass `--wait` to
//! hold the process open through the retention window, otherwise the
//! workspace and its clip stay on disk for the caller to consume.
//!
//! ```bash
//! clipfetch --url "https://example.com/watch?v=abc123" --start 10 --end 25
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use clipfetch::cli::Cli;
use clipfetch::{AppConfig, AppContainer, JobId, TimeSpec};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(work_root) = cli.work_root {
        config.work_root = work_root;
    }

    let start = TimeSpec::parse(&cli.start)
        .map_err(|e| anyhow::anyhow!("invalid start time: {}", e))?;
    let end = TimeSpec::parse(&cli.end).map_err(|e| anyhow::anyhow!("invalid end time: {}", e))?;

    let container = AppContainer::new(&config);

    match container.job_interactor().run(&cli.url, start, end).await {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if cli.wait {
                info!(retention_secs = config.retention_secs, "waiting for workspace reclamation");
                let job_id = JobId::new(outcome.job_id);
                container.cleanup().wait(&job_id).await;
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "processing failed");
            eprintln!("Error processing video");
            std::process::exit(1);
        }
    }
}
