use std::path::Path;

use super::*;

#[test]
fn parses_plain_seconds() {
    assert_eq!(TimeSpec::parse("90.5").unwrap().as_seconds(), 90.5);
    assert_eq!(TimeSpec::parse("0").unwrap().as_seconds(), 0.0);
    assert_eq!(TimeSpec::parse(" 15 ").unwrap().as_seconds(), 15.0);
}

#[test]
fn parses_clock_formats() {
    assert_eq!(TimeSpec::parse("1:30").unwrap().as_seconds(), 90.0);
    assert_eq!(TimeSpec::parse("01:30.500").unwrap().as_seconds(), 90.5);
    assert_eq!(TimeSpec::parse("1:02:03").unwrap().as_seconds(), 3723.0);
}

#[test]
fn rejects_malformed_times() {
    assert!(TimeSpec::parse("abc").is_err());
    assert!(TimeSpec::parse("-5").is_err());
    assert!(TimeSpec::parse("1:75").is_err());
    assert!(TimeSpec::parse("1:75:00").is_err());
    assert!(TimeSpec::parse("1:2:3:4").is_err());
}

#[test]
fn rejects_non_finite_times() {
    // These all satisfy f64's FromStr, but are not usable offsets
    assert!(TimeSpec::parse("nan").is_err());
    assert!(TimeSpec::parse("NaN").is_err());
    assert!(TimeSpec::parse("inf").is_err());
    assert!(TimeSpec::parse("-inf").is_err());
    assert!(TimeSpec::parse("infinity").is_err());
    assert!(TimeSpec::parse("1:nan").is_err());
}

#[test]
fn clip_range_requires_end_after_start() {
    let range = ClipRange::new(TimeSpec::from_seconds(10.0), TimeSpec::from_seconds(25.0)).unwrap();
    assert_eq!(range.duration_seconds(), 15.0);

    let equal = ClipRange::new(TimeSpec::from_seconds(10.0), TimeSpec::from_seconds(10.0));
    assert!(matches!(
        equal,
        Err(DomainError::InvalidRange { start, end }) if start == 10.0 && end == 10.0
    ));

    let inverted = ClipRange::new(TimeSpec::from_seconds(20.0), TimeSpec::from_seconds(5.0));
    assert!(inverted.is_err());

    let negative = ClipRange::new(TimeSpec::from_seconds(-1.0), TimeSpec::from_seconds(5.0));
    assert!(negative.is_err());
}

#[test]
fn clip_range_rejects_non_finite_endpoints() {
    // NaN compares false against everything, so the ordering guard alone
    // would accept these
    let nan_start = ClipRange::new(TimeSpec::from_seconds(f64::NAN), TimeSpec::from_seconds(10.0));
    assert!(matches!(nan_start, Err(DomainError::InvalidRange { .. })));

    let nan_end = ClipRange::new(TimeSpec::from_seconds(0.0), TimeSpec::from_seconds(f64::NAN));
    assert!(matches!(nan_end, Err(DomainError::InvalidRange { .. })));

    let infinite_end =
        ClipRange::new(TimeSpec::from_seconds(0.0), TimeSpec::from_seconds(f64::INFINITY));
    assert!(matches!(infinite_end, Err(DomainError::InvalidRange { .. })));
}

#[test]
fn asset_paths_use_fixed_basenames() {
    let workspace = Workspace::new(JobId::new("video_1_0"), Path::new("/tmp/ws").into());
    assert_eq!(
        workspace.asset(AssetKind::VideoOnly).path,
        Path::new("/tmp/ws/video.mp4")
    );
    assert_eq!(
        workspace.asset(AssetKind::AudioOnly).path,
        Path::new("/tmp/ws/audio.m4a")
    );
    assert_eq!(
        workspace.asset(AssetKind::Merged).path,
        Path::new("/tmp/ws/merged_video.mp4")
    );
    assert_eq!(
        workspace.asset(AssetKind::Trimmed).path,
        Path::new("/tmp/ws/output.mp4")
    );
}

#[test]
fn job_walks_the_pipeline_states() {
    let range = ClipRange::new(TimeSpec::from_seconds(0.0), TimeSpec::from_seconds(5.0)).unwrap();
    let workspace = Workspace::new(JobId::new("video_1_0"), Path::new("/tmp/ws").into());
    let mut job = Job::new("https://example.com/v", range, workspace);

    assert_eq!(job.status(), JobStatus::Pending);
    job.advance(JobStatus::Downloading);
    job.advance(JobStatus::Merging);
    job.advance(JobStatus::Trimming);
    job.advance(JobStatus::Done);
    assert!(job.status().is_terminal());

    // Terminal states are sticky
    job.advance(JobStatus::Downloading);
    assert_eq!(job.status(), JobStatus::Done);
}

#[test]
fn failure_is_terminal_from_any_state() {
    let range = ClipRange::new(TimeSpec::from_seconds(0.0), TimeSpec::from_seconds(5.0)).unwrap();
    let workspace = Workspace::new(JobId::new("video_1_0"), Path::new("/tmp/ws").into());
    let mut job = Job::new("https://example.com/v", range, workspace);

    job.advance(JobStatus::Downloading);
    job.mark_failed();
    assert_eq!(job.status(), JobStatus::Failed);
    job.advance(JobStatus::Merging);
    assert_eq!(job.status(), JobStatus::Failed);
}

#[test]
fn status_and_stream_labels() {
    assert_eq!(JobStatus::Downloading.to_string(), "downloading");
    assert_eq!(JobStatus::Failed.to_string(), "failed");
    assert_eq!(StreamKind::Video.to_string(), "video");
    assert_eq!(StreamKind::Audio.to_string(), "audio");
}
