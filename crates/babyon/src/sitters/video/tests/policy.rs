use super::common::*;
use crate::sitters::video::{
    UnavailableDurationProbe, UploadCandidate, UploadPolicy, VideoPolicyConfig, VideoProfileError,
    VideoSlot,
};

fn policy() -> UploadPolicy {
    UploadPolicy::new(VideoPolicyConfig::default())
}

#[test]
fn missing_or_empty_files_are_invalid() {
    let policy = policy();
    match policy.check_file(VideoSlot::Intro, None) {
        Err(VideoProfileError::InvalidFile { file }) => assert_eq!(file, "Intro Video"),
        other => panic!("expected invalid file, got {other:?}"),
    }

    let empty = UploadCandidate::from_bytes(None, Some("video/mp4".to_string()), Vec::new());
    match policy.check_file(VideoSlot::Answer, Some(&empty)) {
        Err(VideoProfileError::InvalidFile { file }) => assert_eq!(file, "Answer Video"),
        other => panic!("expected invalid file, got {other:?}"),
    }
}

#[test]
fn size_limit_is_inclusive() {
    let policy = policy();
    let at_limit = candidate(mib(100), "video/mp4");
    assert!(policy.check_file(VideoSlot::Intro, Some(&at_limit)).is_ok());

    let over_limit = candidate(mib(100) + 1, "video/mp4");
    match policy.check_file(VideoSlot::Intro, Some(&over_limit)) {
        Err(VideoProfileError::FileTooLarge {
            file,
            limit_bytes,
            actual_bytes,
        }) => {
            assert_eq!(file, "Intro Video");
            assert_eq!(limit_bytes, mib(100));
            assert_eq!(actual_bytes, mib(100) + 1);
        }
        other => panic!("expected file too large, got {other:?}"),
    }
}

#[test]
fn oversize_is_reported_before_media_type() {
    let file = candidate(mib(101), "image/png");
    assert!(matches!(
        policy().check_file(VideoSlot::Answer, Some(&file)),
        Err(VideoProfileError::FileTooLarge { .. })
    ));
}

#[test]
fn non_video_media_types_are_rejected() {
    let image = candidate(1024, "image/png");
    match policy().check_file(VideoSlot::Answer, Some(&image)) {
        Err(VideoProfileError::InvalidFileType { file, content_type }) => {
            assert_eq!(file, "Answer Video");
            assert_eq!(content_type, "image/png");
        }
        other => panic!("expected invalid file type, got {other:?}"),
    }
}

#[test]
fn size_estimate_screens_long_clips_when_duration_is_unknown() {
    let clip = candidate(mib(13), "video/mp4");
    match policy().check_duration(VideoSlot::Intro, &clip, &UnavailableDurationProbe) {
        Err(VideoProfileError::DurationExceeded {
            file,
            limit_seconds,
            actual_seconds,
        }) => {
            assert_eq!(file, "Intro Video");
            assert_eq!(limit_seconds, 120);
            assert_eq!(actual_seconds, 130);
        }
        other => panic!("expected duration exceeded, got {other:?}"),
    }
}

#[test]
fn estimate_is_not_reported_as_a_duration() {
    let clip = candidate(mib(12), "video/mp4");
    let duration = policy()
        .check_duration(VideoSlot::Intro, &clip, &UnavailableDurationProbe)
        .expect("120 seconds is within the limit");
    assert_eq!(duration, None);
}

#[test]
fn probed_duration_takes_precedence_over_estimate() {
    let large_but_short = candidate(mib(50), "video/mp4");
    let duration = policy()
        .check_duration(VideoSlot::Answer, &large_but_short, &FixedProbe(45))
        .expect("probe reports a short clip");
    assert_eq!(duration, Some(45));

    let small_but_long = candidate(1024, "video/mp4");
    assert!(matches!(
        policy().check_duration(VideoSlot::Answer, &small_but_long, &FixedProbe(121)),
        Err(VideoProfileError::DurationExceeded {
            actual_seconds: 121,
            ..
        })
    ));
}

#[test]
fn estimate_ratio_is_configurable() {
    let lenient = UploadPolicy::new(VideoPolicyConfig {
        estimated_seconds_per_mib: 2,
        ..VideoPolicyConfig::default()
    });
    let clip = candidate(mib(13), "video/mp4");
    assert!(lenient
        .check_duration(VideoSlot::Intro, &clip, &UnavailableDurationProbe)
        .is_ok());
}
