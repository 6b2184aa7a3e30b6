/*!
 * Tests for error types
 */

use subconv::errors::{AppError, FormatError, SubtitleError};

#[test]
fn test_subtitle_error_display_shouldNameTheProblem() {
    let error = SubtitleError::InvalidTimeCode {
        value: "XX".to_string(),
        reason: "not a number".to_string(),
    };
    assert_eq!(error.to_string(), "Invalid timecode component 'XX': not a number");

    let error = SubtitleError::InvalidTimeRange {
        start_ms: 2000,
        end_ms: 1000,
    };
    assert_eq!(error.to_string(), "Invalid time range: end 1000ms < start 2000ms");
}

#[test]
fn test_format_error_display_shouldIncludeName() {
    assert_eq!(
        FormatError::UnknownFormat("Nope".to_string()).to_string(),
        "Unknown subtitle format: Nope"
    );
    assert_eq!(
        FormatError::NotRecognized("a.txt".to_string()).to_string(),
        "Format not recognized: a.txt"
    );
}

#[test]
fn test_app_error_from_shouldWrapEachLayer() {
    let from_format: AppError = FormatError::UnknownFormat("x".to_string()).into();
    assert!(matches!(from_format, AppError::Format(_)));

    let from_subtitle: AppError = SubtitleError::InvalidFrameRate(0.0).into();
    assert!(matches!(from_subtitle, AppError::Subtitle(_)));

    let from_io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(from_io, AppError::File(message) if message == "gone"));

    let from_anyhow: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(from_anyhow.to_string(), "Unknown error: boom");
}
