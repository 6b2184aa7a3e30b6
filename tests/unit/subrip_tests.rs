/*!
 * Tests for the SubRip handler
 */

use subconv::formats::{FormatOptions, SubRip, SubtitleFormat};
use subconv::timecode::TimeCode;

use crate::common::{lines, SRT_SAMPLE};

fn decode(text: &str) -> (subconv::Subtitle, usize) {
    let outcome = SubRip::new().load_subtitle(&lines(text), "test.srt", &FormatOptions::default());
    (outcome.subtitle, outcome.error_count)
}

#[test]
fn test_load_subtitle_withSample_shouldDecodeBlocks() {
    let (subtitle, errors) = decode(SRT_SAMPLE);

    assert_eq!(errors, 0);
    assert_eq!(subtitle.len(), 2);
    assert_eq!(subtitle.paragraphs()[0].start.total_milliseconds(), 7480);
    assert_eq!(subtitle.paragraphs()[0].end.total_milliseconds(), 11_120);
    assert_eq!(
        subtitle.paragraphs()[1].text,
        "- I need those samples, fast!\n- Yes, professor."
    );
}

#[test]
fn test_load_subtitle_withMissingBlankLine_shouldSplitBlocks() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nA\n2\n00:00:03,000 --> 00:00:04,000\nB\n";
    let (subtitle, errors) = decode(input);

    assert_eq!(errors, 0);
    assert_eq!(subtitle.len(), 2);
    assert_eq!(subtitle.paragraphs()[0].text, "A");
    assert_eq!(subtitle.paragraphs()[1].text, "B");
}

#[test]
fn test_load_subtitle_withNumericTextLine_shouldKeepIt() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nRoom\n101\n";
    let (subtitle, _) = decode(input);
    assert_eq!(subtitle.paragraphs()[0].text, "Room\n101");
}

#[test]
fn test_load_subtitle_withMissingNumber_shouldAcceptBlock() {
    let (subtitle, errors) = decode("00:00:01.000 --> 00:00:02.000\nNo number\n");

    assert_eq!(errors, 0);
    assert_eq!(subtitle.len(), 1);
    assert_eq!(subtitle.paragraphs()[0].number, 1);
}

#[test]
fn test_load_subtitle_withMinutesOutOfRange_shouldCountErrors() {
    let (subtitle, errors) = decode("1\n00:61:00,000 --> 00:61:02,000\nText\n");

    assert_eq!(errors, 2);
    assert!(subtitle.is_empty());
}

#[test]
fn test_to_text_withDecodedSample_shouldReproduceIt() {
    let (subtitle, _) = decode(SRT_SAMPLE);
    assert_eq!(SubRip::new().to_text(&subtitle, &FormatOptions::default()), SRT_SAMPLE);
}

#[test]
fn test_format_timestamp_shouldUseCommaSeparator() {
    assert_eq!(SubRip::format_timestamp(TimeCode::from_components(1, 2, 3, 4)), "01:02:03,004");
}

#[test]
fn test_is_mine_withWebVtt_shouldReject() {
    let input = lines("WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHi\n");
    let handler = SubRip::new();

    assert!(!handler.is_mine(&input, "x.vtt", &FormatOptions::default()));
    assert!(handler.is_mine(&lines(SRT_SAMPLE), "x.srt", &FormatOptions::default()));
}
