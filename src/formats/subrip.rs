use std::fmt::Write;

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::SubtitleError;
use crate::formats::{FormatOptions, ParseOutcome, SubtitleFormat};
use crate::subtitle::{Paragraph, Subtitle};
use crate::timecode::{self, TimeCode};

// @module: SubRip (.srt) subtitles

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{1,2}):(\d{2}):(\d{2})[,.](\d{3})")
        .expect("Invalid SRT timestamp regex")
});

enum DecodeState {
    ExpectNumber,
    ExpectTimeCode,
    Text(Paragraph),
}

// @struct: SubRip handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SubRip;

impl SubRip {
    pub fn new() -> Self {
        Self
    }

    /// Format a timecode in SRT form (HH:MM:SS,mmm)
    pub fn format_timestamp(time: TimeCode) -> String {
        format!(
            "{:02}:{:02}:{:02},{:03}",
            time.hours(),
            time.minutes(),
            time.seconds(),
            time.milliseconds()
        )
    }

    /// Parse timestamp captures starting at `start_idx` (hours)
    fn parse_timestamp(caps: &Captures, start_idx: usize) -> Result<TimeCode, SubtitleError> {
        let hours = timecode::parse_component(&caps[start_idx], None)?;
        let minutes = timecode::parse_component(&caps[start_idx + 1], Some(60))?;
        let seconds = timecode::parse_component(&caps[start_idx + 2], Some(60))?;
        let millis = timecode::parse_component(&caps[start_idx + 3], Some(1000))?;
        Ok(TimeCode::from_components(hours, minutes, seconds, millis))
    }

    fn parse_timing_line(caps: &Captures) -> Result<Paragraph, SubtitleError> {
        let start = Self::parse_timestamp(caps, 1)?;
        let end = Self::parse_timestamp(caps, 5)?;
        Paragraph::new_validated(start, end, String::new())
    }

    fn is_number(line: &str) -> bool {
        !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
    }

    fn finish(subtitle: &mut Subtitle, mut paragraph: Paragraph) {
        paragraph.text = paragraph.text.trim_end().to_string();
        subtitle.push(paragraph);
    }
}

impl SubtitleFormat for SubRip {
    fn extension(&self) -> &'static str {
        ".srt"
    }

    fn name(&self) -> &'static str {
        "SubRip"
    }

    fn is_time_based(&self) -> bool {
        true
    }

    fn conflicting_signatures(&self) -> &'static [&'static str] {
        &["WEBVTT"]
    }

    fn load_subtitle(&self, lines: &[String], file_name: &str, _options: &FormatOptions) -> ParseOutcome {
        let mut subtitle = Subtitle::new();
        let mut error_count = 0;
        let mut state = DecodeState::ExpectNumber;

        for (index, line) in lines.iter().enumerate() {
            let line_number = index + 1;
            let trimmed = line.trim();

            state = match state {
                DecodeState::ExpectNumber => {
                    if trimmed.is_empty() {
                        DecodeState::ExpectNumber
                    } else if Self::is_number(trimmed) {
                        DecodeState::ExpectTimeCode
                    } else if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                        // Missing sequence number, accept the block anyway
                        match Self::parse_timing_line(&caps) {
                            Ok(paragraph) => DecodeState::Text(paragraph),
                            Err(e) => {
                                error_count += 1;
                                debug!("{}:{}: {}", file_name, line_number, e);
                                DecodeState::ExpectNumber
                            }
                        }
                    } else {
                        error_count += 1;
                        debug!("{}:{}: unexpected text before sequence number", file_name, line_number);
                        DecodeState::ExpectNumber
                    }
                }
                DecodeState::ExpectTimeCode => match TIMESTAMP_REGEX.captures(trimmed) {
                    Some(caps) => match Self::parse_timing_line(&caps) {
                        Ok(paragraph) => DecodeState::Text(paragraph),
                        Err(e) => {
                            error_count += 1;
                            debug!("{}:{}: {}", file_name, line_number, e);
                            DecodeState::ExpectNumber
                        }
                    },
                    None => {
                        error_count += 1;
                        debug!("{}:{}: expected timestamp line", file_name, line_number);
                        DecodeState::ExpectNumber
                    }
                },
                DecodeState::Text(mut paragraph) => {
                    let next_is_timing = lines
                        .get(index + 1)
                        .is_some_and(|next| TIMESTAMP_REGEX.is_match(next.trim()));

                    if trimmed.is_empty() {
                        Self::finish(&mut subtitle, paragraph);
                        DecodeState::ExpectNumber
                    } else if Self::is_number(trimmed) && next_is_timing {
                        // Blank separator line is missing
                        Self::finish(&mut subtitle, paragraph);
                        DecodeState::ExpectTimeCode
                    } else {
                        if !paragraph.text.is_empty() {
                            paragraph.text.push('\n');
                        }
                        paragraph.text.push_str(line.trim_end());
                        DecodeState::Text(paragraph)
                    }
                }
            };
        }

        if let DecodeState::Text(paragraph) = state {
            Self::finish(&mut subtitle, paragraph);
        }
        subtitle.renumber(1);

        ParseOutcome::new(subtitle, error_count)
    }

    fn to_text(&self, subtitle: &Subtitle, _options: &FormatOptions) -> String {
        let mut output = String::new();
        for (index, paragraph) in subtitle.iter().enumerate() {
            let _ = writeln!(output, "{}", index + 1);
            let _ = writeln!(
                output,
                "{} --> {}",
                Self::format_timestamp(paragraph.start),
                Self::format_timestamp(paragraph.end)
            );
            let _ = writeln!(output, "{}", paragraph.text.replace("\r\n", "\n"));
            let _ = writeln!(output);
        }
        output
    }
}
