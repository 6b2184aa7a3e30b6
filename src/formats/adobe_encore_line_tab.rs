/*!
 * "Adobe Encore (line#/tabs/n)" text subtitles.
 *
 * One caption per header line, continuation lines indented with four tabs:
 *
 * ```text
 * 0002 00:01:48:22 00:01:52:17	- I need those samples, fast!
 * 				- Yes, professor.
 * ```
 *
 * The last timecode field is a frame index. Italics cannot be written as
 * tags, so they travel as a symmetric `@Italic@` placeholder.
 */

use std::fmt::Write;

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::SubtitleError;
use crate::formats::{FormatOptions, ParseOutcome, SubtitleFormat};
use crate::markup;
use crate::subtitle::{Paragraph, Subtitle};
use crate::timecode;

/// Header layout: index, start, end, tab, first text line.
/// Timecode fields accept any two word characters so that a damaged
/// field is reported as a decode error instead of stray text.
static HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4,}) (\w\w:\w\w:\w\w:\w\w) (\w\w:\w\w:\w\w:\w\w)\t(.*)$")
        .expect("Invalid Adobe Encore header regex")
});

const ITALIC_PLACEHOLDER: &str = "@Italic@";
const CONTINUATION_PREFIX: &str = "\t\t\t\t";
const MAX_APPEND_LENGTH: usize = 200;

// Sonic/Spruce image subtitle lists share the column layout
const SON_SIGNATURES: &[&str] = &[
    "SP_NUMBER\tSTART\tEND\tFILE_NAME",
    "SP_NUMBER     START        END       FILE_NAME",
];

enum DecodeState {
    Idle,
    Open(Paragraph),
    /// Header failed to decode; its continuation lines are dropped silently
    Discarding,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AdobeEncoreLineTabNewLine;

impl AdobeEncoreLineTabNewLine {
    pub fn new() -> Self {
        Self
    }

    fn decode_header(caps: &Captures, frame_rate: f64) -> Result<Paragraph, SubtitleError> {
        let start_parts: Vec<&str> = caps[2].split(':').collect();
        let end_parts: Vec<&str> = caps[3].split(':').collect();
        let start = timecode::decode_frame_timecode(&start_parts, frame_rate)?;
        let end = timecode::decode_frame_timecode(&end_parts, frame_rate)?;

        // "//" is always a line break here, also inside URLs
        let text = caps[4].trim().replace("//", "\n");

        Paragraph::new_validated(start, end, text)
    }

    /// Close a caption. Placeholders are decoded over the whole text so
    /// an italic span may cross continuation lines.
    fn finish(subtitle: &mut Subtitle, mut paragraph: Paragraph) {
        if paragraph.text.contains(ITALIC_PLACEHOLDER) {
            paragraph.text = markup::decode_italic_placeholder(&paragraph.text, ITALIC_PLACEHOLDER);
        }
        subtitle.push(paragraph);
    }

    fn encode_text(text: &str, max_line_length: usize) -> String {
        let mut text = text.replace("\r\n", "\n");
        if markup::count_tag_in_text(&text, "\n") > 1 {
            text = markup::auto_break_line_more_than_two_lines(&text, max_line_length);
        }
        let text = markup::encode_italic_placeholder(&text, ITALIC_PLACEHOLDER);
        let text = markup::remove_tags(&text);
        text.replace('\n', &format!("\n{}", CONTINUATION_PREFIX))
    }
}

impl SubtitleFormat for AdobeEncoreLineTabNewLine {
    fn extension(&self) -> &'static str {
        ".txt"
    }

    fn name(&self) -> &'static str {
        "Adobe Encore (line#/tabs/n)"
    }

    fn is_time_based(&self) -> bool {
        true
    }

    fn conflicting_signatures(&self) -> &'static [&'static str] {
        SON_SIGNATURES
    }

    fn load_subtitle(&self, lines: &[String], file_name: &str, options: &FormatOptions) -> ParseOutcome {
        let mut subtitle = Subtitle::new();
        let mut error_count = 0;
        let mut state = DecodeState::Idle;

        for (index, line) in lines.iter().enumerate() {
            let line_number = index + 1;

            if let Some(caps) = HEADER_REGEX.captures(line) {
                if let DecodeState::Open(finished) = std::mem::replace(&mut state, DecodeState::Idle) {
                    Self::finish(&mut subtitle, finished);
                }
                match Self::decode_header(&caps, options.frame_rate) {
                    Ok(paragraph) => state = DecodeState::Open(paragraph),
                    Err(e) => {
                        error_count += 1;
                        debug!("{}:{}: {}", file_name, line_number, e);
                        state = DecodeState::Discarding;
                    }
                }
            } else if line.trim().is_empty() {
                // blank or tab filler
            } else if line.starts_with(CONTINUATION_PREFIX) {
                match &mut state {
                    DecodeState::Open(paragraph) => {
                        if paragraph.text.chars().count() < MAX_APPEND_LENGTH {
                            paragraph.text = format!("{}\n{}", paragraph.text, line.trim())
                                .trim()
                                .to_string();
                        }
                    }
                    DecodeState::Discarding => {}
                    DecodeState::Idle => {
                        error_count += 1;
                        debug!("{}:{}: continuation line without caption", file_name, line_number);
                    }
                }
            } else {
                error_count += 1;
                debug!("{}:{}: unrecognized line", file_name, line_number);
            }
        }

        if let DecodeState::Open(finished) = state {
            Self::finish(&mut subtitle, finished);
        }
        subtitle.renumber(1);

        ParseOutcome::new(subtitle, error_count)
    }

    fn to_text(&self, subtitle: &Subtitle, options: &FormatOptions) -> String {
        let mut output = String::new();
        for (index, paragraph) in subtitle.iter().enumerate() {
            let _ = writeln!(
                output,
                "{:04} {} {}\t{}",
                index + 1,
                timecode::encode_frame_timecode(paragraph.start, options.frame_rate),
                timecode::encode_frame_timecode(paragraph.end, options.frame_rate),
                Self::encode_text(&paragraph.text, options.max_line_length)
            );
        }
        output
    }
}
