/*!
 * Subtitle format handlers.
 *
 * Every format implements [`SubtitleFormat`]: static metadata (extension,
 * display name, time/frame based), a detector, a decoder and an encoder.
 * Handlers hold no per-call state, so one instance can be probed against
 * any number of inputs, also from several threads at once.
 *
 * # Architecture
 *
 * - `adobe_encore_line_tab`: "Adobe Encore (line#/tabs/n)" frame-based text
 * - `subrip`: SubRip `.srt`
 * - `registry`: ordered handler list, detection and conversion
 */

use log::debug;

use crate::subtitle::Subtitle;
use crate::timecode::DEFAULT_FRAME_RATE;

pub mod adobe_encore_line_tab;
pub mod registry;
pub mod subrip;

pub use adobe_encore_line_tab::AdobeEncoreLineTabNewLine;
pub use registry::{FormatRegistry, ProbeResult};
pub use subrip::SubRip;

/// Default maximum subtitle line length used by the line-wrap heuristic
pub const DEFAULT_MAX_LINE_LENGTH: usize = 43;

/// Settings threaded explicitly through decode and encode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatOptions {
    /// Maximum number of visible characters per line when re-flowing text
    pub max_line_length: usize,
    /// Frame rate for frame-based timecodes
    pub frame_rate: f64,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

/// Static, queryable metadata of a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub extension: &'static str,
    pub name: &'static str,
    pub is_time_based: bool,
    pub error_tolerance: usize,
}

/// Result of a decode: the subtitle plus the number of lines that could
/// not be interpreted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub subtitle: Subtitle,
    pub error_count: usize,
}

impl ParseOutcome {
    pub fn new(subtitle: Subtitle, error_count: usize) -> Self {
        Self { subtitle, error_count }
    }

    /// Whether the decode mostly succeeded, forgiving `tolerance` errors
    pub fn is_confident(&self, tolerance: usize) -> bool {
        let paragraphs = self.subtitle.len();
        paragraphs > 0 && paragraphs > self.error_count.saturating_sub(tolerance)
    }
}

/// Capability set every subtitle format implements
pub trait SubtitleFormat: Send + Sync {
    /// File extension including the dot, e.g. ".txt"
    fn extension(&self) -> &'static str;

    /// Human-readable name, unique within a registry
    fn name(&self) -> &'static str;

    /// True for absolute timecodes, false for frame-derived ones
    fn is_time_based(&self) -> bool;

    /// Number of decode errors forgiven by detection
    fn error_tolerance(&self) -> usize {
        0
    }

    /// Line prefixes that identify a different, look-alike format
    fn conflicting_signatures(&self) -> &'static [&'static str] {
        &[]
    }

    fn descriptor(&self) -> FormatDescriptor {
        FormatDescriptor {
            extension: self.extension(),
            name: self.name(),
            is_time_based: self.is_time_based(),
            error_tolerance: self.error_tolerance(),
        }
    }

    /// Decide whether `lines` are in this format.
    ///
    /// Cheap signature checks run first; otherwise the input is decoded
    /// into a scratch subtitle and accepted when paragraphs outnumber
    /// errors.
    fn is_mine(&self, lines: &[String], file_name: &str, options: &FormatOptions) -> bool {
        if let Some(signature) = find_signature(lines, self.conflicting_signatures()) {
            debug!("{}: rejected {} by signature {:?}", self.name(), file_name, signature);
            return false;
        }

        let outcome = self.load_subtitle(lines, file_name, options);
        outcome.is_confident(self.error_tolerance())
    }

    /// Decode `lines` into a fresh subtitle. Never fails; unreadable lines
    /// are counted in the outcome.
    fn load_subtitle(&self, lines: &[String], file_name: &str, options: &FormatOptions) -> ParseOutcome;

    /// Encode a subtitle into the format's text. Never fails.
    fn to_text(&self, subtitle: &Subtitle, options: &FormatOptions) -> String;
}

/// Find the first signature that starts a line of the input
pub fn find_signature<'a>(lines: &[String], signatures: &[&'a str]) -> Option<&'a str> {
    signatures
        .iter()
        .copied()
        .find(|signature| lines.iter().any(|line| line.starts_with(signature)))
}
