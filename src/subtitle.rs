use std::fmt;

use crate::errors::SubtitleError;
use crate::timecode::TimeCode;

// @module: Canonical subtitle model shared by every format handler

// @struct: Single timed caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    // @field: Sequence number (1-based after renumbering)
    pub number: usize,

    // @field: Start time
    pub start: TimeCode,

    // @field: End time
    pub end: TimeCode,

    // @field: Caption text, lines separated by '\n', italics as <i>...</i>
    pub text: String,
}

impl Paragraph {
    /// Creates a paragraph; the number is assigned when the subtitle is renumbered
    pub fn new(start: TimeCode, end: TimeCode, text: impl Into<String>) -> Self {
        Paragraph {
            number: 0,
            start,
            end,
            text: text.into(),
        }
    }

    // @creates: Paragraph with a checked time range
    // @validates: start <= end
    pub fn new_validated(start: TimeCode, end: TimeCode, text: impl Into<String>) -> Result<Self, SubtitleError> {
        if end < start {
            return Err(SubtitleError::InvalidTimeRange {
                start_ms: start.total_milliseconds(),
                end_ms: end.total_milliseconds(),
            });
        }
        Ok(Self::new(start, end, text))
    }

    /// Display duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end
            .total_milliseconds()
            .saturating_sub(self.start.total_milliseconds())
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.number)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)
    }
}

/// Ordered list of paragraphs.
///
/// Order is file order; decoders do not sort. Call [`Subtitle::renumber`]
/// to make paragraph numbers match positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subtitle {
    paragraphs: Vec<Paragraph>,
}

impl Subtitle {
    /// Create an empty subtitle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a subtitle from paragraphs, numbered from 1
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        let mut subtitle = Subtitle { paragraphs };
        subtitle.renumber(1);
        subtitle
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        &mut self.paragraphs
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn clear(&mut self) {
        self.paragraphs.clear();
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Paragraph> {
        self.paragraphs.iter()
    }

    /// Number paragraphs sequentially starting at `start_number`
    pub fn renumber(&mut self, start_number: usize) {
        for (i, paragraph) in self.paragraphs.iter_mut().enumerate() {
            paragraph.number = start_number + i;
        }
    }

    /// Stable sort by start time; numbers are left untouched
    pub fn sort_by_start_time(&mut self) {
        self.paragraphs.sort_by_key(|p| p.start);
    }
}

impl<'a> IntoIterator for &'a Subtitle {
    type Item = &'a Paragraph;
    type IntoIter = std::slice::Iter<'a, Paragraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.paragraphs.iter()
    }
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle")?;
        writeln!(f, "Paragraphs: {}", self.paragraphs.len())?;
        if let (Some(first), Some(last)) = (self.paragraphs.first(), self.paragraphs.last()) {
            writeln!(f, "Span: {} - {}", first.start, last.end)?;
        }
        Ok(())
    }
}
