/*!
 * Ordered registry of subtitle format handlers.
 *
 * Detection is first-match-wins in registration order. Handlers that share
 * column syntax without a distinguishing signature therefore depend on that
 * order, which is why the registry keeps a fixed, explicit sequence instead
 * of scoring candidates.
 */

use log::{debug, info};
use rayon::prelude::*;

use crate::errors::FormatError;
use crate::formats::{
    find_signature, AdobeEncoreLineTabNewLine, FormatOptions, ParseOutcome, SubRip, SubtitleFormat,
};

/// Outcome of probing one handler against an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Display name of the probed handler
    pub format_name: &'static str,
    /// Whether the handler claimed the input
    pub accepted: bool,
    /// Signature that ruled the handler out before decoding, if any
    pub rejected_by_signature: Option<&'static str>,
    /// Paragraphs decoded by the probe
    pub paragraph_count: usize,
    /// Lines the probe could not interpret
    pub error_count: usize,
}

/// Handler list with detection and conversion on top
pub struct FormatRegistry {
    formats: Vec<Box<dyn SubtitleFormat>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_default_formats()
    }
}

impl FormatRegistry {
    /// Create a registry with no handlers
    pub fn empty() -> Self {
        Self { formats: Vec::new() }
    }

    /// Create a registry with every built-in handler, in detection order
    pub fn with_default_formats() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(SubRip::new()));
        registry.register(Box::new(AdobeEncoreLineTabNewLine::new()));
        registry
    }

    /// Append a handler; it is probed after all handlers registered before it
    pub fn register(&mut self, format: Box<dyn SubtitleFormat>) {
        self.formats.push(format);
    }

    /// Handlers in detection order
    pub fn formats(&self) -> impl Iterator<Item = &dyn SubtitleFormat> {
        self.formats.iter().map(|format| format.as_ref())
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Look a handler up by display name, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&dyn SubtitleFormat> {
        self.formats()
            .find(|format| format.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Handlers writing the given extension ("txt" or ".txt"), in order
    pub fn find_by_extension(&self, extension: &str) -> Vec<&dyn SubtitleFormat> {
        let wanted = extension.trim().trim_start_matches('.');
        self.formats()
            .filter(|format| format.extension().trim_start_matches('.').eq_ignore_ascii_case(wanted))
            .collect()
    }

    /// First handler, in registration order, that claims the input
    pub fn detect(&self, lines: &[String], file_name: &str, options: &FormatOptions) -> Option<&dyn SubtitleFormat> {
        let detected = self
            .formats()
            .find(|format| format.is_mine(lines, file_name, options));
        match detected {
            Some(format) => debug!("Detected {} as {}", file_name, format.name()),
            None => debug!("No format matched {}", file_name),
        }
        detected
    }

    /// Same answer as [`FormatRegistry::detect`], probing handlers in parallel
    pub fn detect_parallel(&self, lines: &[String], file_name: &str, options: &FormatOptions) -> Option<&dyn SubtitleFormat> {
        self.formats
            .par_iter()
            .position_first(|format| format.is_mine(lines, file_name, options))
            .map(|index| self.formats[index].as_ref())
    }

    /// Probe every handler in parallel; results follow registration order.
    ///
    /// Each handler decodes the input once; acceptance is the same
    /// signature check and confidence rule `is_mine` applies.
    pub fn probe_all(&self, lines: &[String], file_name: &str, options: &FormatOptions) -> Vec<ProbeResult> {
        self.formats
            .par_iter()
            .map(|format| match find_signature(lines, format.conflicting_signatures()) {
                Some(signature) => ProbeResult {
                    format_name: format.name(),
                    accepted: false,
                    rejected_by_signature: Some(signature),
                    paragraph_count: 0,
                    error_count: 0,
                },
                None => {
                    let outcome = format.load_subtitle(lines, file_name, options);
                    ProbeResult {
                        format_name: format.name(),
                        accepted: outcome.is_confident(format.error_tolerance()),
                        rejected_by_signature: None,
                        paragraph_count: outcome.subtitle.len(),
                        error_count: outcome.error_count,
                    }
                }
            })
            .collect()
    }

    /// Detect the format and decode the input with it
    pub fn load(
        &self,
        lines: &[String],
        file_name: &str,
        options: &FormatOptions,
    ) -> Result<(&dyn SubtitleFormat, ParseOutcome), FormatError> {
        let format = self
            .detect(lines, file_name, options)
            .ok_or_else(|| FormatError::NotRecognized(file_name.to_string()))?;
        let outcome = format.load_subtitle(lines, file_name, options);
        if outcome.error_count > 0 {
            info!(
                "{} loaded as {} with {} unreadable line(s)",
                file_name,
                format.name(),
                outcome.error_count
            );
        }
        Ok((format, outcome))
    }

    /// Decode the input in whatever format it is and encode it as `target_name`
    pub fn convert(
        &self,
        lines: &[String],
        file_name: &str,
        target_name: &str,
        options: &FormatOptions,
    ) -> Result<String, FormatError> {
        let target = self
            .find_by_name(target_name)
            .ok_or_else(|| FormatError::UnknownFormat(target_name.to_string()))?;
        let (_, outcome) = self.load(lines, file_name, options)?;
        Ok(target.to_text(&outcome.subtitle, options))
    }
}
