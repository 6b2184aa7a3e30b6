/*!
 * Error types for the subconv library.
 *
 * This module contains custom error types for the different layers of the
 * conversion engine, using the thiserror crate for ergonomic error definitions.
 *
 * Line-level decode problems are not errors at this level: decoders count
 * them and keep going. The types below are for the calls that have no
 * sensible soft outcome (an unparseable timecode field handed to a
 * primitive, a file nobody recognizes, an unknown target format).
 */

use thiserror::Error;

/// Errors raised by the timecode and model primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A timecode component could not be parsed or is out of range
    #[error("Invalid timecode component '{value}': {reason}")]
    InvalidTimeCode {
        /// The offending text
        value: String,
        /// What was wrong with it
        reason: String,
    },

    /// The frame rate is zero, negative or not a finite number
    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f64),

    /// End time lies before start time
    #[error("Invalid time range: end {end_ms}ms < start {start_ms}ms")]
    InvalidTimeRange {
        /// Start in milliseconds
        start_ms: u64,
        /// End in milliseconds
        end_ms: u64,
    },
}

/// Errors raised by the format registry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No registered handler accepted the input
    #[error("Format not recognized: {0}")]
    NotRecognized(String),

    /// A format was requested by a name no handler carries
    #[error("Unknown subtitle format: {0}")]
    UnknownFormat(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the timecode/model layer
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from format detection or lookup
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
