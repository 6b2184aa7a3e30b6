/*!
 * # subconv - subtitle format recognition and conversion
 *
 * A Rust library for reading and writing text-based timed-caption formats.
 *
 * ## Features
 *
 * - Detect the format of a subtitle file from its lines
 * - Decode into a canonical `Subtitle` model, tolerating malformed lines
 * - Encode the model into any supported format
 * - Exact frame/millisecond timecode arithmetic
 * - Italic markup preserved across formats that express it differently
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: Millisecond timecodes and frame conversions
 * - `markup`: Tag stripping, italic placeholders and repair, line wrapping
 * - `subtitle`: `Paragraph` and `Subtitle` model
 * - `formats`: The `SubtitleFormat` trait and its handlers:
 *   - `formats::subrip`: SubRip (.srt)
 *   - `formats::adobe_encore_line_tab`: Adobe Encore (line#/tabs/n)
 *   - `formats::registry`: Ordered detection and conversion
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: File and folder conversion workflow
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod formats;
pub mod markup;
pub mod subtitle;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, FormatError, SubtitleError};
pub use formats::{FormatDescriptor, FormatOptions, FormatRegistry, ParseOutcome, SubtitleFormat};
pub use subtitle::{Paragraph, Subtitle};
pub use timecode::TimeCode;
