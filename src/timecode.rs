/*!
 * Timecode arithmetic shared by every format handler.
 *
 * A `TimeCode` is a whole number of milliseconds. Frame-based formats
 * store the sub-second part as a frame index; the helpers below convert
 * between the two at a given frame rate and clamp instead of carrying
 * into the next unit, so a fixed-width frame field never overflows.
 */

use std::fmt;

use crate::errors::SubtitleError;

/// Frame rate used when a format or configuration does not state one
pub const DEFAULT_FRAME_RATE: f64 = 25.0;

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// A point in time with millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeCode {
    total_milliseconds: u64,
}

impl TimeCode {
    /// Create a timecode from a millisecond total
    pub const fn from_milliseconds(total_milliseconds: u64) -> Self {
        Self { total_milliseconds }
    }

    /// Create a timecode from hour/minute/second/millisecond components.
    ///
    /// Components are summed, so out-of-range minutes or seconds normalize
    /// into the larger units rather than being lost.
    pub fn from_components(hours: u64, minutes: u64, seconds: u64, milliseconds: u64) -> Self {
        Self::from_milliseconds(
            hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + milliseconds,
        )
    }

    /// Create a timecode whose sub-second part is a frame index.
    ///
    /// The frame part never spills into the seconds field: it is clamped
    /// to 999 milliseconds.
    pub fn from_frames(hours: u64, minutes: u64, seconds: u64, frames: u64, frame_rate: f64) -> Self {
        Self::from_components(
            hours,
            minutes,
            seconds,
            frames_to_milliseconds_max_999(frames, frame_rate),
        )
    }

    /// Total time in milliseconds
    pub const fn total_milliseconds(&self) -> u64 {
        self.total_milliseconds
    }

    pub const fn hours(&self) -> u64 {
        self.total_milliseconds / MS_PER_HOUR
    }

    pub const fn minutes(&self) -> u64 {
        (self.total_milliseconds % MS_PER_HOUR) / MS_PER_MINUTE
    }

    pub const fn seconds(&self) -> u64 {
        (self.total_milliseconds % MS_PER_MINUTE) / MS_PER_SECOND
    }

    pub const fn milliseconds(&self) -> u64 {
        self.total_milliseconds % MS_PER_SECOND
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.milliseconds()
        )
    }
}

/// Check that a frame rate can be used for conversions
pub fn validate_frame_rate(frame_rate: f64) -> Result<(), SubtitleError> {
    if frame_rate.is_finite() && frame_rate > 0.0 {
        Ok(())
    } else {
        Err(SubtitleError::InvalidFrameRate(frame_rate))
    }
}

/// Convert a millisecond value to the nearest frame index
pub fn milliseconds_to_frames(milliseconds: u64, frame_rate: f64) -> u64 {
    (milliseconds as f64 * frame_rate / 1000.0).round() as u64
}

/// Convert a frame index to the nearest millisecond value
pub fn frames_to_milliseconds(frames: u64, frame_rate: f64) -> u64 {
    (frames as f64 * 1000.0 / frame_rate).round() as u64
}

/// Convert the millisecond part of a timecode to a frame index that stays
/// below the frame rate (e.g. at most 24 at 25 fps).
pub fn milliseconds_to_frames_max_frame_rate(milliseconds: u64, frame_rate: f64) -> u64 {
    let frames = milliseconds_to_frames(milliseconds, frame_rate);
    if frames as f64 >= frame_rate {
        // Highest whole frame strictly below the rate, also for 23.976 and friends
        (frame_rate - 0.01).floor().max(0.0) as u64
    } else {
        frames
    }
}

/// Convert a frame index to milliseconds, never exceeding 999
pub fn frames_to_milliseconds_max_999(frames: u64, frame_rate: f64) -> u64 {
    frames_to_milliseconds(frames, frame_rate).min(999)
}

/// Parse one numeric timecode field.
///
/// Only ASCII digits are accepted; signs, blanks and letters are rejected
/// with a `SubtitleError` so callers can count the line as a soft error.
pub fn parse_component(value: &str, upper_bound: Option<u64>) -> Result<u64, SubtitleError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SubtitleError::InvalidTimeCode {
            value: value.to_string(),
            reason: "not a number".to_string(),
        });
    }

    let number: u64 = value.parse().map_err(|_| SubtitleError::InvalidTimeCode {
        value: value.to_string(),
        reason: "number too large".to_string(),
    })?;

    match upper_bound {
        Some(bound) if number >= bound => Err(SubtitleError::InvalidTimeCode {
            value: value.to_string(),
            reason: format!("must be below {}", bound),
        }),
        _ => Ok(number),
    }
}

/// Decode `HH:MM:SS:FF` split into its four fields
pub fn decode_frame_timecode(parts: &[&str], frame_rate: f64) -> Result<TimeCode, SubtitleError> {
    validate_frame_rate(frame_rate)?;

    let [hours, minutes, seconds, frames] = parts else {
        return Err(SubtitleError::InvalidTimeCode {
            value: parts.join(":"),
            reason: format!("expected 4 fields, found {}", parts.len()),
        });
    };

    let hours = parse_component(hours, None)?;
    let minutes = parse_component(minutes, Some(60))?;
    let seconds = parse_component(seconds, Some(60))?;
    let frames = parse_component(frames, None)?;

    Ok(TimeCode::from_frames(hours, minutes, seconds, frames, frame_rate))
}

/// Latest time a two-digit `HH:MM:SS:FF` field can hold
pub const MAX_FRAME_TIMECODE: TimeCode = TimeCode::from_milliseconds(99 * 3_600_000 + 59 * 60_000 + 59_999);

/// Encode a timecode as `HH:MM:SS:FF`.
///
/// Times past 99:59:59 are clamped so the field keeps two hour digits.
pub fn encode_frame_timecode(time: TimeCode, frame_rate: f64) -> String {
    let time = time.min(MAX_FRAME_TIMECODE);
    format!(
        "{:02}:{:02}:{:02}:{:02}",
        time.hours(),
        time.minutes(),
        time.seconds(),
        milliseconds_to_frames_max_frame_rate(time.milliseconds(), frame_rate)
    )
}
