//! Frame index to timestamp mapping.

use std::time::Duration;

use crate::error::SceneSiftError;

/// Convert a frame index to a playback timestamp.
///
/// # Errors
///
/// Returns [`SceneSiftError::InvalidFrameRate`] if `frames_per_second` is not
/// positive. A non-positive rate is malformed decoder output, not a
/// recoverable case, so it is propagated rather than silently defaulted.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use scenesift::frame_to_timestamp;
///
/// let timestamp = frame_to_timestamp(900, 30.0).unwrap();
/// assert_eq!(timestamp, Duration::from_secs(30));
/// ```
pub fn frame_to_timestamp(frame_index: u64, frames_per_second: f64) -> Result<Duration, SceneSiftError> {
    if !(frames_per_second > 0.0) {
        return Err(SceneSiftError::InvalidFrameRate(frames_per_second));
    }
    Ok(Duration::from_secs_f64(frame_index as f64 / frames_per_second))
}

/// Format a timestamp as `HH:MM:SS` for display.
///
/// Sub-second precision is truncated; scene timestamps are presented at
/// second granularity.
pub fn format_timestamp(timestamp: Duration) -> String {
    let total_seconds = timestamp.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
