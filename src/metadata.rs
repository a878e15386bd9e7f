//! Video metadata types.
//!
//! [`VideoMetadata`] is extracted once when a source is opened and cached for
//! the lifetime of the source. Detection reads it at the start of every scan
//! and never re-queries the decoder.

/// Metadata for the video stream of an opened source.
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    ///
    /// Timestamp mapping requires this to be positive; detection rejects a
    /// source with a non-positive rate up front.
    pub frames_per_second: f64,
    /// Estimated total number of frames, computed from duration and frame
    /// rate. Zero when the container does not report a usable duration.
    pub total_frames: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
}
