//! Error types for the `scenesift` crate.
//!
//! This module defines [`SceneSiftError`], the unified error type returned by
//! all fallible operations in the crate. Variants carry enough context (file
//! paths, frame numbers, offending configuration values) to diagnose a
//! failure without extra logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `scenesift` operations.
///
/// Every public method that can fail returns `Result<T, SceneSiftError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SceneSiftError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// The source reports zero frames and its first frame could not be read.
    ///
    /// Raised during detection when there is provably nothing to sample.
    /// Distinct from [`DecodeInterrupted`](SceneSiftError::DecodeInterrupted),
    /// which is a mid-stream condition and never fatal.
    #[error("Source reports no frames and the first read failed")]
    InvalidSource,

    /// A frame read failed partway through sampling.
    ///
    /// The detection loop absorbs this condition: sampling stops and the
    /// candidates gathered so far are still selected. It surfaces as an
    /// error only from lower-level reads such as
    /// [`VideoSource::read_frame`](crate::VideoSource::read_frame).
    #[error("Video decode interrupted at frame {frame_index}: {reason}")]
    DecodeInterrupted {
        /// The frame that could not be decoded.
        frame_index: u64,
        /// Underlying decoder message.
        reason: String,
    },

    /// The sampling step ratio is zero or negative.
    #[error("Step ratio must be positive, got {0}")]
    InvalidStepRatio(f64),

    /// The video frame rate is zero or negative, so frame indices cannot be
    /// mapped to timestamps.
    #[error("Frame rate must be positive, got {0}")]
    InvalidFrameRate(f64),

    /// The fingerprint resolution is zero.
    #[error("Fingerprint resolution must be at least 1")]
    InvalidResolution,

    /// The source path is neither a video file nor a directory containing
    /// video files.
    #[error("No video files found at {path}")]
    NoVideosFound {
        /// The path that was searched.
        path: PathBuf,
    },

    /// A scene set carries no retained frame pixel data, so it cannot be
    /// rendered. Run detection with frame retention enabled.
    #[error("Scene set has no retained frame data to visualize")]
    NoFrameData,

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate during frame conversion or saving.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// A video library could not be serialized or deserialized.
    #[error("Library serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The operation was cancelled via a [`CancellationToken`](crate::CancellationToken).
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<FfmpegError> for SceneSiftError {
    fn from(error: FfmpegError) -> Self {
        SceneSiftError::FfmpegError(error.to_string())
    }
}
