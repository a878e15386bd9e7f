//! Video frame sources.
//!
//! [`FrameSource`] is the narrow contract detection needs from a decoder:
//! report metadata, seek to a frame index, read it. [`VideoSource`] is the
//! production implementation backed by FFmpeg via `ffmpeg-next`; tests and
//! embedders can substitute their own implementation at the trait seam.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    Rational,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::{error::SceneSiftError, metadata::VideoMetadata};

/// A seekable source of decoded video frames.
///
/// Detection drives this interface and treats a `None` read as "stop
/// sampling": a decode failure mid-stream terminates the sampling loop early,
/// but candidates collected so far remain valid output. This models
/// physically-truncated or corrupt trailing frames without discarding useful
/// partial work.
pub trait FrameSource {
    /// Metadata of the video stream, read once at open time.
    fn metadata(&self) -> &VideoMetadata;

    /// Seek to `frame_index` and decode that frame.
    ///
    /// Returns `None` when the index is beyond the last decodable frame or
    /// decoding fails for any reason.
    fn seek_and_read(&mut self, frame_index: u64) -> Option<DynamicImage>;
}

/// FFmpeg-backed [`FrameSource`] for a video file on disk.
///
/// Holds the demuxer, a single reusable decoder, and an RGB24 scaling
/// context for the lifetime of the source. Each read seeks to the nearest
/// keyframe before the target and decodes forward.
///
/// # Example
///
/// ```no_run
/// use scenesift::{FrameSource, SceneSiftError, VideoSource};
///
/// let mut source = VideoSource::open("input.mp4")?;
/// println!("{} frames at {:.2} fps",
///     source.metadata().total_frames,
///     source.metadata().frames_per_second);
/// if let Some(frame) = source.seek_and_read(100) {
///     frame.save("frame_100.png").ok();
/// }
/// # Ok::<(), SceneSiftError>(())
/// ```
pub struct VideoSource {
    input_context: Input,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    stream_index: usize,
    time_base: Rational,
    metadata: VideoMetadata,
    path: PathBuf,
}

impl Debug for VideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSource")
            .field("path", &self.path)
            .field("stream_index", &self.stream_index)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file for sampling.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, locates the best
    /// video stream, and caches its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SceneSiftError::FileOpen`] if the file cannot be opened and
    /// [`SceneSiftError::NoVideoStream`] if it has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SceneSiftError> {
        let path = path.as_ref().to_path_buf();

        log::debug!("Opening video source: {}", path.display());

        // Safe to call multiple times.
        ffmpeg_next::init().map_err(|error| SceneSiftError::FileOpen {
            path: path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| SceneSiftError::FileOpen {
                path: path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(SceneSiftError::NoVideoStream)?;
        let stream_index = stream.index();
        let time_base = stream.time_base();

        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let decoder = decoder_context.decoder().video()?;

        // Frame rate from the stream's average rate, falling back to the
        // nominal rate field.
        let average_rate = stream.avg_frame_rate();
        let frames_per_second = if average_rate.denominator() != 0 {
            average_rate.numerator() as f64 / average_rate.denominator() as f64
        } else {
            let rate = stream.rate();
            if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            }
        };

        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let total_frames = if frames_per_second > 0.0 {
            (duration.as_secs_f64() * frames_per_second) as u64
        } else {
            0
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            frames_per_second,
            total_frames,
            codec,
        };

        let scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            decoder.width(),
            decoder.height(),
            ScalingFlags::BILINEAR,
        )?;

        log::info!(
            "Opened {}: {}x{} @ {:.2} fps, codec={}, ~{} frames",
            path.display(),
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.codec,
            metadata.total_frames,
        );

        Ok(Self {
            input_context,
            decoder,
            scaler,
            stream_index,
            time_base,
            metadata,
            path,
        })
    }

    /// Path to the opened file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seek to a frame and decode it, surfacing the failure reason.
    ///
    /// Seeks to the nearest keyframe before the target and decodes forward
    /// until the requested frame (or the first frame past it) is reached.
    ///
    /// # Errors
    ///
    /// Returns [`SceneSiftError::DecodeInterrupted`] when the frame cannot be
    /// decoded — past end of stream, truncated data, or decoder failure.
    pub fn read_frame(&mut self, frame_index: u64) -> Result<DynamicImage, SceneSiftError> {
        let frames_per_second = self.metadata.frames_per_second;
        let interrupted = |reason: String| SceneSiftError::DecodeInterrupted {
            frame_index,
            reason,
        };

        let target_timestamp =
            frame_index_to_stream_timestamp(frame_index, frames_per_second, self.time_base);
        self.input_context
            .seek(target_timestamp, ..target_timestamp)
            .map_err(|error| interrupted(error.to_string()))?;

        // The decoder is reused across reads; drop any state left over from
        // the previous position.
        self.decoder.flush();

        let mut decoded_frame = VideoFrame::empty();
        let mut rgb_frame = VideoFrame::empty();

        for (stream, packet) in self.input_context.packets() {
            if stream.index() != self.stream_index {
                continue;
            }

            self.decoder
                .send_packet(&packet)
                .map_err(|error| interrupted(error.to_string()))?;

            while self.decoder.receive_frame(&mut decoded_frame).is_ok() {
                let pts = decoded_frame.pts().unwrap_or(0);
                let current_index = pts_to_frame_index(pts, self.time_base, frames_per_second);

                // A seek can land past the exact target; the first frame at
                // or beyond it is the closest decodable answer.
                if current_index >= frame_index {
                    self.scaler
                        .run(&decoded_frame, &mut rgb_frame)
                        .map_err(|error| interrupted(error.to_string()))?;
                    return convert_frame_to_image(
                        &rgb_frame,
                        self.metadata.width,
                        self.metadata.height,
                    )
                    .ok_or_else(|| interrupted("frame buffer size mismatch".to_string()));
                }
            }
        }

        // Drain frames still buffered in the decoder.
        let _ = self.decoder.send_eof();
        while self.decoder.receive_frame(&mut decoded_frame).is_ok() {
            let pts = decoded_frame.pts().unwrap_or(0);
            let current_index = pts_to_frame_index(pts, self.time_base, frames_per_second);

            if current_index >= frame_index {
                self.scaler
                    .run(&decoded_frame, &mut rgb_frame)
                    .map_err(|error| interrupted(error.to_string()))?;
                return convert_frame_to_image(
                    &rgb_frame,
                    self.metadata.width,
                    self.metadata.height,
                )
                .ok_or_else(|| interrupted("frame buffer size mismatch".to_string()));
            }
        }

        Err(interrupted("end of stream".to_string()))
    }
}

impl FrameSource for VideoSource {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn seek_and_read(&mut self, frame_index: u64) -> Option<DynamicImage> {
        match self.read_frame(frame_index) {
            Ok(frame) => Some(frame),
            Err(error) => {
                log::debug!("Read of frame {frame_index} failed: {error}");
                None
            }
        }
    }
}

/// Convert a frame index to a seek timestamp in the stream's time base.
fn frame_index_to_stream_timestamp(
    frame_index: u64,
    frames_per_second: f64,
    time_base: Rational,
) -> i64 {
    let seconds = frame_index as f64 / frames_per_second;
    (seconds * time_base.denominator() as f64 / time_base.numerator() as f64) as i64
}

/// Rescale a PTS value from the stream time base to a frame index.
fn pts_to_frame_index(pts: i64, time_base: Rational, frames_per_second: f64) -> u64 {
    let seconds = pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64;
    // Round rather than truncate: PTS values land fractionally below the
    // frame boundary for some containers.
    (seconds * frames_per_second).round() as u64
}

/// Copy a scaled RGB24 frame into an [`image::DynamicImage`].
///
/// Returns `None` if the frame's dimensions do not match the expected buffer
/// size.
fn convert_frame_to_image(rgb_frame: &VideoFrame, width: u32, height: u32) -> Option<DynamicImage> {
    let stride = rgb_frame.stride(0);
    let row_length = (width as usize) * 3;
    let data = rgb_frame.data(0);

    let buffer = if stride == row_length {
        data[..row_length * (height as usize)].to_vec()
    } else {
        // Strip the per-row alignment padding FFmpeg may add.
        let mut buffer = Vec::with_capacity(row_length * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_length]);
        }
        buffer
    };

    RgbImage::from_raw(width, height, buffer).map(DynamicImage::ImageRgb8)
}
