//! Scene-change detection pipeline.
//!
//! Ties the sampling, fingerprinting, scoring, and selection stages together:
//! an [`AdaptiveSampler`] drives iteration over a [`FrameSource`], each read
//! frame is fingerprinted and fed to a [`DeltaScorer`], and the accumulated
//! candidates are ranked, truncated to the configured limit, and timestamped
//! into a [`SceneSet`].
//!
//! Per-video processing is strictly sequential: the scorer compares each
//! fingerprint against the previous sampled frame's, so frames must be read
//! in order. Across videos there is no shared state — callers may process a
//! batch on as many threads as they like.
//!
//! # Example
//!
//! ```no_run
//! use scenesift::{DetectionOptions, MeanHasher, SceneSiftError, VideoSource, detect_scenes};
//!
//! let mut source = VideoSource::open("input.mp4")?;
//! let options = DetectionOptions::new().with_top_n(20);
//! let hasher = MeanHasher::new(options.fingerprint_resolution);
//! let scenes = detect_scenes(&mut source, &hasher, &options)?;
//! for scene in &scenes {
//!     println!("frame {} at {} (delta {})",
//!         scene.frame_index, scene.timestamp_display(), scene.hash_delta);
//! }
//! # Ok::<(), SceneSiftError>(())
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::{
    error::SceneSiftError,
    fingerprint::{DEFAULT_RESOLUTION, FingerprintProvider},
    progress::{CancellationToken, NoOpProgress, ProgressCallback, ProgressTracker},
    sampler::{AdaptiveSampler, DEFAULT_STEP_RATIO},
    scene::{SceneRecord, SceneSet},
    scorer::DeltaScorer,
    selector::select_scenes,
    source::FrameSource,
    timestamp::frame_to_timestamp,
};

/// Default maximum number of scenes retained per video.
pub const DEFAULT_TOP_N: u32 = 40;

/// Scene detection settings.
///
/// An explicit immutable configuration value passed into the pipeline entry
/// point; there is no process-wide mutable state.
#[derive(Clone)]
pub struct DetectionOptions {
    /// Sampling density: the fraction of the total frame count used as the
    /// step between samples. Must be positive.
    pub step_ratio: f64,
    /// Fingerprint grid resolution. Must be at least 1.
    pub fingerprint_resolution: u32,
    /// Maximum number of scenes retained per video.
    pub top_n: u32,
    /// Retain the pixel data of selected scene frames (needed for
    /// visualization). Selected frames are re-read after selection so that
    /// unselected samples never accumulate in memory.
    pub keep_frames: bool,
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// Cancellation token. `None` means never cancelled.
    pub(crate) cancellation: Option<CancellationToken>,
}

impl Debug for DetectionOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DetectionOptions")
            .field("step_ratio", &self.step_ratio)
            .field("fingerprint_resolution", &self.fingerprint_resolution)
            .field("top_n", &self.top_n)
            .field("keep_frames", &self.keep_frames)
            .field("has_cancellation", &self.cancellation.is_some())
            .finish()
    }
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionOptions {
    /// Create options with the default sampling ratio, fingerprint
    /// resolution, and scene limit.
    pub fn new() -> Self {
        Self {
            step_ratio: DEFAULT_STEP_RATIO,
            fingerprint_resolution: DEFAULT_RESOLUTION,
            top_n: DEFAULT_TOP_N,
            keep_frames: false,
            progress: Arc::new(NoOpProgress),
            cancellation: None,
        }
    }

    /// Set the sampling step ratio.
    #[must_use]
    pub fn with_step_ratio(mut self, step_ratio: f64) -> Self {
        self.step_ratio = step_ratio;
        self
    }

    /// Set the fingerprint grid resolution.
    #[must_use]
    pub fn with_fingerprint_resolution(mut self, resolution: u32) -> Self {
        self.fingerprint_resolution = resolution;
        self
    }

    /// Set the maximum number of scenes retained.
    #[must_use]
    pub fn with_top_n(mut self, top_n: u32) -> Self {
        self.top_n = top_n;
        self
    }

    /// Retain pixel data for selected scene frames.
    #[must_use]
    pub fn with_keep_frames(mut self, keep: bool) -> Self {
        self.keep_frames = keep;
        self
    }

    /// Attach a progress callback, invoked after each sampled frame.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token, checked before each frame read.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// [`SceneSiftError::InvalidStepRatio`] if the step ratio is not
    /// positive, [`SceneSiftError::InvalidResolution`] if the fingerprint
    /// resolution is zero.
    pub fn validate(&self) -> Result<(), SceneSiftError> {
        if !(self.step_ratio > 0.0) {
            return Err(SceneSiftError::InvalidStepRatio(self.step_ratio));
        }
        if self.fingerprint_resolution == 0 {
            return Err(SceneSiftError::InvalidResolution);
        }
        Ok(())
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

/// Detect scene changes in a video.
///
/// Samples frames at the rate derived from the video's length, scores each
/// sampled frame against its predecessor, and returns the `top_n` largest
/// jumps in playback order.
///
/// A frame read that fails mid-stream stops sampling early but does not fail
/// the scan — the candidates gathered up to that point are still selected and
/// returned. Re-running on the same frames and options produces an identical
/// result.
///
/// # Errors
///
/// - [`SceneSiftError::InvalidFrameRate`] if the source reports a
///   non-positive frame rate.
/// - [`SceneSiftError::InvalidStepRatio`] / [`SceneSiftError::InvalidResolution`]
///   for malformed options.
/// - [`SceneSiftError::InvalidSource`] if the source reports zero frames and
///   its first frame cannot be read.
/// - [`SceneSiftError::Cancelled`] if the attached token was cancelled.
pub fn detect_scenes(
    source: &mut dyn FrameSource,
    fingerprints: &dyn FingerprintProvider,
    options: &DetectionOptions,
) -> Result<SceneSet, SceneSiftError> {
    options.validate()?;

    let metadata = source.metadata().clone();
    if !(metadata.frames_per_second > 0.0) {
        return Err(SceneSiftError::InvalidFrameRate(metadata.frames_per_second));
    }

    // An unknown frame count leaves nothing to derive a step from. If even
    // the first frame is unreadable the source is unusable; otherwise the
    // scan degenerates to an empty result.
    if metadata.total_frames == 0 {
        if source.seek_and_read(0).is_none() {
            return Err(SceneSiftError::InvalidSource);
        }
        log::warn!("Source reports zero frames; returning an empty scene set");
        return Ok(SceneSet::default());
    }

    let sampler = AdaptiveSampler::new(metadata.total_frames, options.step_ratio)?;
    let expected_samples = sampler.expected_samples();

    log::debug!(
        "Sampling {} of {} frames (step={})",
        expected_samples,
        metadata.total_frames,
        sampler.step(),
    );

    let mut tracker = ProgressTracker::new(options.progress.clone(), Some(expected_samples));
    let mut scorer = DeltaScorer::new();
    let mut candidates = Vec::with_capacity(expected_samples.saturating_sub(1) as usize);
    let mut samples_read: u64 = 0;

    for frame_index in sampler {
        if options.is_cancelled() {
            return Err(SceneSiftError::Cancelled);
        }

        let Some(frame) = source.seek_and_read(frame_index) else {
            // End-of-stream or a corrupt trailing region. The candidates we
            // already have remain valid output.
            log::warn!(
                "Decode interrupted at frame {frame_index} after {samples_read} samples; \
                 selecting from partial candidates",
            );
            break;
        };
        samples_read += 1;

        let fingerprint = fingerprints.fingerprint(&frame);
        if let Some(candidate) = scorer.score(frame_index, fingerprint) {
            candidates.push(candidate);
        }

        tracker.advance(frame_index);
    }

    log::debug!(
        "Scored {} candidates from {} samples; selecting top {}",
        candidates.len(),
        samples_read,
        options.top_n,
    );

    let selected = select_scenes(candidates, options.top_n);

    let mut records = Vec::with_capacity(selected.len());
    for candidate in selected {
        let timestamp = frame_to_timestamp(candidate.frame_index, metadata.frames_per_second)?;

        // Sampled frames are transient; only selected scenes get their
        // pixels back, via a second read.
        let frame = if options.keep_frames {
            let frame = source.seek_and_read(candidate.frame_index);
            if frame.is_none() {
                log::warn!(
                    "Could not re-read frame {} for retention",
                    candidate.frame_index,
                );
            }
            frame
        } else {
            None
        };

        records.push(SceneRecord {
            frame_index: candidate.frame_index,
            hash_delta: candidate.hash_delta,
            timestamp,
            frame,
        });
    }

    Ok(SceneSet::new(records))
}
