//! Adaptive frame sampling.
//!
//! Scanning every frame of a long video is wasteful: consecutive frames are
//! nearly identical and seeking dominates runtime. [`AdaptiveSampler`] derives
//! a step size from the video's length so that sampling density stays
//! comparable across short and long videos — roughly `1 / step_ratio` samples
//! per video regardless of frame count.

use crate::error::SceneSiftError;

/// Default fraction of the total frame count used as the sampling step.
///
/// At this ratio a video yields on the order of 230 samples however long it
/// is; a value small enough that hard cuts are rarely skipped over entirely.
pub const DEFAULT_STEP_RATIO: f64 = 0.00429584;

/// Lazy iterator over the frame indices to sample.
///
/// Yields `step, 2*step, 3*step, …` while the index is within the total frame
/// count, where `step = max(1, floor(total_frames * step_ratio))`. The
/// sequence is strictly increasing, finite, and not restartable.
///
/// # Example
///
/// ```
/// use scenesift::AdaptiveSampler;
///
/// let sampler = AdaptiveSampler::new(1000, 0.00429584).unwrap();
/// assert_eq!(sampler.step(), 4);
/// let indices: Vec<u64> = sampler.collect();
/// assert_eq!(indices.len(), 250);
/// assert_eq!(indices[0], 4);
/// assert_eq!(*indices.last().unwrap(), 1000);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveSampler {
    step: u64,
    total_frames: u64,
    next_index: u64,
}

impl AdaptiveSampler {
    /// Create a sampler for a video of `total_frames` frames.
    ///
    /// A derived step below 1 is clamped to 1, i.e. every frame is visited.
    /// `total_frames == 0` is not an error and yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SceneSiftError::InvalidStepRatio`] if `step_ratio` is zero,
    /// negative, or NaN.
    pub fn new(total_frames: u64, step_ratio: f64) -> Result<Self, SceneSiftError> {
        if !(step_ratio > 0.0) {
            return Err(SceneSiftError::InvalidStepRatio(step_ratio));
        }

        let step = ((total_frames as f64 * step_ratio).floor() as u64).max(1);

        Ok(Self {
            step,
            total_frames,
            next_index: step,
        })
    }

    /// The frame-index increment between successive samples.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// How many samples the full sequence will yield.
    pub fn expected_samples(&self) -> u64 {
        self.total_frames / self.step
    }
}

impl Iterator for AdaptiveSampler {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next_index > self.total_frames {
            return None;
        }
        let index = self.next_index;
        self.next_index += self.step;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next_index > self.total_frames {
            0
        } else {
            ((self.total_frames - self.next_index) / self.step + 1) as usize
        };
        (remaining, Some(remaining))
    }
}
