//! Consecutive fingerprint delta scoring.
//!
//! [`DeltaScorer`] consumes fingerprints in sampled order and emits one
//! [`ScoredCandidate`] per sampled frame after the first: the Hamming
//! distance between the frame's fingerprint and the previous sampled frame's
//! fingerprint. The state dependency is strictly sequential, which is why
//! per-video sampling runs single-threaded.

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// A sampled frame scored against its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Index of the sampled frame in the source video.
    pub frame_index: u64,
    /// Hamming distance between this frame's fingerprint and the previous
    /// sampled frame's fingerprint.
    pub hash_delta: u32,
}

/// Stateful scorer over a stream of sampled-frame fingerprints.
///
/// # Example
///
/// ```
/// use image::DynamicImage;
/// use scenesift::{DeltaScorer, FingerprintProvider, MeanHasher};
///
/// let hasher = MeanHasher::new(8);
/// let mut scorer = DeltaScorer::new();
///
/// let frame = DynamicImage::new_rgb8(32, 32);
/// // The first sampled frame has nothing to compare against.
/// assert!(scorer.score(10, hasher.fingerprint(&frame)).is_none());
/// // Every later frame yields a candidate.
/// assert!(scorer.score(20, hasher.fingerprint(&frame)).is_some());
/// ```
#[derive(Debug, Default)]
pub struct DeltaScorer {
    previous: Option<Fingerprint>,
}

impl DeltaScorer {
    /// Create a scorer with no previous fingerprint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the fingerprint of the next sampled frame.
    ///
    /// Returns `None` for the first frame (it can never be a scene boundary)
    /// and a [`ScoredCandidate`] for every frame after it. The provided
    /// fingerprint becomes the comparison basis for the next call.
    pub fn score(&mut self, frame_index: u64, fingerprint: Fingerprint) -> Option<ScoredCandidate> {
        let candidate = self.previous.as_ref().map(|previous| ScoredCandidate {
            frame_index,
            hash_delta: previous.distance(&fingerprint),
        });
        self.previous = Some(fingerprint);
        candidate
    }
}
