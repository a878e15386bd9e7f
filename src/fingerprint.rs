//! Perceptual frame fingerprinting.
//!
//! A [`Fingerprint`] is a fixed-length bit vector summarizing the visual
//! content of one frame. Two fingerprints produced at the same resolution can
//! be compared with [`Fingerprint::distance`] (Hamming distance); a large
//! distance between consecutive sampled frames marks a likely scene boundary.
//!
//! [`MeanHasher`] is the built-in provider: it downsamples a frame to an
//! `N×N` grayscale grid and sets one bit per cell that is brighter than the
//! grid mean. The construction is deterministic for identical input and
//! resolution, and robust to minor pixel-level variation.

use image::{DynamicImage, imageops::FilterType};

/// Default fingerprint grid resolution (bits per side).
pub const DEFAULT_RESOLUTION: u32 = 32;

/// A fixed-length perceptual fingerprint of a single frame.
///
/// Opaque outside this module apart from distance computation. Fingerprints
/// are only comparable when produced at the same resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// Packed bits, little-endian within each word.
    words: Vec<u64>,
    /// Number of meaningful bits (`resolution * resolution`).
    bit_length: u32,
    /// Grid resolution the fingerprint was produced at.
    resolution: u32,
}

impl Fingerprint {
    fn new(bit_length: u32, resolution: u32) -> Self {
        let word_count = bit_length.div_ceil(64) as usize;
        Self {
            words: vec![0; word_count],
            bit_length,
            resolution,
        }
    }

    fn set_bit(&mut self, index: u32) {
        self.words[(index / 64) as usize] |= 1 << (index % 64);
    }

    /// Number of meaningful bits in the fingerprint.
    pub fn bit_length(&self) -> u32 {
        self.bit_length
    }

    /// The grid resolution this fingerprint was produced at.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Hamming distance to another fingerprint: the number of differing bits.
    ///
    /// Both fingerprints must come from the same provider configuration.
    /// Comparing fingerprints of different resolutions is a logic error;
    /// in debug builds it panics, in release builds the shorter bit count
    /// bounds the comparison.
    pub fn distance(&self, other: &Fingerprint) -> u32 {
        debug_assert_eq!(
            self.resolution, other.resolution,
            "fingerprints from different resolutions are not comparable"
        );
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }
}

/// A source of perceptual fingerprints for decoded frames.
///
/// Detection treats this as an external collaborator so tests can substitute
/// a deterministic stub and callers can plug in alternative hash families.
pub trait FingerprintProvider {
    /// The grid resolution fingerprints are produced at.
    fn resolution(&self) -> u32;

    /// Compute the fingerprint of one decoded frame.
    ///
    /// Must be deterministic: identical pixel data and resolution always
    /// produce an identical fingerprint.
    fn fingerprint(&self, frame: &DynamicImage) -> Fingerprint;
}

/// The built-in average-hash fingerprint provider.
///
/// # Example
///
/// ```
/// use image::DynamicImage;
/// use scenesift::{FingerprintProvider, MeanHasher};
///
/// let hasher = MeanHasher::new(16);
/// let frame = DynamicImage::new_rgb8(64, 64);
/// let fingerprint = hasher.fingerprint(&frame);
/// assert_eq!(fingerprint.bit_length(), 256);
/// ```
#[derive(Debug, Clone)]
pub struct MeanHasher {
    resolution: u32,
}

impl MeanHasher {
    /// Create a hasher with the given grid resolution.
    ///
    /// A resolution of `n` produces `n * n`-bit fingerprints. Resolution 0 is
    /// clamped to 1; callers that want a hard error should validate via
    /// [`DetectionOptions`](crate::DetectionOptions) instead.
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution: resolution.max(1),
        }
    }
}

impl Default for MeanHasher {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION)
    }
}

impl FingerprintProvider for MeanHasher {
    fn resolution(&self) -> u32 {
        self.resolution
    }

    fn fingerprint(&self, frame: &DynamicImage) -> Fingerprint {
        let side = self.resolution;
        let grid = frame
            .resize_exact(side, side, FilterType::Triangle)
            .to_luma8();

        let pixels = grid.as_raw();
        let sum: u64 = pixels.iter().map(|&p| p as u64).sum();
        let mean = sum / pixels.len() as u64;

        let mut fingerprint = Fingerprint::new(side * side, side);
        for (index, &value) in pixels.iter().enumerate() {
            if value as u64 > mean {
                fingerprint.set_bit(index as u32);
            }
        }
        fingerprint
    }
}
