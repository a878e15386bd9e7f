//! Perceptual fingerprint tests.

use image::{DynamicImage, Rgb, RgbImage};
use scenesift::{DEFAULT_RESOLUTION, FingerprintProvider, MeanHasher};

fn gradient_frame(offset: u8) -> DynamicImage {
    let image = RgbImage::from_fn(64, 48, |x, y| {
        let value = ((x * 4) as u8).wrapping_add((y * 2) as u8).wrapping_add(offset);
        Rgb([value, value, value])
    });
    DynamicImage::ImageRgb8(image)
}

fn checkerboard_frame() -> DynamicImage {
    let image = RgbImage::from_fn(64, 48, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    DynamicImage::ImageRgb8(image)
}

#[test]
fn identical_frames_produce_identical_fingerprints() {
    let hasher = MeanHasher::new(16);
    let a = hasher.fingerprint(&gradient_frame(0));
    let b = hasher.fingerprint(&gradient_frame(0));

    assert_eq!(a, b);
    assert_eq!(a.distance(&b), 0);
}

#[test]
fn different_content_produces_nonzero_distance() {
    let hasher = MeanHasher::new(16);
    let gradient = hasher.fingerprint(&gradient_frame(0));
    let checkerboard = hasher.fingerprint(&checkerboard_frame());

    assert!(gradient.distance(&checkerboard) > 0);
}

#[test]
fn distance_is_symmetric() {
    let hasher = MeanHasher::new(16);
    let a = hasher.fingerprint(&gradient_frame(0));
    let b = hasher.fingerprint(&checkerboard_frame());

    assert_eq!(a.distance(&b), b.distance(&a));
}

#[test]
fn distance_is_bounded_by_bit_length() {
    let hasher = MeanHasher::new(8);
    let a = hasher.fingerprint(&gradient_frame(0));
    let b = hasher.fingerprint(&checkerboard_frame());

    assert_eq!(a.bit_length(), 64);
    assert!(a.distance(&b) <= a.bit_length());
}

#[test]
fn bit_length_is_resolution_squared() {
    for resolution in [1, 8, 16, 32, 100] {
        let hasher = MeanHasher::new(resolution);
        let fingerprint = hasher.fingerprint(&gradient_frame(0));
        assert_eq!(fingerprint.resolution(), resolution);
        assert_eq!(fingerprint.bit_length(), resolution * resolution);
    }
}

#[test]
fn zero_resolution_is_clamped() {
    let hasher = MeanHasher::new(0);
    assert_eq!(hasher.resolution(), 1);
}

#[test]
fn default_hasher_uses_default_resolution() {
    assert_eq!(MeanHasher::default().resolution(), DEFAULT_RESOLUTION);
}

#[test]
fn fingerprint_is_independent_of_input_dimensions() {
    // The grid is computed on a fixed-size downsample, so scaling the input
    // leaves the fingerprint nearly unchanged.
    fn two_thirds_white(width: u32, height: u32) -> DynamicImage {
        let split = height * 2 / 3;
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |_, y| {
            if y < split {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        }))
    }

    let hasher = MeanHasher::new(16);
    let small = hasher.fingerprint(&two_thirds_white(64, 48));
    let large = hasher.fingerprint(&two_thirds_white(128, 96));

    // At most the boundary row's worth of bits may differ from resampling.
    assert!(small.distance(&large) <= 16);
}
