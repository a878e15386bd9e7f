//! Adaptive sampler tests.

use scenesift::{AdaptiveSampler, DEFAULT_STEP_RATIO, SceneSiftError};

#[test]
fn default_ratio_on_thousand_frames() {
    let sampler = AdaptiveSampler::new(1000, DEFAULT_STEP_RATIO).expect("sampler");
    // floor(1000 * 0.00429584) = 4
    assert_eq!(sampler.step(), 4);
    assert_eq!(sampler.expected_samples(), 250);

    let indices: Vec<u64> = sampler.collect();
    assert_eq!(indices.len(), 250);
    assert_eq!(indices[0], 4);
    assert_eq!(indices[1], 8);
    assert_eq!(*indices.last().expect("non-empty"), 1000);
}

#[test]
fn short_video_clamps_step_to_one() {
    // floor(10 * 0.00429584) = 0, clamped.
    let sampler = AdaptiveSampler::new(10, DEFAULT_STEP_RATIO).expect("sampler");
    assert_eq!(sampler.step(), 1);

    let indices: Vec<u64> = sampler.collect();
    assert_eq!(indices, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
}

#[test]
fn indices_are_strictly_increasing_multiples_of_step() {
    let sampler = AdaptiveSampler::new(100_000, DEFAULT_STEP_RATIO).expect("sampler");
    let step = sampler.step();
    let indices: Vec<u64> = sampler.collect();

    assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
    for (position, index) in indices.iter().enumerate() {
        assert_eq!(*index, step * (position as u64 + 1));
    }
    assert!(*indices.last().expect("non-empty") <= 100_000);
}

#[test]
fn sample_count_stays_flat_across_lengths() {
    // The point of deriving the step from the length: a tenfold longer video
    // should not produce tenfold the samples.
    let short = AdaptiveSampler::new(10_000, DEFAULT_STEP_RATIO).expect("sampler");
    let long = AdaptiveSampler::new(100_000, DEFAULT_STEP_RATIO).expect("sampler");

    let short_count = short.count() as i64;
    let long_count = long.count() as i64;
    assert!((short_count - long_count).abs() <= 2);
}

#[test]
fn zero_frames_yields_empty_sequence() {
    let sampler = AdaptiveSampler::new(0, DEFAULT_STEP_RATIO).expect("sampler");
    assert_eq!(sampler.expected_samples(), 0);
    assert_eq!(sampler.count(), 0);
}

#[test]
fn size_hint_is_exact() {
    let sampler = AdaptiveSampler::new(1000, DEFAULT_STEP_RATIO).expect("sampler");
    let (lower, upper) = sampler.size_hint();
    assert_eq!(lower, 250);
    assert_eq!(upper, Some(250));
}

#[test]
fn rejects_non_positive_ratio() {
    assert!(matches!(
        AdaptiveSampler::new(1000, 0.0),
        Err(SceneSiftError::InvalidStepRatio(_))
    ));
    assert!(matches!(
        AdaptiveSampler::new(1000, -0.5),
        Err(SceneSiftError::InvalidStepRatio(_))
    ));
    assert!(matches!(
        AdaptiveSampler::new(1000, f64::NAN),
        Err(SceneSiftError::InvalidStepRatio(_))
    ));
}

#[test]
fn large_ratio_yields_single_sample() {
    let sampler = AdaptiveSampler::new(100, 1.0).expect("sampler");
    assert_eq!(sampler.step(), 100);
    let indices: Vec<u64> = sampler.collect();
    assert_eq!(indices, vec![100]);
}
