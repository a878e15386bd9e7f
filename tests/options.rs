//! DetectionOptions builder and validation tests.

use std::sync::Arc;

use scenesift::{
    CancellationToken, DEFAULT_STEP_RATIO, DetectionOptions, ProgressCallback, ProgressInfo,
    SceneSiftError,
};

#[test]
fn defaults() {
    let options = DetectionOptions::new();
    assert_eq!(options.step_ratio, DEFAULT_STEP_RATIO);
    assert_eq!(options.fingerprint_resolution, 32);
    assert_eq!(options.top_n, 40);
    assert!(!options.keep_frames);
    assert!(options.validate().is_ok());
}

#[test]
fn default_trait_matches_new() {
    let explicit = DetectionOptions::new();
    let derived = DetectionOptions::default();
    assert_eq!(explicit.step_ratio, derived.step_ratio);
    assert_eq!(explicit.top_n, derived.top_n);
}

#[test]
fn builders_set_each_field() {
    let options = DetectionOptions::new()
        .with_step_ratio(0.01)
        .with_fingerprint_resolution(64)
        .with_top_n(10)
        .with_keep_frames(true);

    assert_eq!(options.step_ratio, 0.01);
    assert_eq!(options.fingerprint_resolution, 64);
    assert_eq!(options.top_n, 10);
    assert!(options.keep_frames);
}

#[test]
fn debug_output_omits_callbacks() {
    let options = DetectionOptions::new();
    let debug = format!("{options:?}");
    assert!(debug.contains("DetectionOptions"));
    assert!(debug.contains("has_cancellation: false"));

    let with_token = DetectionOptions::new().with_cancellation(CancellationToken::new());
    assert!(format!("{with_token:?}").contains("has_cancellation: true"));
}

#[test]
fn validate_rejects_bad_ratio() {
    for ratio in [0.0, -0.1, f64::NAN] {
        let options = DetectionOptions::new().with_step_ratio(ratio);
        assert!(matches!(
            options.validate(),
            Err(SceneSiftError::InvalidStepRatio(_))
        ));
    }
}

#[test]
fn validate_rejects_zero_resolution() {
    let options = DetectionOptions::new().with_fingerprint_resolution(0);
    assert!(matches!(
        options.validate(),
        Err(SceneSiftError::InvalidResolution)
    ));
}

#[test]
fn zero_top_n_is_valid() {
    // A pointless but well-formed configuration.
    assert!(DetectionOptions::new().with_top_n(0).validate().is_ok());
}

struct Quiet;

impl ProgressCallback for Quiet {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

#[test]
fn options_with_callback_are_cloneable() {
    let options = DetectionOptions::new().with_progress(Arc::new(Quiet));
    let cloned = options.clone();
    assert_eq!(cloned.top_n, options.top_n);
}

// ── cancellation token ───────────────────────────────────────

#[test]
fn token_starts_clear() {
    assert!(!CancellationToken::new().is_cancelled());
}

#[test]
fn cancel_is_visible_to_clones() {
    let token = CancellationToken::new();
    let clone = token.clone();

    token.cancel();
    assert!(clone.is_cancelled());
}

#[test]
fn cancel_is_idempotent() {
    let token = CancellationToken::new();
    token.cancel();
    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn cancel_crosses_threads() {
    let token = CancellationToken::new();
    let clone = token.clone();

    let handle = std::thread::spawn(move || {
        clone.cancel();
    });
    handle.join().expect("join");

    assert!(token.is_cancelled());
}
