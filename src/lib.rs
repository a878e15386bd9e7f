//! # scenesift
//!
//! Detect scene changes in video files by adaptive sampling and perceptual
//! hashing.
//!
//! `scenesift` samples a video at a rate derived from its length, fingerprints
//! each sampled frame with a perceptual hash, scores every consecutive pair of
//! fingerprints by Hamming distance, and keeps the N largest jumps in playback
//! order. Decoding is powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate; frames are
//! exposed as [`image::DynamicImage`] values.
//!
//! ## Quick Start
//!
//! ```no_run
//! use scenesift::{DetectionOptions, MeanHasher, VideoSource, detect_scenes};
//!
//! let mut source = VideoSource::open("input.mp4").unwrap();
//! let options = DetectionOptions::new().with_top_n(20);
//! let hasher = MeanHasher::new(options.fingerprint_resolution);
//!
//! let scenes = detect_scenes(&mut source, &hasher, &options).unwrap();
//! for scene in &scenes {
//!     println!("frame {:>7}  {}  delta {}",
//!         scene.frame_index, scene.timestamp_display(), scene.hash_delta);
//! }
//! ```
//!
//! ### Process a directory and save the results
//!
//! ```no_run
//! use scenesift::{DetectionOptions, VideoLibrary};
//!
//! let library = VideoLibrary::process_source("videos/", &DetectionOptions::new()).unwrap();
//! library.save("library.json").unwrap();
//! ```
//!
//! ## Features
//!
//! - **Adaptive sampling** — the step between sampled frames scales with the
//!   video's length, bounding work per video regardless of duration
//! - **Perceptual fingerprints** — built-in average hash, or any
//!   [`FingerprintProvider`] implementation
//! - **Top-N selection** — the largest fingerprint jumps, returned in
//!   playback order with timestamps
//! - **Partial results** — a truncated or corrupt tail stops sampling early
//!   without discarding the candidates already gathered
//! - **Batch libraries** — process a directory with per-video failure
//!   isolation, persist results as JSON
//! - **Contact sheets** — composite the selected frames into a review grid
//! - **Progress & cancellation** — cooperative callbacks and a
//!   [`CancellationToken`] for long scans
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod detector;
pub mod error;
pub mod fingerprint;
pub mod library;
pub mod metadata;
pub mod progress;
pub mod sampler;
pub mod scene;
pub mod scorer;
pub mod selector;
pub mod source;
pub mod timestamp;
pub mod visualize;

pub use detector::{DEFAULT_TOP_N, DetectionOptions, detect_scenes};
pub use error::SceneSiftError;
pub use fingerprint::{DEFAULT_RESOLUTION, Fingerprint, FingerprintProvider, MeanHasher};
pub use library::{ProcessedVideo, VIDEO_EXTENSIONS, VideoLibrary, discover_videos};
pub use metadata::VideoMetadata;
pub use progress::{CancellationToken, ProgressCallback, ProgressInfo};
pub use sampler::{AdaptiveSampler, DEFAULT_STEP_RATIO};
pub use scene::{SceneRecord, SceneSet};
pub use scorer::{DeltaScorer, ScoredCandidate};
pub use selector::select_scenes;
pub use source::{FrameSource, VideoSource};
pub use timestamp::{format_timestamp, frame_to_timestamp};
pub use visualize::{DEFAULT_THUMBNAIL_WIDTH, contact_sheet, grid_dimensions};
