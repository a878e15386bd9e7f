//! Progress reporting and cancellation support.
//!
//! Scene scans over long videos can take minutes, so the detection loop
//! reports progress through [`ProgressCallback`] and checks a
//! [`CancellationToken`] at the top of every sampling iteration.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use scenesift::{
//!     DetectionOptions, MeanHasher, ProgressCallback, ProgressInfo,
//!     SceneSiftError, VideoSource, detect_scenes,
//! };
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("{pct:.1}% complete");
//!         }
//!     }
//! }
//!
//! let mut source = VideoSource::open("input.mp4")?;
//! let options = DetectionOptions::new().with_progress(Arc::new(PrintProgress));
//! let scenes = detect_scenes(&mut source, &MeanHasher::default(), &options)?;
//! # Ok::<(), SceneSiftError>(())
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

/// A snapshot of scan progress, delivered to [`ProgressCallback::on_progress`].
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Sampled frames processed so far.
    pub samples_processed: u64,
    /// Total samples expected, if the frame count was known up front.
    pub samples_expected: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if the total is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since the scan started.
    pub elapsed: Duration,
    /// The frame index currently being sampled.
    pub current_frame: Option<u64>,
}

/// Trait for receiving progress updates during a scan.
///
/// Implementations must be [`Send`] and [`Sync`] because a scan may run on a
/// worker thread. Callbacks are infallible — they observe but cannot halt the
/// scan; use [`CancellationToken`] for that.
pub trait ProgressCallback: Send + Sync {
    /// Called after each sampled frame is processed.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation used when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Cooperative cancellation token backed by an [`AtomicBool`].
///
/// Clone the token and share it between threads; cancelling any clone cancels
/// them all. The sampling loop checks the token before each frame read and
/// returns [`SceneSiftError::Cancelled`](crate::SceneSiftError::Cancelled)
/// once it observes the request.
///
/// # Example
///
/// ```
/// use scenesift::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. All clones observe the request.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Internal helper that tracks scan timing and emits callbacks.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    expected: Option<u64>,
    processed: u64,
    start_time: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(callback: Arc<dyn ProgressCallback>, expected: Option<u64>) -> Self {
        Self {
            callback,
            expected,
            processed: 0,
            start_time: Instant::now(),
        }
    }

    /// Record one processed sample and fire the callback.
    pub(crate) fn advance(&mut self, frame_index: u64) {
        self.processed += 1;

        let percentage = self
            .expected
            .filter(|&total| total > 0)
            .map(|total| (self.processed as f32 / total as f32) * 100.0);

        self.callback.on_progress(&ProgressInfo {
            samples_processed: self.processed,
            samples_expected: self.expected,
            percentage,
            elapsed: self.start_time.elapsed(),
            current_frame: Some(frame_index),
        });
    }
}
