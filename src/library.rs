//! Video libraries: batch processing and persistence.
//!
//! A [`VideoLibrary`] collects the [`SceneSet`] of every processed video,
//! keyed by source path, and can be saved to and loaded from a JSON file so
//! that scans are not repeated. Batch processing isolates failures per video:
//! one unreadable file is logged and skipped, never aborting the rest of the
//! batch.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    detector::{DetectionOptions, detect_scenes},
    error::SceneSiftError,
    fingerprint::MeanHasher,
    scene::SceneSet,
    source::VideoSource,
};

/// File extensions recognized when scanning a directory for videos.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "wmv", "mpeg", "mov", "webm"];

/// The scenes detected in one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedVideo {
    /// Path of the source video file.
    pub source_path: PathBuf,
    /// Scene boundaries in playback order.
    pub scenes: SceneSet,
}

/// An ordered collection of processed videos.
///
/// # Example
///
/// ```no_run
/// use scenesift::{DetectionOptions, SceneSiftError, VideoLibrary};
///
/// let library = VideoLibrary::process_source("videos/", &DetectionOptions::new())?;
/// library.save("library.json")?;
///
/// let restored = VideoLibrary::load("library.json")?;
/// for video in restored.videos() {
///     println!("{}: {} scenes", video.source_path.display(), video.scenes.len());
/// }
/// # Ok::<(), SceneSiftError>(())
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoLibrary {
    videos: Vec<ProcessedVideo>,
}

impl VideoLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one processed video.
    pub fn push(&mut self, video: ProcessedVideo) {
        self.videos.push(video);
    }

    /// The processed videos in insertion order.
    pub fn videos(&self) -> &[ProcessedVideo] {
        &self.videos
    }

    /// Look up a video's scenes by source path.
    pub fn find<P: AsRef<Path>>(&self, path: P) -> Option<&SceneSet> {
        let path = path.as_ref();
        self.videos
            .iter()
            .find(|video| video.source_path == path)
            .map(|video| &video.scenes)
    }

    /// Number of processed videos.
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    /// Whether the library holds no videos.
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Process a file or a directory of videos into a library.
    ///
    /// Each discovered video is opened, scanned with `options`, and appended.
    /// Per-video failures are logged via `log::error!` and skipped so a
    /// single corrupt file cannot abort the batch.
    ///
    /// # Errors
    ///
    /// Returns [`SceneSiftError::NoVideosFound`] if the path names no
    /// recognizable video files, or configuration errors from `options`.
    pub fn process_source<P: AsRef<Path>>(
        source_path: P,
        options: &DetectionOptions,
    ) -> Result<Self, SceneSiftError> {
        options.validate()?;

        let paths = discover_videos(source_path.as_ref())?;
        let hasher = MeanHasher::new(options.fingerprint_resolution);
        let mut library = Self::new();

        for path in paths {
            log::info!("Processing {}", path.display());

            let result = VideoSource::open(&path)
                .and_then(|mut source| detect_scenes(&mut source, &hasher, options));

            match result {
                Ok(scenes) => {
                    log::info!("{}: {} scenes", path.display(), scenes.len());
                    library.push(ProcessedVideo {
                        source_path: path,
                        scenes,
                    });
                }
                // Cancellation is a deliberate request, not a per-video fault.
                Err(SceneSiftError::Cancelled) => return Err(SceneSiftError::Cancelled),
                Err(error) => {
                    log::error!("Skipping {}: {error}", path.display());
                }
            }
        }

        Ok(library)
    }

    /// Save the library to a JSON file.
    ///
    /// Frame pixel data is never persisted; re-run detection with frame
    /// retention when visualizing a restored library.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSiftError> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        log::debug!(
            "Saved library of {} videos to {}",
            self.videos.len(),
            path.as_ref().display(),
        );
        Ok(())
    }

    /// Load a library from a JSON file written by [`save`](VideoLibrary::save).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneSiftError> {
        let file = File::open(path.as_ref())?;
        let library: Self = serde_json::from_reader(BufReader::new(file))?;
        log::debug!(
            "Loaded library of {} videos from {}",
            library.videos.len(),
            path.as_ref().display(),
        );
        Ok(library)
    }
}

/// Enumerate the video files at a path.
///
/// A file path yields itself (regardless of extension — the caller asked for
/// it explicitly); a directory yields its video-extension entries in sorted
/// order, without recursing.
///
/// # Errors
///
/// Returns [`SceneSiftError::NoVideosFound`] when a directory contains no
/// recognized video files or the path does not exist.
pub fn discover_videos(source_path: &Path) -> Result<Vec<PathBuf>, SceneSiftError> {
    if source_path.is_file() {
        return Ok(vec![source_path.to_path_buf()]);
    }

    if source_path.is_dir() {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(source_path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|extension| extension.to_str())
                        .is_some_and(|extension| {
                            VIDEO_EXTENSIONS
                                .iter()
                                .any(|known| known.eq_ignore_ascii_case(extension))
                        })
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(SceneSiftError::NoVideosFound {
                path: source_path.to_path_buf(),
            });
        }
        return Ok(paths);
    }

    Err(SceneSiftError::NoVideosFound {
        path: source_path.to_path_buf(),
    })
}
