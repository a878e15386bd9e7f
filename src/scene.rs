//! Scene records and ordered scene sets.
//!
//! A [`SceneRecord`] is the final output unit of detection: a frame index,
//! its hash delta, the playback timestamp, and optionally the retained frame
//! pixels. A [`SceneSet`] is the per-video collection, always ascending by
//! frame index with no duplicates — exactly the top-N candidates re-sorted
//! temporally.

use std::time::Duration;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::timestamp::format_timestamp;

/// One selected scene boundary. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Index of the frame where the boundary was detected.
    pub frame_index: u64,
    /// Hamming distance to the previously sampled frame's fingerprint.
    pub hash_delta: u32,
    /// Playback timestamp of the frame.
    pub timestamp: Duration,
    /// The frame's pixels, retained only when detection ran with frame
    /// retention enabled. Never serialized.
    #[serde(skip)]
    pub frame: Option<DynamicImage>,
}

impl SceneRecord {
    /// The timestamp formatted as `HH:MM:SS`.
    pub fn timestamp_display(&self) -> String {
        format_timestamp(self.timestamp)
    }
}

/// The ordered scene boundaries of one processed video.
///
/// Iteration order is playback order (ascending frame index). The set is
/// constructed once per video and owned by the caller; persistence and
/// visualization only read it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSet {
    records: Vec<SceneRecord>,
}

impl SceneSet {
    /// Build a set from records already in ascending frame-index order.
    ///
    /// Ordering is the constructor's contract; it is asserted in debug
    /// builds.
    pub(crate) fn new(records: Vec<SceneRecord>) -> Self {
        debug_assert!(
            records
                .windows(2)
                .all(|pair| pair[0].frame_index < pair[1].frame_index),
            "scene records must be strictly ascending by frame index"
        );
        Self { records }
    }

    /// The records in playback order.
    pub fn records(&self) -> &[SceneRecord] {
        &self.records
    }

    /// Iterate over the records in playback order.
    pub fn iter(&self) -> std::slice::Iter<'_, SceneRecord> {
        self.records.iter()
    }

    /// Number of scenes in the set.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set contains no scenes.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a SceneSet {
    type Item = &'a SceneRecord;
    type IntoIter = std::slice::Iter<'a, SceneRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
