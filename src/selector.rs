//! Top-N scene candidate selection.
//!
//! Ranking identifies the largest perceptual jumps (the likely scene
//! boundaries); the final re-sort restores chronological order so downstream
//! consumers print and render scenes in playback order, not by magnitude.

use crate::scorer::ScoredCandidate;

/// Keep the `n` candidates with the largest `hash_delta`, in temporal order.
///
/// The ranking sort is stable and descending by delta, so ties are broken by
/// the candidates' original (ascending frame index) order and results are
/// deterministic. `n == 0` yields an empty set; `n` larger than the candidate
/// count returns every candidate, temporally sorted.
///
/// # Example
///
/// ```
/// use scenesift::{ScoredCandidate, select_scenes};
///
/// let candidates = vec![
///     ScoredCandidate { frame_index: 10, hash_delta: 5 },
///     ScoredCandidate { frame_index: 20, hash_delta: 50 },
///     ScoredCandidate { frame_index: 30, hash_delta: 20 },
/// ];
/// let selected = select_scenes(candidates, 2);
/// assert_eq!(selected[0].frame_index, 20);
/// assert_eq!(selected[1].frame_index, 30);
/// ```
pub fn select_scenes(mut candidates: Vec<ScoredCandidate>, n: u32) -> Vec<ScoredCandidate> {
    // Stable sort: equal deltas keep their ascending frame-index order.
    candidates.sort_by(|a, b| b.hash_delta.cmp(&a.hash_delta));
    candidates.truncate(n as usize);
    candidates.sort_by_key(|candidate| candidate.frame_index);
    candidates
}
