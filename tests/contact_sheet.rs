//! Contact-sheet layout and compositing tests.

use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use scenesift::{
    DetectionOptions, FrameSource, MeanHasher, SceneSiftError, VideoMetadata, contact_sheet,
    detect_scenes, grid_dimensions,
};

// ── grid layout ──────────────────────────────────────────────

#[test]
fn grid_for_zero_scenes_is_empty() {
    assert_eq!(grid_dimensions(0), (0, 0));
}

#[test]
fn grid_prefers_twice_as_many_columns_as_rows() {
    // Counts that divide cleanly: rows = sqrt(n / 2), columns = 2 * rows.
    assert_eq!(grid_dimensions(2), (1, 2));
    assert_eq!(grid_dimensions(8), (2, 4));
    assert_eq!(grid_dimensions(18), (3, 6));
    assert_eq!(grid_dimensions(32), (4, 8));
}

#[test]
fn grid_grows_to_fit_awkward_counts() {
    for count in 1..=100 {
        let (rows, columns) = grid_dimensions(count);
        assert!(
            (rows as usize) * (columns as usize) >= count,
            "{count} thumbnails do not fit a {rows}x{columns} grid"
        );
    }
}

#[test]
fn grid_for_forty_scenes() {
    // sqrt(20) truncates to 4, giving 4x8 = 32 cells; one row is added.
    assert_eq!(grid_dimensions(40), (5, 8));
}

// ── compositing ──────────────────────────────────────────────

/// Frames alternate between mostly-dark and mostly-light halves so every
/// sampled pair differs.
struct AlternatingSource {
    metadata: VideoMetadata,
}

impl AlternatingSource {
    fn new(total_frames: u64) -> Self {
        Self {
            metadata: VideoMetadata {
                width: 64,
                height: 32,
                frames_per_second: 25.0,
                total_frames,
                codec: "alternating".to_string(),
            },
        }
    }
}

impl FrameSource for AlternatingSource {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn seek_and_read(&mut self, frame_index: u64) -> Option<DynamicImage> {
        let white_rows = if frame_index % 2 == 0 { 8 } else { 24 };
        let image = RgbImage::from_fn(64, 32, |_, y| {
            if y < white_rows {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        Some(DynamicImage::ImageRgb8(image))
    }
}

fn detect_with_frames(total_frames: u64, top_n: u32) -> scenesift::SceneSet {
    let mut source = AlternatingSource::new(total_frames);
    let options = DetectionOptions::new()
        .with_step_ratio(0.01)
        .with_top_n(top_n)
        .with_keep_frames(true);
    detect_scenes(&mut source, &MeanHasher::new(16), &options).expect("detect")
}

#[test]
fn sheet_dimensions_follow_the_grid() {
    let scenes = detect_with_frames(100, 8);
    assert_eq!(scenes.len(), 8);

    let sheet = contact_sheet(&scenes, 128).expect("sheet");

    let (rows, columns) = grid_dimensions(8);
    // Source frames are 64x32, so a 128-wide thumbnail is 64 tall.
    assert_eq!(sheet.width(), columns * 128);
    assert_eq!(sheet.height(), rows * 64);
}

#[test]
fn sheet_contains_thumbnail_content() {
    let scenes = detect_with_frames(100, 2);
    let sheet = contact_sheet(&scenes, 64).expect("sheet");

    // At least one pixel of the composited thumbnails is lit.
    let lit = sheet
        .pixels()
        .any(|(_, _, pixel)| pixel.0[0] > 128);
    assert!(lit, "contact sheet is entirely black");
}

#[test]
fn sheet_without_retained_frames_is_an_error() {
    let mut source = AlternatingSource::new(100);
    let options = DetectionOptions::new().with_step_ratio(0.01).with_top_n(4);
    let scenes = detect_scenes(&mut source, &MeanHasher::new(16), &options).expect("detect");

    assert!(matches!(
        contact_sheet(&scenes, 128),
        Err(SceneSiftError::NoFrameData)
    ));
}

#[test]
fn empty_scene_set_is_an_error() {
    // One sample produces no deltas and therefore no scenes.
    let mut source = AlternatingSource::new(100);
    let options = DetectionOptions::new()
        .with_step_ratio(1.0)
        .with_keep_frames(true);
    let scenes = detect_scenes(&mut source, &MeanHasher::new(16), &options).expect("detect");

    assert!(scenes.is_empty());
    assert!(matches!(
        contact_sheet(&scenes, 128),
        Err(SceneSiftError::NoFrameData)
    ));
}
