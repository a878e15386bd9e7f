//! Scene contact sheets.
//!
//! Composites the retained frames of a [`SceneSet`] into a single grid image
//! for quick review. Layout is a presentation concern only — the scene set's
//! ordering and content are fixed by detection.

use image::{DynamicImage, GenericImage, imageops::FilterType};

use crate::{error::SceneSiftError, scene::SceneSet};

/// Default thumbnail width in the contact sheet, in pixels.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 320;

/// Compute a grid layout for `scene_count` thumbnails.
///
/// Returns `(rows, columns)`, aiming for twice as many columns as rows:
/// with `n = rows * cols` and `cols = 2 * rows`, `rows = sqrt(n / 2)`.
/// Integer truncation can leave the grid short, so rows and columns are
/// alternately incremented until every thumbnail fits.
pub fn grid_dimensions(scene_count: usize) -> (u32, u32) {
    if scene_count == 0 {
        return (0, 0);
    }

    let mut rows = ((scene_count as f64 / 2.0).sqrt()) as u32;
    let mut columns = 2 * rows;
    let mut grow_columns = false;

    while (rows as usize) * (columns as usize) < scene_count {
        if grow_columns {
            columns += 1;
        } else {
            rows += 1;
        }
        grow_columns = !grow_columns;
    }

    (rows, columns)
}

/// Composite the retained scene frames into a contact-sheet image.
///
/// Scenes appear in playback order, left to right, top to bottom. Each frame
/// is scaled to `thumbnail_width` preserving its aspect ratio. Scenes without
/// retained pixels leave their cell blank.
///
/// # Errors
///
/// Returns [`SceneSiftError::NoFrameData`] if no scene in the set retained
/// its frame — detection must run with frame retention enabled.
///
/// # Example
///
/// ```no_run
/// use scenesift::{
///     DetectionOptions, MeanHasher, SceneSiftError, VideoSource,
///     contact_sheet, detect_scenes,
/// };
///
/// let mut source = VideoSource::open("input.mp4")?;
/// let options = DetectionOptions::new().with_keep_frames(true);
/// let hasher = MeanHasher::new(options.fingerprint_resolution);
/// let scenes = detect_scenes(&mut source, &hasher, &options)?;
///
/// let sheet = contact_sheet(&scenes, 320)?;
/// sheet.save("scenes.png")?;
/// # Ok::<(), SceneSiftError>(())
/// ```
pub fn contact_sheet(
    scenes: &SceneSet,
    thumbnail_width: u32,
) -> Result<DynamicImage, SceneSiftError> {
    let first_frame = scenes
        .iter()
        .find_map(|scene| scene.frame.as_ref())
        .ok_or(SceneSiftError::NoFrameData)?;

    let (rows, columns) = grid_dimensions(scenes.len());

    // Cell height from the first retained frame's aspect ratio; mixed
    // aspect ratios are letterboxed into the same cell size.
    let scale = thumbnail_width as f64 / first_frame.width().max(1) as f64;
    let cell_width = thumbnail_width.max(1);
    let cell_height = ((first_frame.height() as f64 * scale).round() as u32).max(1);

    log::debug!(
        "Compositing {} scenes into a {rows}x{columns} sheet ({cell_width}x{cell_height} cells)",
        scenes.len(),
    );

    let mut sheet = DynamicImage::new_rgb8(cell_width * columns, cell_height * rows);

    for (index, scene) in scenes.iter().enumerate() {
        let Some(frame) = &scene.frame else {
            continue;
        };

        let thumbnail = frame.resize(cell_width, cell_height, FilterType::Triangle);
        let column = (index as u32) % columns;
        let row = (index as u32) / columns;

        // Centre the thumbnail within its cell.
        let x = column * cell_width + (cell_width - thumbnail.width()) / 2;
        let y = row * cell_height + (cell_height - thumbnail.height()) / 2;
        // copy_from only fails on dimension mismatch, which the resize above
        // rules out.
        let _ = sheet.copy_from(&thumbnail, x, y);
    }

    Ok(sheet)
}
