//! PNG export of stitched images with pattern occurrences highlighted

use crate::io::configuration::{EXPORT_SCALE, OFF_COLOUR, ON_COLOUR, PATTERN_COLOUR};
use crate::io::error::{Result, WithPath};
use crate::spatial::bitmap::Bitmap;
use image::{ImageBuffer, Rgba};
use std::path::Path;

// Picks the colour of one cell; occurrence cells win over plain on cells
fn cell_colour(image: &Bitmap, marked: Option<&Bitmap>, x: usize, y: usize) -> [u8; 4] {
    if marked.is_some_and(|mask| mask.get(x, y)) {
        PATTERN_COLOUR
    } else if image.get(x, y) {
        ON_COLOUR
    } else {
        OFF_COLOUR
    }
}

/// Render a bitmap as an RGBA buffer, `EXPORT_SCALE` pixels per cell
///
/// Cells set in `marked` use the pattern colour.
pub fn render(image: &Bitmap, marked: Option<&Bitmap>) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let width = image.width() as u32 * EXPORT_SCALE;
    let height = image.height() as u32 * EXPORT_SCALE;

    ImageBuffer::from_fn(width, height, |px, py| {
        let x = (px / EXPORT_SCALE) as usize;
        let y = (py / EXPORT_SCALE) as usize;
        Rgba(cell_colour(image, marked, x, y))
    })
}

/// Export a bitmap as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_bitmap_as_png(
    image: &Bitmap,
    marked: Option<&Bitmap>,
    output_path: &Path,
) -> Result<()> {
    let img = render(image, marked);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    img.save(output_path).with_path(output_path, "export image")?;

    Ok(())
}
