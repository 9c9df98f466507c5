//! Joining tile interiors into one image
//!
//! Neighbouring tiles duplicate their shared border, so every tile loses its
//! outermost ring before the interiors are laid out edge to edge.

use crate::io::error::{PuzzleError, Result};
use crate::spatial::bitmap::Bitmap;
use crate::spatial::grid::ArrangedGrid;
use crate::trace::{trace_event, trace_span};

/// Stitch the interiors of a square arrangement into one bitmap
///
/// The tile at grid column `c` and row `r` (counted from the top-left corner)
/// fills the block starting at `(c * (tile_side - 2), r * (tile_side - 2))`.
///
/// # Errors
///
/// Returns a shape error if:
/// - `tile_side` is below 3, leaving no interior
/// - The grid does not form a gap-free square
/// - A placed bitmap is not `tile_side` square
pub fn stitch(grid: &ArrangedGrid, tile_side: usize) -> Result<Bitmap> {
    if tile_side < 3 {
        return Err(PuzzleError::TileTooSmall { side: tile_side });
    }
    let layout = grid.layout()?;
    let _span = trace_span!("stitch", tiles = grid.len()).entered();

    let inner = tile_side - 2;
    let image_side = layout.nrows() * inner;
    let mut image = Bitmap::blank(image_side, image_side);

    for ((row, col), id) in layout.indexed_iter() {
        let tile = grid.placed(*id).ok_or(PuzzleError::UnknownTile { id: *id })?;
        if tile.bitmap.dimensions() != (tile_side, tile_side) {
            let (height, width) = tile.bitmap.dimensions();
            return Err(PuzzleError::TileShape {
                id: *id,
                expected: tile_side,
                height,
                width,
            });
        }
        image.paste(&tile.bitmap.interior()?, col * inner, row * inner)?;
    }

    trace_event!("stitched", side = image_side, on_cells = image.count_on());
    Ok(image)
}
