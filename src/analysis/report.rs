//! End-to-end pipeline from raw tiles to summary values

use crate::algorithm::assembler::{Assembler, AssemblyStats};
use crate::algorithm::stitch::stitch;
use crate::analysis::scanner::{PatternScanner, ScanOutcome};
use crate::io::error::{Result, computation_error};
use crate::spatial::bitmap::Bitmap;
use crate::spatial::grid::ArrangedGrid;
use crate::spatial::tiles::{TileId, TileSet};

/// Everything derived from one tile set and pattern
#[derive(Clone, Debug)]
pub struct PuzzleReport {
    /// Placement of every tile
    pub grid: ArrangedGrid,
    /// Stitched tile interiors
    pub image: Bitmap,
    /// Pattern occurrences in the stitched image
    pub scan: ScanOutcome,
    /// Product of the ids of the four corner tiles
    pub corner_product: u64,
    /// Counters of the placement search
    pub assembly: AssemblyStats,
}

impl PuzzleReport {
    /// Number of pattern occurrences
    pub fn occurrence_count(&self) -> usize {
        self.scan.occurrence_count()
    }

    /// On cells left after masking every occurrence
    pub fn roughness(&self) -> usize {
        self.scan.roughness()
    }
}

/// Product of the ids at the four extreme corners of the grid
///
/// # Errors
///
/// Returns an error if:
/// - The grid is not a gap-free square
/// - The product overflows `u64`
pub fn corner_product(grid: &ArrangedGrid) -> Result<u64> {
    grid.require_square()?;
    let corners = grid
        .corner_ids()
        .ok_or_else(|| computation_error("corner_product", &"grid has a vacant corner"))?;

    corners.iter().try_fold(1_u64, |product, &id| {
        product.checked_mul(id).ok_or_else(|| {
            computation_error("corner_product", &format!("overflow multiplying by {id}"))
        })
    })
}

/// Assemble, stitch and scan in one call
///
/// # Errors
///
/// Propagates assembly, stitching and scanning errors
pub fn solve(tiles: &TileSet, pattern: &Bitmap, start: Option<TileId>) -> Result<PuzzleReport> {
    solve_with_progress(tiles, pattern, start, |_, _| {})
}

/// Assemble, stitch and scan, reporting `(placed, total)` during assembly
///
/// # Errors
///
/// Propagates assembly, stitching and scanning errors
pub fn solve_with_progress<F>(
    tiles: &TileSet,
    pattern: &Bitmap,
    start: Option<TileId>,
    progress: F,
) -> Result<PuzzleReport>
where
    F: FnMut(usize, usize),
{
    let scanner = PatternScanner::new(pattern)?;

    let mut assembler = Assembler::new(tiles);
    if let Some(id) = start {
        assembler = assembler.starting_from(id);
    }
    let grid = assembler.assemble_with_progress(progress)?;

    let image = stitch(&grid, tiles.side())?;
    let scan = scanner.scan(&image)?;
    let product = corner_product(&grid)?;

    Ok(PuzzleReport {
        grid,
        image,
        scan,
        corner_product: product,
        assembly: assembler.stats(),
    })
}
