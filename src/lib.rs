//! Reassembly of images cut into scrambled square tiles, and pattern search in the result
//!
//! Tiles arrive with unknown rotation and reflection. Borders are matched under
//! the eight symmetries of the square, tiles are placed on a grid one match at a
//! time with every placement checked against all of its neighbours, interiors are
//! stitched into one image, and that image is scanned for a feature shape in
//! every orientation.

#![forbid(unsafe_code)]

/// Border matching, placement search and stitching
pub mod algorithm;
/// Pattern scanning and the end-to-end pipeline
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Symmetries, bitmaps, tiles and the placement grid
pub mod spatial;

mod trace;

pub use io::error::{PuzzleError, Result};
