//! Spatial data structures and their symmetries
//!
//! This module contains spatial-related functionality including:
//! - The symmetry group of the square acting on coordinates and edges
//! - Boolean rasters with transforms and border extraction
//! - Identified tiles and validated tile sets
//! - The grid of placed, oriented tiles

/// Boolean rasters with transforms and border extraction
pub mod bitmap;
/// Grid of placed tiles with conflict-checked insertion
pub mod grid;
/// Identified square tiles and tile sets
pub mod tiles;
/// Symmetries of the square, edges and grid positions
pub mod transform;

pub use bitmap::Bitmap;
pub use grid::ArrangedGrid;
pub use tiles::{Tile, TileId, TileSet};
pub use transform::{Edge, Position, Transform};
