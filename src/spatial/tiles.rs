//! Identified square tiles and the validated set they are assembled from

use crate::io::error::{PuzzleError, Result};
use crate::spatial::bitmap::Bitmap;
use crate::spatial::transform::Transform;
use std::collections::HashMap;

/// Identifier printed in a tile header
pub type TileId = u64;

/// A square bitmap with an id and unknown orientation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    bitmap: Bitmap,
}

impl Tile {
    /// Create a tile from its id and raster
    pub const fn new(id: TileId, bitmap: Bitmap) -> Self {
        Self { id, bitmap }
    }

    /// Tile identifier
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Raster as given in the input
    pub const fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Raster after applying `transform`
    pub fn oriented(&self, transform: Transform) -> Bitmap {
        self.bitmap.transform(transform)
    }
}

/// Ordered tiles sharing one square side, with unique ids
///
/// Input order is preserved; it decides the default starting tile and the order
/// in which candidates are tried during assembly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileSet {
    tiles: Vec<Tile>,
    positions: HashMap<TileId, usize>,
    side: usize,
}

impl TileSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from tiles, validating each one
    ///
    /// # Errors
    ///
    /// Returns an error if any tile fails [`TileSet::add`]
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Result<Self> {
        let mut set = Self::new();
        for tile in tiles {
            set.add(tile)?;
        }
        Ok(set)
    }

    /// Append a tile
    ///
    /// The first tile fixes the side every later tile must have.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile is not square or its side differs from the set's side
    /// - The id is already present
    pub fn add(&mut self, tile: Tile) -> Result<()> {
        let (height, width) = tile.bitmap.dimensions();
        let expected = if self.tiles.is_empty() {
            height
        } else {
            self.side
        };
        if height != expected || width != expected {
            return Err(PuzzleError::TileShape {
                id: tile.id,
                expected,
                height,
                width,
            });
        }
        if self.positions.contains_key(&tile.id) {
            return Err(PuzzleError::DuplicateTile { id: tile.id });
        }

        self.positions.insert(tile.id, self.tiles.len());
        self.side = expected;
        self.tiles.push(tile);
        Ok(())
    }

    /// Side length shared by every tile, 0 when empty
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the set has no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether a tile with this id is present
    pub fn contains(&self, id: TileId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Look up a tile by id
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.positions.get(&id).and_then(|&i| self.tiles.get(i))
    }

    /// Tiles in input order
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Ids in input order
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().map(Tile::id)
    }
}

impl<'a> IntoIterator for &'a TileSet {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
