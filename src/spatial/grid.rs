//! Placement of oriented tiles on an unbounded integer grid
//!
//! The [`ArrangedGrid`] keeps two maps, position to placed tile and id to
//! position, and refuses any insertion that would break its invariants: one tile
//! per position, one position per tile, and identical borders between every
//! pair of neighbours. A refused insertion is reported as a [`Conflict`], which
//! callers treat as a rejected candidate rather than a failure.

use crate::io::error::{PuzzleError, Result};
use crate::spatial::bitmap::Bitmap;
use crate::spatial::tiles::TileId;
use crate::spatial::transform::{Edge, Position, Transform};
use ndarray::Array2;
use std::collections::HashMap;
use std::fmt;

/// Tile committed to a grid position under a fixed orientation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedTile {
    /// Tile identifier
    pub id: TileId,
    /// Grid cell occupied by the tile
    pub position: Position,
    /// Orientation relative to the input raster
    pub transform: Transform,
    /// Input raster with `transform` applied
    pub bitmap: Bitmap,
}

/// Reason a placement was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conflict {
    /// The tile already sits somewhere on the grid
    AlreadyPlaced {
        /// Tile identifier
        id: TileId,
    },
    /// Another tile occupies the position
    Occupied {
        /// Requested position
        position: Position,
        /// Tile found there
        occupant: TileId,
    },
    /// A neighbour's touching border differs
    BorderMismatch {
        /// Neighbouring tile
        neighbour: TileId,
        /// Side of the candidate facing the neighbour
        edge: Edge,
    },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPlaced { id } => write!(f, "tile {id} is already placed"),
            Self::Occupied { position, occupant } => {
                write!(f, "position {position} is occupied by tile {occupant}")
            }
            Self::BorderMismatch { neighbour, edge } => {
                write!(f, "{edge} border does not match tile {neighbour}")
            }
        }
    }
}

/// Axis-aligned bounds of the occupied positions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridBounds {
    /// Minimum coordinates (inclusive)
    pub min: Position,
    /// Maximum coordinates (inclusive)
    pub max: Position,
}

impl GridBounds {
    /// Check if a position is within the bounds
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    /// Number of columns spanned
    pub const fn columns(&self) -> usize {
        (self.max.x - self.min.x + 1) as usize
    }

    /// Number of rows spanned
    pub const fn rows(&self) -> usize {
        (self.max.y - self.min.y + 1) as usize
    }

    /// Corner positions: top-left, top-right, bottom-left, bottom-right
    pub const fn corners(&self) -> [Position; 4] {
        [
            Position::new(self.min.x, self.min.y),
            Position::new(self.max.x, self.min.y),
            Position::new(self.min.x, self.max.y),
            Position::new(self.max.x, self.max.y),
        ]
    }
}

/// Consistent arrangement of oriented tiles
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArrangedGrid {
    tiles: HashMap<Position, PlacedTile>,
    ids: HashMap<TileId, Position>,
}

impl ArrangedGrid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placed tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile is placed
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether the tile has been placed
    pub fn contains_id(&self, id: TileId) -> bool {
        self.ids.contains_key(&id)
    }

    /// Whether a tile occupies the position
    pub fn contains_position(&self, position: Position) -> bool {
        self.tiles.contains_key(&position)
    }

    /// Tile at a position
    pub fn get(&self, position: Position) -> Option<&PlacedTile> {
        self.tiles.get(&position)
    }

    /// Placement of a tile by id
    pub fn placed(&self, id: TileId) -> Option<&PlacedTile> {
        self.ids.get(&id).and_then(|position| self.tiles.get(position))
    }

    /// Position of a tile by id
    pub fn position_of(&self, id: TileId) -> Option<Position> {
        self.ids.get(&id).copied()
    }

    /// Orientation of a tile by id
    pub fn transform_of(&self, id: TileId) -> Option<Transform> {
        self.placed(id).map(|tile| tile.transform)
    }

    /// All placed tiles in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &PlacedTile> + '_ {
        self.tiles.values()
    }

    /// Check a placement against every invariant without committing it
    ///
    /// Compares the candidate's borders with all four neighbouring positions, not
    /// only the tile that proposed it.
    ///
    /// # Errors
    ///
    /// Returns the first [`Conflict`] found
    pub fn check(
        &self,
        id: TileId,
        bitmap: &Bitmap,
        position: Position,
    ) -> std::result::Result<(), Conflict> {
        if self.contains_id(id) {
            return Err(Conflict::AlreadyPlaced { id });
        }
        if let Some(occupant) = self.tiles.get(&position) {
            return Err(Conflict::Occupied {
                position,
                occupant: occupant.id,
            });
        }

        for edge in Edge::ALL {
            let Some(neighbour) = self.tiles.get(&position.step(edge)) else {
                continue;
            };
            if bitmap.border(edge) != neighbour.bitmap.border(edge.opposite()) {
                return Err(Conflict::BorderMismatch {
                    neighbour: neighbour.id,
                    edge,
                });
            }
        }

        Ok(())
    }

    /// Commit a placement after checking it
    ///
    /// # Errors
    ///
    /// Returns the [`Conflict`] that prevented the placement; the grid is unchanged
    pub fn insert(&mut self, tile: PlacedTile) -> std::result::Result<(), Conflict> {
        self.check(tile.id, &tile.bitmap, tile.position)?;
        self.ids.insert(tile.id, tile.position);
        self.tiles.insert(tile.position, tile);
        Ok(())
    }

    /// Bounds of the occupied positions, `None` when empty
    pub fn bounds(&self) -> Option<GridBounds> {
        let mut positions = self.tiles.keys();
        let first = *positions.next()?;
        let mut bounds = GridBounds {
            min: first,
            max: first,
        };
        for position in positions {
            bounds.min.x = bounds.min.x.min(position.x);
            bounds.min.y = bounds.min.y.min(position.y);
            bounds.max.x = bounds.max.x.max(position.x);
            bounds.max.y = bounds.max.y.max(position.y);
        }
        Some(bounds)
    }

    /// Side of the square formed by the tiles, if they form a gap-free square
    pub fn square_side(&self) -> Option<usize> {
        let bounds = self.bounds()?;
        let side = bounds.columns();
        // Positions are unique, so a full count inside square bounds leaves no holes
        (bounds.rows() == side && self.len() == side * side).then_some(side)
    }

    /// Side of the square formed by the tiles
    ///
    /// # Errors
    ///
    /// Returns a shape error if the tiles do not form a gap-free square
    pub fn require_square(&self) -> Result<usize> {
        self.square_side().ok_or_else(|| {
            let (columns, rows) = self
                .bounds()
                .map_or((0, 0), |bounds| (bounds.columns(), bounds.rows()));
            PuzzleError::GridNotSquare {
                columns,
                rows,
                tiles: self.len(),
            }
        })
    }

    /// Ids at the extreme corners: top-left, top-right, bottom-left, bottom-right
    ///
    /// Returns `None` when the grid is empty or a corner position is vacant.
    pub fn corner_ids(&self) -> Option<[TileId; 4]> {
        let [a, b, c, d] = self.bounds()?.corners();
        Some([
            self.get(a)?.id,
            self.get(b)?.id,
            self.get(c)?.id,
            self.get(d)?.id,
        ])
    }

    /// Dense id matrix indexed by (row, column) from the top-left corner
    ///
    /// # Errors
    ///
    /// Returns a shape error if the tiles do not form a gap-free square
    pub fn layout(&self) -> Result<Array2<TileId>> {
        let side = self.require_square()?;
        let bounds = self.bounds().ok_or(PuzzleError::EmptyTileSet)?;

        let mut layout = Array2::zeros((side, side));
        for tile in self.tiles.values() {
            let row = (tile.position.y - bounds.min.y) as usize;
            let col = (tile.position.x - bounds.min.x) as usize;
            if let Some(cell) = layout.get_mut([row, col]) {
                *cell = tile.id;
            }
        }
        Ok(layout)
    }
}
