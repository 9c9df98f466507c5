//! Frontier-driven placement of tiles into a consistent square grid
//!
//! The first tile is fixed at the origin in its input orientation. Placed tiles
//! are expanded in FIFO order: every unplaced tile that matches a border of the
//! expanded tile is oriented and positioned relative to it, then validated
//! against all of its future neighbours before being committed. Rejected
//! candidates are skipped and the search continues, so no placement is ever
//! overwritten or revisited.

use crate::algorithm::cache::{CacheStats, MatchCache};
use crate::io::error::{PuzzleError, Result, computation_error};
use crate::spatial::grid::{ArrangedGrid, PlacedTile};
use crate::spatial::tiles::{TileId, TileSet};
use crate::spatial::transform::{Position, Transform};
use crate::trace::{trace_event, trace_span};
use std::collections::VecDeque;

/// Counters describing one assembly run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Tiles committed to the grid, the starting tile included
    pub placed: usize,
    /// Candidates refused because of a conflict
    pub rejected: usize,
    /// Tiles taken from the frontier and searched for neighbours
    pub expanded: usize,
}

/// Placement search over one tile set
///
/// Owns the match cache for the run, so separate assemblers never share results.
pub struct Assembler<'a> {
    tiles: &'a TileSet,
    cache: MatchCache,
    start: Option<TileId>,
    stats: AssemblyStats,
}

impl<'a> Assembler<'a> {
    /// Create an assembler starting from the first tile of the set
    pub fn new(tiles: &'a TileSet) -> Self {
        Self {
            tiles,
            cache: MatchCache::new(),
            start: None,
            stats: AssemblyStats::default(),
        }
    }

    /// Fix the tile placed at the origin
    #[must_use]
    pub fn starting_from(mut self, id: TileId) -> Self {
        self.start = Some(id);
        self
    }

    /// Counters of the most recent run
    pub const fn stats(&self) -> AssemblyStats {
        self.stats
    }

    /// Hit and miss counts of the match cache
    pub const fn cache_stats(&self) -> CacheStats {
        self.cache.stats
    }

    /// Arrange every tile into a square grid
    ///
    /// # Errors
    ///
    /// See [`Assembler::assemble_with_progress`]
    pub fn assemble(&mut self) -> Result<ArrangedGrid> {
        self.assemble_with_progress(|_, _| {})
    }

    /// Arrange every tile, reporting `(placed, total)` after each placement
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The set is empty or the starting tile is not part of it
    /// - The frontier empties before every tile is placed
    /// - The number of tiles is not a perfect square
    /// - The placed tiles do not cover a gap-free square
    pub fn assemble_with_progress<F>(&mut self, mut progress: F) -> Result<ArrangedGrid>
    where
        F: FnMut(usize, usize),
    {
        let tiles = self.tiles;
        let total = tiles.len();
        let _span = trace_span!("assemble", tiles = tiles.len()).entered();
        self.stats = AssemblyStats::default();

        let first = match self.start {
            Some(id) => tiles.get(id).ok_or(PuzzleError::UnknownTile { id })?,
            None => tiles.iter().next().ok_or(PuzzleError::EmptyTileSet)?,
        };

        let mut grid = ArrangedGrid::new();
        grid.insert(PlacedTile {
            id: first.id(),
            position: Position::default(),
            transform: Transform::IDENTITY,
            bitmap: first.bitmap().clone(),
        })
        .map_err(|conflict| computation_error("assemble", &conflict))?;
        self.stats.placed += 1;
        progress(grid.len(), total);

        let mut frontier = VecDeque::from([first.id()]);
        while let Some(current_id) = frontier.pop_front() {
            let (Some(current), Some(raw)) = (grid.placed(current_id), tiles.get(current_id))
            else {
                continue;
            };
            let (origin, orientation) = (current.position, current.transform);
            self.stats.expanded += 1;

            for other in tiles {
                if other.id() == current_id || grid.contains_id(other.id()) {
                    continue;
                }

                let candidates = self
                    .cache
                    .matches_for((current_id, raw.bitmap()), (other.id(), other.bitmap()));
                for candidate in candidates {
                    // Relative orientation first, then the orientation of the expanded tile
                    let transform = orientation.compose(candidate.transform);
                    let position = origin.step(candidate.edge.transform(orientation));

                    let placement = PlacedTile {
                        id: other.id(),
                        position,
                        transform,
                        bitmap: other.oriented(transform),
                    };
                    if grid.insert(placement).is_ok() {
                        self.stats.placed += 1;
                        trace_event!(
                            "tile_placed",
                            id = other.id(),
                            x = position.x,
                            y = position.y,
                            transform = transform.index()
                        );
                        progress(grid.len(), total);
                        frontier.push_back(other.id());
                        break;
                    }

                    self.stats.rejected += 1;
                    trace_event!(
                        "candidate_rejected",
                        id = other.id(),
                        x = position.x,
                        y = position.y
                    );
                }
            }
        }

        trace_event!(
            "assembly_finished",
            placed = grid.len(),
            rejected = self.stats.rejected,
            cache_hits = self.cache.stats.hits,
            cache_misses = self.cache.stats.misses
        );

        if grid.len() != total {
            return Err(PuzzleError::FrontierExhausted {
                placed: grid.len(),
                total,
                unplaced: tiles.ids().filter(|id| !grid.contains_id(*id)).collect(),
            });
        }
        let side = total.isqrt();
        if side * side != total {
            return Err(PuzzleError::UnsquarableCount { placed: total });
        }
        grid.require_square()?;

        Ok(grid)
    }
}
