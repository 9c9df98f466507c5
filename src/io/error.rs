//! Error types and context for tile assembly and pattern scanning

use crate::spatial::tiles::TileId;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all puzzle operations
///
/// Variants fall into three families: shape errors (dimensions that cannot
/// work), assembly errors (the placement search could not produce a complete
/// square), and input/output errors from the loader and exporter. Conflicting
/// placements during the search are not errors and never appear here.
#[derive(Debug)]
pub enum PuzzleError {
    /// Raster data does not fill the declared dimensions
    DataLength {
        /// Declared number of rows
        height: usize,
        /// Declared number of columns
        width: usize,
        /// Number of cells supplied
        actual: usize,
    },

    /// Tile raster is not a square of the side shared by the whole set
    TileShape {
        /// Offending tile
        id: TileId,
        /// Side every tile must have
        expected: usize,
        /// Rows of the offending tile
        height: usize,
        /// Columns of the offending tile
        width: usize,
    },

    /// Requested region does not lie inside the bitmap
    RegionOutOfBounds {
        /// Left column of the region
        x: usize,
        /// Top row of the region
        y: usize,
        /// Region dimensions (rows, cols)
        region: (usize, usize),
        /// Bitmap dimensions (rows, cols)
        bitmap: (usize, usize),
    },

    /// Tiles are too small to keep anything after removing their border
    TileTooSmall {
        /// Tile side
        side: usize,
    },

    /// Placed tiles do not cover a gap-free square
    GridNotSquare {
        /// Columns spanned by the placed tiles
        columns: usize,
        /// Rows spanned by the placed tiles
        rows: usize,
        /// Number of placed tiles
        tiles: usize,
    },

    /// Pattern cannot fit inside the image it is searched in
    PatternTooLarge {
        /// Pattern dimensions (rows, cols)
        pattern: (usize, usize),
        /// Image dimensions (rows, cols)
        image: (usize, usize),
    },

    /// Two tiles share one id
    DuplicateTile {
        /// Repeated id
        id: TileId,
    },

    /// A tile id was requested that is not part of the set
    UnknownTile {
        /// Missing id
        id: TileId,
    },

    /// Assembly was requested for a set without tiles
    EmptyTileSet,

    /// Placement search ran out of frontier tiles before placing every tile
    ///
    /// Occurs when at least one tile has no border matching any placed tile:
    /// - The input contains a tile from another puzzle
    /// - The input is under-constrained
    FrontierExhausted {
        /// Tiles placed before the search stopped
        placed: usize,
        /// Tiles in the input
        total: usize,
        /// Ids left unplaced, in input order
        unplaced: Vec<TileId>,
    },

    /// Number of placed tiles cannot be arranged into a square
    UnsquarableCount {
        /// Number of placed tiles
        placed: usize,
    },

    /// Textual input could not be read
    Parse {
        /// 1-based line number
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save the assembled image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl PuzzleError {
    /// Whether the error comes from dimensions that cannot work
    pub const fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::DataLength { .. }
                | Self::TileShape { .. }
                | Self::RegionOutOfBounds { .. }
                | Self::TileTooSmall { .. }
                | Self::GridNotSquare { .. }
                | Self::PatternTooLarge { .. }
        )
    }

    /// Whether the error comes from a placement search that could not finish
    pub const fn is_assembly_error(&self) -> bool {
        matches!(
            self,
            Self::FrontierExhausted { .. } | Self::UnsquarableCount { .. }
        )
    }
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataLength {
                height,
                width,
                actual,
            } => {
                write!(
                    f,
                    "Expected {height} * {width} = {} cells, got {actual}",
                    height * width
                )
            }
            Self::TileShape {
                id,
                expected,
                height,
                width,
            } => {
                write!(
                    f,
                    "Tile {id} is {height}x{width}, expected {expected}x{expected}"
                )
            }
            Self::RegionOutOfBounds {
                x,
                y,
                region,
                bitmap,
            } => {
                write!(
                    f,
                    "Region {}x{} at ({x}, {y}) exceeds bitmap of size {}x{}",
                    region.0, region.1, bitmap.0, bitmap.1
                )
            }
            Self::TileTooSmall { side } => {
                write!(f, "Tiles of side {side} have no interior to stitch")
            }
            Self::GridNotSquare {
                columns,
                rows,
                tiles,
            } => {
                write!(
                    f,
                    "Expected a square of tiles, found {tiles} tiles spanning {columns}x{rows}"
                )
            }
            Self::PatternTooLarge { pattern, image } => {
                write!(
                    f,
                    "Pattern of size {}x{} exceeds image of size {}x{}",
                    pattern.0, pattern.1, image.0, image.1
                )
            }
            Self::DuplicateTile { id } => write!(f, "Tile {id} appears more than once"),
            Self::UnknownTile { id } => write!(f, "Tile {id} is not part of the tile set"),
            Self::EmptyTileSet => write!(f, "Tile set is empty"),
            Self::FrontierExhausted {
                placed,
                total,
                unplaced,
            } => {
                write!(
                    f,
                    "Placed {placed} of {total} tiles before running out of matches \
                     (unplaced: {unplaced:?})"
                )
            }
            Self::UnsquarableCount { placed } => {
                write!(f, "{placed} tiles cannot be arranged into a square")
            }
            Self::Parse { line, reason } => write!(f, "Parse error on line {line}: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

impl From<image::ImageError> for PuzzleError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> PuzzleError {
    PuzzleError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a parse error for a 1-based line number
pub fn parse_error(line: usize, reason: &impl ToString) -> PuzzleError {
    PuzzleError::Parse {
        line,
        reason: reason.to_string(),
    }
}

/// Attach a path and operation to file system errors
///
/// Errors of other kinds pass through unchanged.
pub trait WithPath<T> {
    /// Add the path involved in a failed operation
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<PuzzleError>,
{
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.map_err(|e| match e.into() {
            PuzzleError::FileSystem { source, .. } => PuzzleError::FileSystem {
                path: path.into(),
                operation,
                source,
            },
            PuzzleError::ImageExport { source, .. } => PuzzleError::ImageExport {
                path: path.into(),
                source,
            },
            other => other,
        })
    }
}
