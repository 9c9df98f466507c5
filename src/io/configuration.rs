//! Input format constants and runtime configuration defaults

// Tile file format
/// Prefix of the line introducing each tile
pub const TILE_HEADER_PREFIX: &str = "Tile ";
/// Suffix of the line introducing each tile
pub const TILE_HEADER_SUFFIX: &str = ":";
/// Extension of tile files picked up when the target is a directory
pub const INPUT_EXTENSION: &str = "txt";

/// Side of the tiles in the classic puzzle input
pub const DEFAULT_TILE_SIDE: usize = 10;

/// Feature searched for when no pattern file is given
///
/// Rows keep their trailing spaces; only `#` cells are part of the shape.
pub const SEA_MONSTER: &str = concat!(
    "                  # \n",
    "#    ##    ##    ###\n",
    " #  #  #  #  #  #   \n",
);

// Puzzle generation
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Border redraws allowed before generation gives up
pub const MAX_GENERATION_ATTEMPTS: usize = 10_000;
/// Ids of generated tiles are drawn from this range
pub const GENERATED_ID_RANGE: std::ops::Range<u64> = 1000..10_000;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to exported image filenames
pub const OUTPUT_SUFFIX: &str = "_image";
/// Colour of on cells in exported images
pub const ON_COLOUR: [u8; 4] = [32, 96, 160, 255];
/// Colour of off cells in exported images
pub const OFF_COLOUR: [u8; 4] = [230, 236, 242, 255];
/// Colour of cells covered by a pattern occurrence in exported images
pub const PATTERN_COLOUR: [u8; 4] = [220, 60, 40, 255];
/// Pixels per cell in exported images
pub const EXPORT_SCALE: u32 = 4;
