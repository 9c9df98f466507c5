//! Text loaders for tile sets and patterns
//!
//! Tile files hold blocks of a `Tile <id>:` header followed by rows of `#` (on)
//! and `.` (off), separated by blank lines. Pattern files hold rows where `#`
//! is part of the shape and every other character is a wildcard.

use crate::io::configuration::{SEA_MONSTER, TILE_HEADER_PREFIX, TILE_HEADER_SUFFIX};
use crate::io::error::{Result, WithPath, parse_error};
use crate::spatial::bitmap::Bitmap;
use crate::spatial::tiles::{Tile, TileId, TileSet};
use std::path::Path;

/// Tile whose header has been read but whose rows are still arriving
struct PendingTile {
    id: TileId,
    header_line: usize,
    width: Option<usize>,
    rows: usize,
    cells: Vec<bool>,
}

impl PendingTile {
    const fn new(id: TileId, header_line: usize) -> Self {
        Self {
            id,
            header_line,
            width: None,
            rows: 0,
            cells: Vec::new(),
        }
    }

    fn push_row(&mut self, row: &str, line: usize) -> Result<()> {
        let length = row.chars().count();
        if self.width.is_some_and(|width| width != length) {
            return Err(parse_error(
                line,
                &format!("tile {} rows differ in length", self.id),
            ));
        }
        self.width = Some(length);

        for c in row.chars() {
            self.cells.push(match c {
                '#' => true,
                '.' => false,
                other => {
                    return Err(parse_error(
                        line,
                        &format!("expected '.' or '#', found '{other}'"),
                    ));
                }
            });
        }
        self.rows += 1;
        Ok(())
    }

    fn finish(self, set: &mut TileSet) -> Result<()> {
        let Some(width) = self.width else {
            return Err(parse_error(
                self.header_line,
                &format!("tile {} has no rows", self.id),
            ));
        };
        set.add(Tile::new(self.id, Bitmap::new(self.rows, width, self.cells)?))
    }
}

fn parse_header(line: &str, number: usize) -> Result<TileId> {
    line.strip_prefix(TILE_HEADER_PREFIX)
        .and_then(|rest| rest.strip_suffix(TILE_HEADER_SUFFIX))
        .ok_or_else(|| parse_error(number, &"expected a line of form 'Tile 0123:'"))?
        .trim()
        .parse()
        .map_err(|error| parse_error(number, &format!("invalid tile id: {error}")))
}

/// Parse every tile block in `input`
///
/// # Errors
///
/// Returns an error if:
/// - A block does not start with a `Tile <id>:` header
/// - A row contains anything but `#` and `.`, or rows differ in length
/// - A tile is not square, differs in side from the first tile, or repeats an id
pub fn parse_tiles(input: &str) -> Result<TileSet> {
    let mut set = TileSet::new();
    let mut pending: Option<PendingTile> = None;

    for (index, raw) in input.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim();

        if line.is_empty() {
            if let Some(tile) = pending.take() {
                tile.finish(&mut set)?;
            }
            continue;
        }

        let is_header = line.starts_with(TILE_HEADER_PREFIX);
        if let (Some(tile), false) = (pending.as_mut(), is_header) {
            tile.push_row(line, number)?;
            continue;
        }

        if let Some(tile) = pending.take() {
            tile.finish(&mut set)?;
        }
        pending = Some(PendingTile::new(parse_header(line, number)?, number));
    }

    if let Some(tile) = pending {
        tile.finish(&mut set)?;
    }
    Ok(set)
}

/// Parse a pattern, padding short rows with wildcards
///
/// Blank lines before the first and after the last row are ignored.
///
/// # Errors
///
/// Returns an error if the pattern has no rows
pub fn parse_pattern(input: &str) -> Result<Bitmap> {
    let lines: Vec<&str> = input.lines().map(|line| line.trim_end_matches('\r')).collect();
    let first = lines.iter().position(|line| !line.trim().is_empty());
    let last = lines.iter().rposition(|line| !line.trim().is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return Err(parse_error(1, &"pattern has no rows"));
    };

    let rows = lines.get(first..=last).unwrap_or_default();
    let width = rows
        .iter()
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(0);

    let cells = rows.iter().flat_map(|row| {
        row.chars()
            .map(|c| c == '#')
            .chain(std::iter::repeat(false))
            .take(width)
    });
    Bitmap::new(rows.len(), width, cells)
}

/// The built-in sea monster pattern
///
/// # Errors
///
/// Returns an error only if the built-in pattern text is malformed
pub fn default_pattern() -> Result<Bitmap> {
    parse_pattern(SEA_MONSTER)
}

/// Read and parse a tile file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse
pub fn load_tiles(path: &Path) -> Result<TileSet> {
    let text = std::fs::read_to_string(path).with_path(path, "read tiles")?;
    parse_tiles(&text)
}

/// Read and parse a pattern file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse
pub fn load_pattern(path: &Path) -> Result<Bitmap> {
    let text = std::fs::read_to_string(path).with_path(path, "read pattern")?;
    parse_pattern(&text)
}
