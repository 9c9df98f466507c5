//! Dense boolean rasters with symmetry transforms and border extraction
//!
//! A [`Bitmap`] stores its cells row-major in a bit vector. Every operation that
//! changes geometry (transform, crop) allocates a new bitmap; only [`Bitmap::set`]
//! and [`Bitmap::paste`] mutate in place.

use crate::io::error::{PuzzleError, Result, parse_error};
use crate::spatial::transform::{Edge, Transform};
use bitvec::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Row-major boolean grid of `height` rows and `width` columns
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    cells: BitVec,
    height: usize,
    width: usize,
}

impl Bitmap {
    /// Create a bitmap from row-major cells
    ///
    /// # Errors
    ///
    /// Returns a shape error if either dimension is zero or the number of cells
    /// differs from `height * width`
    pub fn new(height: usize, width: usize, cells: impl IntoIterator<Item = bool>) -> Result<Self> {
        let cells: BitVec = cells.into_iter().collect();
        if height == 0 || width == 0 || cells.len() != height * width {
            return Err(PuzzleError::DataLength {
                height,
                width,
                actual: cells.len(),
            });
        }

        Ok(Self {
            cells,
            height,
            width,
        })
    }

    /// Create a bitmap with every cell off
    ///
    /// Both dimensions must be non-zero; unlike [`Bitmap::new`] this is only
    /// checked in debug builds.
    pub fn blank(height: usize, width: usize) -> Self {
        debug_assert!(
            height > 0 && width > 0,
            "bitmap dimensions must be non-zero"
        );
        Self {
            cells: bitvec![0; height * width],
            height,
            width,
        }
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Dimensions as (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Whether height equals width
    pub const fn is_square(&self) -> bool {
        self.height == self.width
    }

    const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Cell at column `x`, row `y`; cells outside the bitmap read as off
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .and_then(|i| self.cells.get(i).as_deref().copied())
            .unwrap_or(false)
    }

    /// Set the cell at column `x`, row `y`; writes outside the bitmap are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells.set(i, value);
        }
    }

    /// Number of cells that are on
    pub fn count_on(&self) -> usize {
        self.cells.count_ones()
    }

    /// Coordinates `(x, y)` of every on cell in row-major order
    pub fn on_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells.iter_ones().map(move |i| (i % width, i / width))
    }

    /// New bitmap with every pixel moved by `transform`
    ///
    /// Height and width swap when the transform rotates.
    #[must_use]
    pub fn transform(&self, transform: Transform) -> Self {
        if transform == Transform::IDENTITY {
            return self.clone();
        }

        let (height, width) = transform.transformed_dimensions(self.height, self.width);
        let map = transform.apply_to_coordinates(self.height, self.width);
        let mut transformed = Self::blank(height, width);
        for (x, y) in self.on_cells() {
            let (tx, ty) = map(x, y);
            transformed.set(tx, ty, true);
        }
        transformed
    }

    /// Boundary cells along one edge
    ///
    /// Top and bottom read left to right, left and right read top to bottom.
    pub fn border(&self, edge: Edge) -> BitVec {
        let last_row = self.height.saturating_sub(1);
        let last_col = self.width.saturating_sub(1);
        match edge {
            Edge::Top => (0..self.width).map(|x| self.get(x, 0)).collect(),
            Edge::Bottom => (0..self.width).map(|x| self.get(x, last_row)).collect(),
            Edge::Left => (0..self.height).map(|y| self.get(0, y)).collect(),
            Edge::Right => (0..self.height).map(|y| self.get(last_col, y)).collect(),
        }
    }

    /// Copy of a rectangular region with its top-left corner at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns a shape error if the region is empty or leaves the bitmap
    pub fn crop(&self, x: usize, y: usize, height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 || x + width > self.width || y + height > self.height {
            return Err(PuzzleError::RegionOutOfBounds {
                x,
                y,
                region: (height, width),
                bitmap: self.dimensions(),
            });
        }

        let cells = (y..y + height).flat_map(|row| (x..x + width).map(move |col| (col, row)));
        Self::new(height, width, cells.map(|(col, row)| self.get(col, row)))
    }

    /// Copy without the outermost ring of cells
    ///
    /// # Errors
    ///
    /// Returns a shape error if either dimension is below 3
    pub fn interior(&self) -> Result<Self> {
        self.crop(
            1,
            1,
            self.height.saturating_sub(2),
            self.width.saturating_sub(2),
        )
    }

    /// Overwrite the region starting at `(x, y)` with the cells of `other`
    ///
    /// # Errors
    ///
    /// Returns a shape error if `other` does not fit at that position
    pub fn paste(&mut self, other: &Self, x: usize, y: usize) -> Result<()> {
        if x + other.width > self.width || y + other.height > self.height {
            return Err(PuzzleError::RegionOutOfBounds {
                x,
                y,
                region: other.dimensions(),
                bitmap: self.dimensions(),
            });
        }

        for row in 0..other.height {
            for col in 0..other.width {
                self.set(x + col, y + row, other.get(col, row));
            }
        }
        Ok(())
    }
}

impl FromStr for Bitmap {
    type Err = PuzzleError;

    /// Parse rows of `#` (on) and `.` (off); blank lines are skipped
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (number, line) in s.lines().enumerate() {
            let row = line.trim();
            if row.is_empty() {
                continue;
            }
            if width.is_some_and(|w| w != row.chars().count()) {
                return Err(parse_error(number + 1, &"rows differ in length"));
            }
            width = Some(row.chars().count());
            for c in row.chars() {
                cells.push(match c {
                    '#' => true,
                    '.' => false,
                    other => {
                        return Err(parse_error(
                            number + 1,
                            &format!("expected '.' or '#', found '{other}'"),
                        ));
                    }
                });
            }
            height += 1;
        }

        Self::new(height, width.unwrap_or(0), cells)
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                write!(f, "{}", if self.get(x, y) { '#' } else { '.' })?;
            }
        }
        Ok(())
    }
}
