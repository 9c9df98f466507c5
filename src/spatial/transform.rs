//! Symmetries of the square and their action on coordinates, edges and grid steps
//!
//! A [`Transform`] combines three primitive operations that are always applied in
//! the same order: reflect horizontally (mirror the x axis), reflect vertically
//! (mirror the y axis), then rotate 90° clockwise. The eight combinations form the
//! dihedral group of order 8, which is not abelian: a reflection applied after a
//! rotation acts on the other axis.

use std::fmt;
use std::ops::Add;

/// One of the eight symmetries of a square
///
/// Stored as three independent flags. The flags describe the canonical
/// decomposition (horizontal reflection, vertical reflection, rotation), so two
/// transforms are equal exactly when they move every pixel to the same place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Transform {
    horizontal: bool,
    vertical: bool,
    rotate: bool,
}

impl Transform {
    /// Leaves every pixel in place
    pub const IDENTITY: Self = Self::new(false, false, false);
    /// Mirror along the x axis
    pub const REFLECT_HORIZONTAL: Self = Self::new(true, false, false);
    /// Mirror along the y axis
    pub const REFLECT_VERTICAL: Self = Self::new(false, true, false);
    /// Quarter turn clockwise
    pub const ROTATE: Self = Self::new(false, false, true);

    /// Every element of the group, ordered by [`Transform::index`]
    pub const ALL: [Self; 8] = [
        Self::from_index(0),
        Self::from_index(1),
        Self::from_index(2),
        Self::from_index(3),
        Self::from_index(4),
        Self::from_index(5),
        Self::from_index(6),
        Self::from_index(7),
    ];

    /// Build a transform from its three primitive flags
    pub const fn new(horizontal: bool, vertical: bool, rotate: bool) -> Self {
        Self {
            horizontal,
            vertical,
            rotate,
        }
    }

    /// Build a transform from a bit index (bit 0 horizontal, bit 1 vertical, bit 2 rotate)
    ///
    /// Only the lowest three bits are read.
    pub const fn from_index(index: u8) -> Self {
        Self::new(index & 1 != 0, index & 2 != 0, index & 4 != 0)
    }

    /// Bit index of this transform, inverse of [`Transform::from_index`]
    pub const fn index(self) -> u8 {
        (self.horizontal as u8) | ((self.vertical as u8) << 1) | ((self.rotate as u8) << 2)
    }

    /// Whether the x axis is mirrored before rotating
    pub const fn reflects_horizontally(self) -> bool {
        self.horizontal
    }

    /// Whether the y axis is mirrored before rotating
    pub const fn reflects_vertically(self) -> bool {
        self.vertical
    }

    /// Whether a quarter turn is applied, which swaps height and width
    pub const fn rotates(self) -> bool {
        self.rotate
    }

    /// The transform equivalent to applying `self` and then `next`
    ///
    /// Derived from the relations between the primitives: a horizontal reflection
    /// after a rotation equals the rotation after a vertical reflection (and the
    /// other way around), and two rotations equal both reflections.
    #[must_use]
    pub const fn then(self, next: Self) -> Self {
        if !self.rotate {
            return Self::new(
                self.horizontal ^ next.horizontal,
                self.vertical ^ next.vertical,
                next.rotate,
            );
        }

        // Reflections following a rotation swap axes when moved in front of it
        let horizontal = self.horizontal ^ next.vertical;
        let vertical = self.vertical ^ next.horizontal;
        if next.rotate {
            Self::new(!horizontal, !vertical, false)
        } else {
            Self::new(horizontal, vertical, true)
        }
    }

    /// Compose two transforms: apply `inner` first, then `self`
    #[must_use]
    pub const fn compose(self, inner: Self) -> Self {
        inner.then(self)
    }

    /// The transform that undoes this one
    #[must_use]
    pub const fn inverse(self) -> Self {
        if self.rotate {
            Self::new(!self.vertical, !self.horizontal, true)
        } else {
            self
        }
    }

    /// Dimensions `(height, width)` of a raster after applying this transform
    pub const fn transformed_dimensions(self, height: usize, width: usize) -> (usize, usize) {
        if self.rotate {
            (width, height)
        } else {
            (height, width)
        }
    }

    /// Coordinate map for a raster of the given dimensions
    ///
    /// The returned closure takes `(x, y)` in the source raster and gives the
    /// position of the same pixel in the transformed raster. Coordinates must lie
    /// inside the source raster.
    pub fn apply_to_coordinates(
        self,
        height: usize,
        width: usize,
    ) -> impl Fn(usize, usize) -> (usize, usize) {
        let max_x = width.saturating_sub(1);
        let max_y = height.saturating_sub(1);

        move |x, y| {
            let x = if self.horizontal {
                max_x.saturating_sub(x)
            } else {
                x
            };
            let y = if self.vertical {
                max_y.saturating_sub(y)
            } else {
                y
            };
            if self.rotate {
                (max_y.saturating_sub(y), x)
            } else {
                (x, y)
            }
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::IDENTITY {
            return write!(f, "id");
        }
        if self.horizontal {
            write!(f, "h")?;
        }
        if self.vertical {
            write!(f, "v")?;
        }
        if self.rotate {
            write!(f, "r")?;
        }
        Ok(())
    }
}

/// One side of a rectangular raster
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// First row
    Top,
    /// Last column
    Right,
    /// Last row
    Bottom,
    /// First column
    Left,
}

impl Edge {
    /// All edges in clockwise order starting from the top
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The edge on the other side of the raster
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    const fn clockwise(self) -> Self {
        match self {
            Self::Top => Self::Right,
            Self::Right => Self::Bottom,
            Self::Bottom => Self::Left,
            Self::Left => Self::Top,
        }
    }

    /// The side this edge occupies once the raster has been transformed
    #[must_use]
    pub const fn transform(self, transform: Transform) -> Self {
        let mut edge = self;
        if transform.horizontal {
            edge = match edge {
                Self::Left | Self::Right => edge.opposite(),
                Self::Top | Self::Bottom => edge,
            };
        }
        if transform.vertical {
            edge = match edge {
                Self::Top | Self::Bottom => edge.opposite(),
                Self::Left | Self::Right => edge,
            };
        }
        if transform.rotate {
            edge = edge.clockwise();
        }
        edge
    }

    /// Unit grid step towards this side
    pub const fn offset(self) -> Position {
        match self {
            Self::Top => Position::new(0, -1),
            Self::Right => Position::new(1, 0),
            Self::Bottom => Position::new(0, 1),
            Self::Left => Position::new(-1, 0),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        };
        write!(f, "{name}")
    }
}

/// Cell of the tile grid; `y` grows downwards
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Position {
    /// Create a position from column and row
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position across `edge`
    #[must_use]
    pub const fn step(self, edge: Edge) -> Self {
        let offset = edge.offset();
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
