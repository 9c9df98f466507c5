//! Pairwise border matching between tiles
//!
//! A match says that `b`, after applying `transform`, can sit on the `edge` side
//! of an untransformed `a`: the border of `a` along `edge` equals the border of
//! the transformed `b` along the opposite edge, cell for cell.

use crate::spatial::bitmap::Bitmap;
use crate::spatial::transform::{Edge, Transform};

/// One way of attaching a tile to another
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BorderMatch {
    /// Side of the reference tile the other tile attaches to
    pub edge: Edge,
    /// Orientation of the other tile relative to the reference tile
    pub transform: Transform,
}

impl BorderMatch {
    /// Create a match
    pub const fn new(edge: Edge, transform: Transform) -> Self {
        Self { edge, transform }
    }

    /// The same attachment seen from the other tile
    ///
    /// Applying the inverse transform to both tiles brings the other tile back to
    /// its input orientation; the reference tile then lies across the opposite of
    /// the transformed edge.
    #[must_use]
    pub const fn reversed(self) -> Self {
        let inverse = self.transform.inverse();
        Self::new(self.edge.transform(inverse).opposite(), inverse)
    }

    /// Rank in the order [`matches`] yields results: transform index, then edge
    /// clockwise from the top
    pub const fn enumeration_key(self) -> (u8, u8) {
        (self.transform.index(), self.edge as u8)
    }
}

/// Every (edge, transform) under which `b` attaches to `a`
///
/// Results are ordered by transform index, then by edge in clockwise order
/// starting from the top.
pub fn matches(a: &Bitmap, b: &Bitmap) -> Vec<BorderMatch> {
    let borders = Edge::ALL.map(|edge| a.border(edge));
    let mut found = Vec::new();

    for transform in Transform::ALL {
        let transformed = b.transform(transform);
        for (edge, border) in Edge::ALL.iter().zip(&borders) {
            if *border == transformed.border(edge.opposite()) {
                found.push(BorderMatch::new(*edge, transform));
            }
        }
    }

    found
}
