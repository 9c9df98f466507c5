//! Multi-orientation search for a feature shape inside an image
//!
//! A pattern occurs at an offset when every on cell of the oriented pattern
//! lands on an on cell of the image. Off cells of the pattern are wildcards.
//! Orientations that produce the same bitmap (symmetric patterns) are searched
//! once, so a symmetric feature is not counted several times at one place.

use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::spatial::bitmap::Bitmap;
use crate::spatial::transform::Transform;
use crate::trace::{trace_event, trace_span};

/// A pattern found in the image
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatternOccurrence {
    /// Column of the top-left corner of the oriented pattern
    pub x: usize,
    /// Row of the top-left corner of the oriented pattern
    pub y: usize,
    /// Orientation applied to the pattern
    pub transform: Transform,
}

/// Result of scanning one image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Every occurrence, ordered by orientation then row-major offset
    pub occurrences: Vec<PatternOccurrence>,
    /// Cells covered by at least one occurrence
    pub marked: Bitmap,
    /// Copy of the image with every marked cell turned off
    pub masked: Bitmap,
}

impl ScanOutcome {
    /// Number of occurrences found
    pub fn occurrence_count(&self) -> usize {
        self.occurrences.len()
    }

    /// On cells of the image that belong to no occurrence
    pub fn roughness(&self) -> usize {
        self.masked.count_on()
    }
}

#[derive(Clone, Debug)]
struct Orientation {
    transform: Transform,
    height: usize,
    width: usize,
    cells: Vec<(usize, usize)>,
}

/// Pattern prepared in each of its distinct orientations
#[derive(Clone, Debug)]
pub struct PatternScanner {
    dimensions: (usize, usize),
    orientations: Vec<Orientation>,
}

impl PatternScanner {
    /// Prepare a pattern for scanning
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern has no on cells, since it would match
    /// everywhere
    pub fn new(pattern: &Bitmap) -> Result<Self> {
        if pattern.count_on() == 0 {
            return Err(invalid_parameter(
                "pattern",
                &pattern.to_string(),
                &"pattern has no on cells",
            ));
        }

        let mut seen: Vec<Bitmap> = Vec::with_capacity(Transform::ALL.len());
        let mut orientations = Vec::new();
        for transform in Transform::ALL {
            let oriented = pattern.transform(transform);
            if seen.contains(&oriented) {
                continue;
            }
            orientations.push(Orientation {
                transform,
                height: oriented.height(),
                width: oriented.width(),
                cells: oriented.on_cells().collect(),
            });
            seen.push(oriented);
        }

        Ok(Self {
            dimensions: pattern.dimensions(),
            orientations,
        })
    }

    /// Number of distinct orientations searched
    pub fn orientation_count(&self) -> usize {
        self.orientations.len()
    }

    /// Find every occurrence of the pattern in `image` and mask it out
    ///
    /// Overlapping occurrences share marked cells. Orientations that do not fit
    /// the image (a rotated pattern in a narrow image) are skipped.
    ///
    /// # Errors
    ///
    /// Returns a shape error if the pattern in its input orientation is larger
    /// than the image in either dimension
    pub fn scan(&self, image: &Bitmap) -> Result<ScanOutcome> {
        let (height, width) = image.dimensions();
        if self.dimensions.0 > height || self.dimensions.1 > width {
            return Err(PuzzleError::PatternTooLarge {
                pattern: self.dimensions,
                image: image.dimensions(),
            });
        }
        let _span = trace_span!("scan", orientations = self.orientations.len()).entered();

        let mut occurrences = Vec::new();
        let mut marked = Bitmap::blank(height, width);
        for orientation in &self.orientations {
            if orientation.height > height || orientation.width > width {
                continue;
            }

            for y in 0..=height - orientation.height {
                for x in 0..=width - orientation.width {
                    let present = orientation
                        .cells
                        .iter()
                        .all(|&(cx, cy)| image.get(x + cx, y + cy));
                    if !present {
                        continue;
                    }

                    occurrences.push(PatternOccurrence {
                        x,
                        y,
                        transform: orientation.transform,
                    });
                    for &(cx, cy) in &orientation.cells {
                        marked.set(x + cx, y + cy, true);
                    }
                }
            }
        }

        let mut masked = image.clone();
        for (x, y) in marked.on_cells() {
            masked.set(x, y, false);
        }

        trace_event!(
            "scan_finished",
            occurrences = occurrences.len(),
            marked = marked.count_on()
        );
        Ok(ScanOutcome {
            occurrences,
            marked,
            masked,
        })
    }
}

/// Scan `image` for `pattern` in every orientation
///
/// # Errors
///
/// Returns an error if the pattern is empty or larger than the image
pub fn scan(image: &Bitmap, pattern: &Bitmap) -> Result<ScanOutcome> {
    PatternScanner::new(pattern)?.scan(image)
}
