//! Tests for the end-to-end pipeline and the corner product

#[cfg(test)]
mod tests {
    use crate::{HAND_BUILT_IDS, HAND_BUILT_IMAGE, bitmap, hand_built_tiles, scrambled};
    use tilestitch::PuzzleError;
    use tilestitch::analysis::report::{corner_product, solve, solve_with_progress};
    use tilestitch::spatial::bitmap::Bitmap;
    use tilestitch::spatial::grid::{ArrangedGrid, PlacedTile};
    use tilestitch::spatial::transform::{Position, Transform};

    fn cross() -> Bitmap {
        bitmap(&[".#.", "###", ".#."])
    }

    // Tests every summary value of the hand-built puzzle
    // Verified by multiplying only the top corners
    #[test]
    fn test_hand_built_report() {
        let report = solve(&hand_built_tiles(), &cross(), None).expect("puzzle is solvable");

        assert_eq!(report.corner_product, 1951 * 2311 * 3079 * 2729);
        assert_eq!(report.corner_product, 37_885_274_599_751);
        assert_eq!(report.image, bitmap(&HAND_BUILT_IMAGE));
        assert_eq!(report.occurrence_count(), 4);
        assert_eq!(report.roughness(), 20);
        assert_eq!(report.assembly.placed, 4);
    }

    // Tests that the summary values do not depend on the starting tile
    // Verified by scanning only the unrotated pattern
    #[test]
    fn test_summary_independent_of_start() {
        let tiles = hand_built_tiles();
        for start in HAND_BUILT_IDS {
            let report = solve(&tiles, &cross(), Some(start)).expect("puzzle is solvable");
            assert_eq!(report.corner_product, 37_885_274_599_751, "start {start}");
            assert_eq!(report.occurrence_count(), 4, "start {start}");
            assert_eq!(report.roughness(), 20, "start {start}");
        }
    }

    // Tests that planted copies in a generated puzzle are all found
    // Verified by swapping row and column when mapping planted cells
    #[test]
    fn test_generated_puzzle_finds_planted_copies() {
        let puzzle = scrambled(3, Some(cross()), 4);
        assert_eq!(puzzle.planted.len(), 4);

        let start = puzzle.tiles.ids().last();
        let report = solve(&puzzle.tiles, &cross(), start).expect("generated puzzles are solvable");
        assert_eq!(report.occurrence_count(), 4);
        assert_eq!(report.roughness(), 0);
        assert_eq!(report.scan.marked.count_on(), 20);
    }

    // Tests that progress from the pipeline ends at the full tile count
    // Verified by dropping the progress callback in solve_with_progress
    #[test]
    fn test_progress_forwarded() {
        let mut last = (0, 0);
        solve_with_progress(&hand_built_tiles(), &cross(), None, |placed, total| {
            last = (placed, total);
        })
        .expect("puzzle is solvable");

        assert_eq!(last, (4, 4));
    }

    // Tests that an empty pattern fails before any assembly work
    // Verified by assembling before preparing the scanner
    #[test]
    fn test_empty_pattern_is_refused() {
        let result = solve(&hand_built_tiles(), &Bitmap::blank(3, 3), None);
        assert!(matches!(result, Err(PuzzleError::InvalidParameter { .. })));
    }

    // Tests overflow detection in the corner product
    // Verified by using wrapping multiplication
    #[test]
    fn test_corner_product_overflow() {
        let mut grid = ArrangedGrid::new();
        for (offset, (x, y)) in (0..).zip([(0, 0), (1, 0), (0, 1), (1, 1)]) {
            grid.insert(PlacedTile {
                id: (1 << 16) + offset,
                position: Position::new(x, y),
                transform: Transform::IDENTITY,
                bitmap: Bitmap::blank(3, 3),
            })
            .expect("blanks always match");
        }

        assert!(matches!(
            corner_product(&grid),
            Err(PuzzleError::Computation {
                operation: "corner_product",
                ..
            })
        ));
    }

    // Tests the corner product of a single tile and of an incomplete grid
    // Verified by returning 1 for grids that are not square
    #[test]
    fn test_corner_product_edge_cases() {
        let mut grid = ArrangedGrid::new();
        grid.insert(PlacedTile {
            id: 7,
            position: Position::default(),
            transform: Transform::IDENTITY,
            bitmap: Bitmap::blank(3, 3),
        })
        .expect("empty grid accepts");
        assert_eq!(corner_product(&grid).expect("1x1 grid"), 7 * 7 * 7 * 7);

        grid.insert(PlacedTile {
            id: 8,
            position: Position::new(1, 0),
            transform: Transform::IDENTITY,
            bitmap: Bitmap::blank(3, 3),
        })
        .expect("blanks always match");
        assert!(corner_product(&grid).is_err_and(|error| error.is_shape_error()));
    }
}
