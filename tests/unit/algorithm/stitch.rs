//! Tests for joining tile interiors into one image

#[cfg(test)]
mod tests {
    use crate::{HAND_BUILT_IMAGE, bitmap, hand_built_tile, hand_built_tiles, scrambled};
    use tilestitch::PuzzleError;
    use tilestitch::algorithm::assembler::Assembler;
    use tilestitch::algorithm::stitch::stitch;
    use tilestitch::spatial::bitmap::Bitmap;
    use tilestitch::spatial::grid::{ArrangedGrid, PlacedTile};
    use tilestitch::spatial::tiles::{Tile, TileSet};
    use tilestitch::spatial::transform::{Position, Transform};

    // Tests the stitched hand-built image cell for cell
    // Verified by keeping the first border row of every tile
    #[test]
    fn test_hand_built_image() {
        let tiles = hand_built_tiles();
        let grid = Assembler::new(&tiles).assemble().expect("puzzle is solvable");
        let image = stitch(&grid, tiles.side()).expect("square grid");

        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(image, bitmap(&HAND_BUILT_IMAGE));
    }

    // Tests that a rotated starting tile rotates the whole image
    // Verified by pasting blocks at (row, column) instead of (column, row)
    #[test]
    fn test_image_follows_starting_orientation() {
        let rotated = hand_built_tile(1);
        let tiles = TileSet::from_tiles([
            hand_built_tile(0),
            Tile::new(rotated.id(), rotated.oriented(Transform::ROTATE)),
            hand_built_tile(2),
            hand_built_tile(3),
        ])
        .expect("valid set");
        let grid = Assembler::new(&tiles)
            .starting_from(2311)
            .assemble()
            .expect("puzzle is solvable");

        let image = stitch(&grid, tiles.side()).expect("square grid");
        assert_eq!(image, bitmap(&HAND_BUILT_IMAGE).transform(Transform::ROTATE));
    }

    // Tests the image side for a generated 3x3 puzzle
    // Verified by using the full tile side per block
    #[test]
    fn test_generated_image_side() {
        let puzzle = scrambled(5, None, 0);
        let grid = Assembler::new(&puzzle.tiles)
            .assemble()
            .expect("generated puzzles are solvable");
        let image = stitch(&grid, 10).expect("square grid");

        assert_eq!(image.dimensions(), (24, 24));
        assert!(
            Transform::ALL
                .iter()
                .any(|&transform| puzzle.solution.transform(transform) == image)
        );
    }

    // Tests the minimum tile side and the one-cell interior it leaves
    // Verified by allowing two-sided tiles through
    #[test]
    fn test_tile_side_limits() {
        let mut grid = ArrangedGrid::new();
        let cells = bitmap(&["...", ".#.", "..."]);
        grid.insert(PlacedTile {
            id: 1,
            position: Position::default(),
            transform: Transform::IDENTITY,
            bitmap: cells,
        })
        .expect("empty grid accepts");

        assert!(matches!(
            stitch(&grid, 2),
            Err(PuzzleError::TileTooSmall { side: 2 })
        ));
        assert_eq!(stitch(&grid, 3).expect("3x3 tile"), bitmap(&["#"]));
        assert!(matches!(
            stitch(&grid, 4),
            Err(PuzzleError::TileShape { id: 1, .. })
        ));
    }

    // Tests that grids with holes cannot be stitched
    // Verified by stitching only the occupied positions
    #[test]
    fn test_incomplete_grid_is_refused() {
        let mut grid = ArrangedGrid::new();
        for (id, x) in [(1, 0), (2, 1)] {
            grid.insert(PlacedTile {
                id,
                position: Position::new(x, 0),
                transform: Transform::IDENTITY,
                bitmap: Bitmap::blank(3, 3),
            })
            .expect("blanks always match");
        }

        let result = stitch(&grid, 3);
        assert!(result.is_err_and(|error| error.is_shape_error()));
    }
}
