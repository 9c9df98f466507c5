//! Tests for seeded puzzle generation

#[cfg(test)]
mod tests {
    use crate::{bitmap, scrambled};
    use std::collections::HashSet;
    use tilestitch::PuzzleError;
    use tilestitch::algorithm::matcher::matches;
    use tilestitch::analysis::scanner::scan;
    use tilestitch::io::configuration::GENERATED_ID_RANGE;
    use tilestitch::io::scramble::{ScrambleConfig, scramble};
    use tilestitch::spatial::tiles::{Tile, TileId};

    // Tests the generated sizes, ids and layout
    // Verified by cutting windows with the full tile side as the step
    #[test]
    fn test_generated_shape() {
        let puzzle = scrambled(1, None, 0);

        assert_eq!(puzzle.tiles.len(), 9);
        assert_eq!(puzzle.tiles.side(), 10);
        assert_eq!(puzzle.solution.dimensions(), (24, 24));
        assert_eq!(puzzle.layout.dim(), (3, 3));
        assert!(puzzle.tiles.ids().all(|id| GENERATED_ID_RANGE.contains(&id)));

        let from_layout: HashSet<_> = puzzle.layout.iter().copied().collect();
        let from_tiles: HashSet<_> = puzzle.tiles.ids().collect();
        assert_eq!(from_layout, from_tiles);
    }

    // Tests that the same seed reproduces the same puzzle
    // Verified by seeding from entropy
    #[test]
    fn test_seed_is_reproducible() {
        let first = scrambled(99, None, 0);
        let second = scrambled(99, None, 0);
        let other = scrambled(100, None, 0);

        assert_eq!(first.tiles, second.tiles);
        assert_eq!(first.solution, second.solution);
        assert_ne!(first.tiles, other.tiles);
    }

    // Tests that only grid neighbours match, each in exactly one way
    // Verified by allowing palindromic border segments
    #[test]
    fn test_only_neighbours_match() {
        let puzzle = scrambled(8, None, 0);
        let tiles: Vec<&Tile> = puzzle.tiles.iter().collect();
        let position = |id: TileId| {
            puzzle
                .layout
                .indexed_iter()
                .find(|(_, cell)| **cell == id)
                .map(|((row, col), _)| (row, col))
        };

        for (i, a) in tiles.iter().enumerate() {
            for b in tiles.iter().skip(i + 1) {
                let (Some((ra, ca)), Some((rb, cb))) = (position(a.id()), position(b.id())) else {
                    continue;
                };
                let adjacent = ra.abs_diff(rb) + ca.abs_diff(cb) == 1;
                let found = matches(a.bitmap(), b.bitmap()).len();
                assert_eq!(found, usize::from(adjacent), "{} and {}", a.id(), b.id());
            }
        }
    }

    // Tests that planted copies are present in the solution and nothing else matches
    // Verified by planting without mapping into tile interiors
    #[test]
    fn test_planted_copies_are_found() {
        let cross = bitmap(&[".#.", "###", ".#."]);
        let puzzle = scrambled(4, Some(cross.clone()), 5);
        let outcome = scan(&puzzle.solution, &cross).expect("cross fits");

        assert_eq!(puzzle.planted.len(), 5);
        assert_eq!(outcome.occurrence_count(), 5);
        assert_eq!(outcome.roughness(), 0);
        for planted in &puzzle.planted {
            assert!(
                outcome
                    .occurrences
                    .iter()
                    .any(|found| (found.x, found.y) == (planted.x, planted.y))
            );
        }
    }

    // Tests the parameter validation
    // Verified by accepting a density above one
    #[test]
    fn test_invalid_parameters() {
        for config in [
            ScrambleConfig {
                grid_side: 0,
                ..ScrambleConfig::default()
            },
            ScrambleConfig {
                tile_side: 2,
                ..ScrambleConfig::default()
            },
            ScrambleConfig {
                density: 1.5,
                ..ScrambleConfig::default()
            },
            ScrambleConfig {
                grid_side: 100,
                ..ScrambleConfig::default()
            },
        ] {
            assert!(matches!(
                scramble(&config),
                Err(PuzzleError::InvalidParameter { .. })
            ));
        }
    }

    // Tests that a pattern too large for the image cannot be planted
    // Verified by placing plants without checking that they fit
    #[test]
    fn test_oversized_plant_fails() {
        let config = ScrambleConfig {
            grid_side: 1,
            tile_side: 6,
            pattern: Some(bitmap(&["#####", "#####"])),
            plants: 1,
            ..ScrambleConfig::default()
        };

        assert!(matches!(
            scramble(&config),
            Err(PuzzleError::Computation { .. })
        ));
    }
}
