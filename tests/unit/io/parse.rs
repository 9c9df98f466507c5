//! Tests for the tile and pattern text loaders

#[cfg(test)]
mod tests {
    use crate::{HAND_BUILT_IDS, bitmap, hand_built_tiles};
    use std::fmt::Write;
    use tilestitch::PuzzleError;
    use tilestitch::io::parse::{
        default_pattern, load_pattern, load_tiles, parse_pattern, parse_tiles,
    };

    // Renders the hand-built tiles in the input file format
    fn hand_built_text() -> String {
        let mut text = String::new();
        for tile in &hand_built_tiles() {
            let _ = writeln!(text, "Tile {}:\n{}\n", tile.id(), tile.bitmap());
        }
        text
    }

    // Tests that a rendered tile file parses back into the same set
    // Verified by dropping the last tile when the input ends without a blank line
    #[test]
    fn test_parse_tiles_reads_every_block() {
        let parsed = parse_tiles(&hand_built_text()).expect("well-formed input");

        assert_eq!(parsed, hand_built_tiles());
        let trimmed = parse_tiles(hand_built_text().trim_end()).expect("no trailing blank");
        assert_eq!(trimmed.ids().collect::<Vec<_>>(), HAND_BUILT_IDS.to_vec());
    }

    // Tests that consecutive blocks do not need blank separators and leading zeros parse
    // Verified by requiring a blank line before every header
    #[test]
    fn test_parse_tiles_without_separators() {
        let parsed = parse_tiles("Tile 0012:\n#.#\n...\n#..\nTile 13:\n...\n.#.\n...\n")
            .expect("well-formed input");

        assert_eq!(parsed.ids().collect::<Vec<_>>(), vec![12, 13]);
        assert_eq!(
            parsed.get(13).map(|tile| tile.bitmap().clone()),
            Some(bitmap(&["...", ".#.", "..."]))
        );
    }

    // Tests header errors with their line numbers
    // Verified by reporting the line after the failing header
    #[test]
    fn test_parse_tiles_header_errors() {
        assert!(matches!(
            parse_tiles("#.#\n"),
            Err(PuzzleError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_tiles("Tile 1:\n##\n##\n\nTile x:\n##\n##\n"),
            Err(PuzzleError::Parse { line: 5, .. })
        ));
        assert!(matches!(
            parse_tiles("Tile 1\n##\n##\n"),
            Err(PuzzleError::Parse { line: 1, .. })
        ));
    }

    // Tests row errors with their line numbers
    // Verified by accepting any non-'#' character as off
    #[test]
    fn test_parse_tiles_row_errors() {
        assert!(matches!(
            parse_tiles("Tile 1:\n#.\n#o\n"),
            Err(PuzzleError::Parse { line: 3, .. })
        ));
        assert!(matches!(
            parse_tiles("Tile 1:\n##\n#\n"),
            Err(PuzzleError::Parse { line: 3, .. })
        ));
        assert!(matches!(
            parse_tiles("Tile 1:\n\nTile 2:\n##\n##\n"),
            Err(PuzzleError::Parse { line: 1, .. })
        ));
    }

    // Tests that the set validation applies to parsed tiles
    // Verified by skipping TileSet::add in the parser
    #[test]
    fn test_parse_tiles_shape_errors() {
        assert!(matches!(
            parse_tiles("Tile 1:\n##.\n##.\n"),
            Err(PuzzleError::TileShape { id: 1, .. })
        ));
        assert!(matches!(
            parse_tiles("Tile 1:\n##\n##\n\nTile 1:\n..\n..\n"),
            Err(PuzzleError::DuplicateTile { id: 1 })
        ));
        assert!(parse_tiles("").expect("empty input").is_empty());
    }

    // Tests that short pattern rows are padded with wildcards
    // Verified by trimming trailing spaces before measuring rows
    #[test]
    fn test_parse_pattern_pads_rows() {
        let pattern = parse_pattern("\n  #\n# x #\n\n").expect("non-empty pattern");

        assert_eq!(pattern, bitmap(&["..#..", "#...#"]));
        assert!(matches!(
            parse_pattern("\n   \n"),
            Err(PuzzleError::Parse { .. })
        ));
    }

    // Tests the built-in sea monster dimensions
    // Verified by dropping the trailing blank of the first row
    #[test]
    fn test_default_pattern() {
        let monster = default_pattern().expect("built-in pattern");

        assert_eq!(monster.dimensions(), (3, 20));
        assert_eq!(monster.count_on(), 15);
        assert!(monster.get(18, 0));
    }

    // Tests loading from files and the path attached to missing files
    // Verified by discarding the path in load_tiles
    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let tiles_path = dir.path().join("tiles.txt");
        let pattern_path = dir.path().join("pattern.txt");
        std::fs::write(&tiles_path, hand_built_text()).expect("write tiles");
        std::fs::write(&pattern_path, ".#.\n###\n.#.\n").expect("write pattern");

        assert_eq!(load_tiles(&tiles_path).expect("readable"), hand_built_tiles());
        assert_eq!(load_pattern(&pattern_path).expect("readable").count_on(), 5);

        let missing = dir.path().join("missing.txt");
        assert!(matches!(
            load_tiles(&missing),
            Err(PuzzleError::FileSystem { ref path, .. }) if *path == missing
        ));
    }
}
