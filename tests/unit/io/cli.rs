//! Tests for command-line interface parsing and file processing

#[cfg(test)]
mod tests {
    use crate::hand_built_tiles;
    use clap::Parser;
    use std::ffi::OsStr;
    use std::fmt::Write;
    use std::path::{Path, PathBuf};
    use tilestitch::PuzzleError;
    use tilestitch::io::cli::{Cli, FileProcessor};

    fn write_hand_built(path: &Path) {
        let mut text = String::new();
        for tile in &hand_built_tiles() {
            let _ = writeln!(text, "Tile {}:\n{}\n", tile.id(), tile.bitmap());
        }
        std::fs::write(path, text).expect("write tiles");
    }

    // Tests CLI parsing with only required target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "tiles.txt"]);

        assert_eq!(cli.target, PathBuf::from("tiles.txt"));
        assert!(cli.pattern.is_none());
        assert!(cli.start.is_none());
        assert!(!cli.export);
        assert!(!cli.quiet);
        assert!(!cli.trace);
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with all available arguments
    // Verified by removing the short flag for the start tile
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "puzzles",
            "--pattern",
            "monster.txt",
            "-s",
            "1951",
            "--export",
            "--quiet",
            "--no-skip",
            "--trace",
        ]);

        assert_eq!(cli.target, PathBuf::from("puzzles"));
        assert_eq!(cli.pattern, Some(PathBuf::from("monster.txt")));
        assert_eq!(cli.start, Some(1951));
        assert!(cli.export);
        assert!(cli.quiet);
        assert!(cli.trace);
        assert!(!cli.should_show_progress());
    }

    // Tests file skip behavior based on --export and --no-skip
    // Verified by inverting boolean logic in skip_existing method
    #[test]
    fn test_skip_existing_logic() {
        assert!(!Cli::parse_from(["program", "t.txt"]).skip_existing());
        assert!(Cli::parse_from(["program", "t.txt", "-e"]).skip_existing());
        assert!(!Cli::parse_from(["program", "t.txt", "-e", "-n"]).skip_existing());
    }

    // Tests output path generation
    // Verified by dropping the output suffix
    #[test]
    fn test_output_path() {
        assert_eq!(
            FileProcessor::get_output_path(Path::new("puzzles/day20.txt")),
            PathBuf::from("puzzles/day20_image.png")
        );
    }

    // Tests processing a directory of tile files with export
    // Verified by collecting files regardless of extension
    #[test]
    fn test_process_directory() {
        let dir = tempfile::tempdir().expect("temporary directory");
        write_hand_built(&dir.path().join("b.txt"));
        write_hand_built(&dir.path().join("a.txt"));
        std::fs::write(dir.path().join("notes.md"), "not a puzzle").expect("write notes");
        let pattern = dir.path().join("cross.pattern");
        std::fs::write(&pattern, ".#.\n###\n.#.\n").expect("write pattern");

        let cli = Cli::parse_from([
            OsStr::new("program"),
            dir.path().as_os_str(),
            OsStr::new("--pattern"),
            pattern.as_os_str(),
            OsStr::new("--export"),
            OsStr::new("--quiet"),
        ]);
        let summaries = FileProcessor::new(cli).process().expect("both files solve");

        assert_eq!(summaries.len(), 2);
        let first = summaries.first().expect("two summaries");
        assert_eq!(first.path, dir.path().join("a.txt"));
        assert_eq!(first.tiles, 4);
        assert_eq!(first.corner_product, 37_885_274_599_751);
        assert_eq!(first.occurrences, 4);
        assert_eq!(first.roughness, 20);
        assert_eq!(first.exported, Some(dir.path().join("a_image.png")));
        assert!(dir.path().join("b_image.png").exists());
    }

    // Tests that exported files are skipped on the next run unless --no-skip is given
    // Verified by ignoring existing output files
    #[test]
    fn test_existing_output_is_skipped() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let input = dir.path().join("tiles.txt");
        write_hand_built(&input);
        std::fs::write(dir.path().join("tiles_image.png"), b"").expect("placeholder output");
        // The 8x8 hand-built image is too small for the default sea monster
        let pattern = dir.path().join("cross.pattern");
        std::fs::write(&pattern, ".#.\n###\n.#.\n").expect("write pattern");

        let skipping = Cli::parse_from([
            OsStr::new("program"),
            input.as_os_str(),
            OsStr::new("-p"),
            pattern.as_os_str(),
            OsStr::new("-e"),
            OsStr::new("-q"),
        ]);
        assert!(FileProcessor::new(skipping).process().expect("nothing to do").is_empty());

        let forced = Cli::parse_from([
            OsStr::new("program"),
            input.as_os_str(),
            OsStr::new("-p"),
            pattern.as_os_str(),
            OsStr::new("-e"),
            OsStr::new("-n"),
            OsStr::new("-q"),
        ]);
        let summaries = FileProcessor::new(forced).process().expect("file solves");
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries.first().map(|summary| summary.occurrences), Some(4));

        // Without a fitting pattern the default monster is refused as a shape error
        let default_pattern = Cli::parse_from([
            OsStr::new("program"),
            input.as_os_str(),
            OsStr::new("-q"),
        ]);
        let error = FileProcessor::new(default_pattern)
            .process()
            .expect_err("monster is larger than the image");
        assert!(error.is_shape_error());
    }

    // Tests that a missing target is reported as an invalid parameter
    // Verified by returning an empty summary list for missing targets
    #[test]
    fn test_missing_target() {
        let cli = Cli::parse_from(["program", "/nonexistent/tiles.txt", "-q"]);
        let result = FileProcessor::new(cli).process();

        assert!(matches!(
            result,
            Err(PuzzleError::InvalidParameter {
                parameter: "target",
                ..
            })
        ));
    }
}
