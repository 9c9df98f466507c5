//! Command-line interface for batch processing of tile files

use crate::analysis::report::{PuzzleReport, solve_with_progress};
use crate::io::configuration::{INPUT_EXTENSION, OUTPUT_SUFFIX};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_bitmap_as_png;
use crate::io::parse::{default_pattern, load_pattern, load_tiles};
use crate::io::progress::ProgressManager;
use crate::spatial::bitmap::Bitmap;
use crate::spatial::tiles::TileId;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tilestitch")]
#[command(
    author,
    version,
    about = "Reassemble scrambled square tiles and scan the image for a pattern"
)]
/// Command-line arguments for the tile assembler
pub struct Cli {
    /// Tile file or directory of tile files to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Pattern file searched for in the assembled image (defaults to the sea monster)
    #[arg(short, long, value_name = "FILE")]
    pub pattern: Option<PathBuf>,

    /// Id of the tile fixed at the origin (defaults to the first tile)
    #[arg(short, long, value_name = "ID")]
    pub start: Option<TileId>,

    /// Export the assembled image as PNG next to each input
    #[arg(short, long)]
    pub export: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if exported output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Emit tracing events to stderr (requires the `tracing` feature)
    #[arg(short, long)]
    pub trace: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        self.export && !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Summary values of one processed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// Tile file that was processed
    pub path: PathBuf,
    /// Number of tiles in the file
    pub tiles: usize,
    /// Product of the corner tile ids
    pub corner_product: u64,
    /// Pattern occurrences in the assembled image
    pub occurrences: usize,
    /// On cells outside every occurrence
    pub roughness: usize,
    /// Exported image, when requested
    pub exported: Option<PathBuf>,
}

impl FileSummary {
    fn from_report(
        path: &Path,
        tiles: usize,
        report: &PuzzleReport,
        exported: Option<PathBuf>,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            tiles,
            corner_product: report.corner_product,
            occurrences: report.occurrence_count(),
            roughness: report.roughness(),
            exported,
        }
    }
}

/// Orchestrates batch processing of tile files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, pattern loading or any file fails
    pub fn process(&mut self) -> Result<Vec<FileSummary>> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = match &self.cli.pattern {
            Some(path) => load_pattern(path)?,
            None => default_pattern()?,
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut summaries = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            let summary = self.process_file(file, index, &pattern)?;
            self.announce(&summary);
            summaries.push(summary);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(summaries)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some(INPUT_EXTENSION)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a tile file or directory",
            ))
        }
    }

    // Allow print for user feedback for skipped files
    #[allow(clippy::print_stderr)]
    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        pattern: &Bitmap,
    ) -> Result<FileSummary> {
        let tiles = load_tiles(input_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, tiles.len());
        }

        let progress_manager = &mut self.progress_manager;
        let report = solve_with_progress(&tiles, pattern, self.cli.start, |placed, _| {
            if let Some(pm) = progress_manager.as_mut() {
                pm.update_placed(index, placed);
            }
        })?;

        let exported = if self.cli.export {
            let output_path = Self::get_output_path(input_path);
            export_bitmap_as_png(&report.image, Some(&report.scan.marked), &output_path)?;
            Some(output_path)
        } else {
            None
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(FileSummary::from_report(input_path, tiles.len(), &report, exported))
    }

    // Results are the point of the tool, so they are printed even when quiet
    #[allow(clippy::print_stdout)]
    fn announce(&self, summary: &FileSummary) {
        let line = format!(
            "{}: {} tiles, corner product {}, {} pattern occurrences, roughness {}",
            summary.path.display(),
            summary.tiles,
            summary.corner_product,
            summary.occurrences,
            summary.roughness
        );
        match &self.progress_manager {
            Some(pm) => pm.println(&line),
            None => println!("{line}"),
        }
    }

    /// Path of the exported image for an input file
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.png", stem.to_string_lossy(), OUTPUT_SUFFIX);

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
