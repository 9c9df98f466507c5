//! Multi-file assembly progress with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static PLACEMENT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Puzzles: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Placement progress of one puzzle file
#[derive(Clone, Debug, Default)]
struct PuzzleState {
    name: String,
    placed: usize,
    tiles: usize,
    solved: bool,
}

impl PuzzleState {
    fn label(&self) -> String {
        if self.solved {
            format!("✓ {}", self.name)
        } else {
            self.name.clone()
        }
    }

    fn counter(&self) -> String {
        let width = self.tiles.to_string().len();
        format!("{:>width$}/{}", self.placed, self.tiles)
    }

    fn show_on(&self, bar: &ProgressBar) {
        bar.set_length(self.tiles as u64);
        bar.set_position(self.placed as u64);
        bar.set_message(self.counter());
        bar.set_prefix(self.label());
    }
}

fn clear(bar: &ProgressBar) {
    bar.set_length(0);
    bar.set_position(0);
    bar.set_message(String::new());
    bar.set_prefix(String::new());
}

/// Coordinates progress display while a batch of puzzles is solved
///
/// Each bar counts the tiles placed out of the tiles in one file. Only the most
/// recently started files get a bar; past the limit a batch bar counts solved
/// files instead.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    puzzle_bars: Vec<ProgressBar>,
    /// Indexed by file position in the batch; unstarted files keep an empty name
    puzzles: Vec<PuzzleState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            puzzle_bars: Vec::new(),
            puzzles: Vec::new(),
        }
    }

    /// Create the bars for a batch of `file_count` puzzles
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(PLACEMENT_STYLE.clone());
            self.puzzle_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Start tracking the puzzle at `index` with `tiles` tiles to place
    pub fn start_file(&mut self, index: usize, path: &Path, tiles: usize) {
        if index >= self.puzzles.len() {
            self.puzzles.resize_with(index + 1, PuzzleState::default);
        }
        if let Some(state) = self.puzzles.get_mut(index) {
            *state = PuzzleState {
                name: path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned(),
                placed: 0,
                tiles,
                solved: false,
            };
        }
        self.refresh();
    }

    /// Report the number of tiles placed so far
    pub fn update_placed(&mut self, file_index: usize, placed: usize) {
        if let Some(state) = self.puzzles.get_mut(file_index) {
            state.placed = placed;
        }
        self.refresh();
    }

    /// Mark a puzzle as solved
    pub fn complete_file(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.puzzles.get_mut(index) {
            state.placed = state.tiles;
            state.solved = true;
        }
        self.refresh();
    }

    /// Print a line above the bars without corrupting them
    pub fn println(&self, line: &str) {
        let _ = self.multi_progress.println(line);
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All puzzles solved");
        }
        let _ = self.multi_progress.clear();
    }

    // Shows the most recently started puzzles, oldest first
    fn refresh(&self) {
        let started: Vec<&PuzzleState> = self
            .puzzles
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let skip = started.len().saturating_sub(self.puzzle_bars.len());
        let mut visible = started.into_iter().skip(skip);

        for bar in &self.puzzle_bars {
            match visible.next() {
                Some(state) => state.show_on(bar),
                None => clear(bar),
            }
        }
    }

    /// Number of per-file bars in use
    pub fn bar_count(&self) -> usize {
        self.puzzle_bars.len()
    }

    /// Whether a batch bar was created
    pub const fn is_batched(&self) -> bool {
        self.batch_bar.is_some()
    }
}
