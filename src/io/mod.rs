//! Loading, generating and exporting puzzles, plus the command-line front end

/// Command-line interface and batch file processing
pub mod cli;
/// Input format constants and runtime defaults
pub mod configuration;
/// Error types for every puzzle operation
pub mod error;
/// PNG export of stitched images
pub mod image;
/// Text loaders for tile sets and patterns
pub mod parse;
/// Multi-file progress display
pub mod progress;
/// Seeded generation of solvable puzzles
pub mod scramble;
