//! Searching the assembled image and summarising a solved puzzle

/// End-to-end pipeline and derived summary values
pub mod report;
/// Multi-orientation pattern search with masking
pub mod scanner;
