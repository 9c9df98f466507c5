/// Frontier-driven placement search
pub mod assembler;
/// Per-run memo of border matches between tile pairs
pub mod cache;
/// Pairwise border matching under every symmetry
pub mod matcher;
/// Joining tile interiors into one image
pub mod stitch;
