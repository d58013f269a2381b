//! Layout reconstruction module.
//!
//! This module contains:
//! - Layout element types (Token, Line, Block)
//! - Reconstruction parameters (ReconstructParams)
//! - Token filtering, line/block grouping and paragraph clustering
//! - The analysis driver chaining the stages with bounded fixed-point loops

pub mod analysis;
pub mod clustering;
pub mod elements;
pub mod filter;
pub mod grouping;
pub mod params;

pub use analysis::{Converged, analyze_tokens, converge, merge_lines, merge_paragraphs};
pub use clustering::{blocks_mergeable, group_blocks};
pub use elements::{Block, Line, Token};
pub use filter::{filter_tokens, relevant_text};
pub use grouping::{group_lines, group_words, lines_mergeable, words_mergeable};
pub use params::ReconstructParams;
