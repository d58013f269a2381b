//! Layout analysis driver.
//!
//! Chains the reconstruction stages over one page's tokens:
//! filter → lines (iterated) → blocks (single pass) → paragraphs (iterated).

use tracing::debug;

use super::clustering::group_blocks;
use super::elements::{Block, Line, Token};
use super::filter::filter_tokens;
use super::grouping::{group_lines, group_words};
use super::params::ReconstructParams;

/// Outcome of a bounded fixed-point loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converged<T> {
    pub items: Vec<T>,
    /// Number of passes actually run.
    pub passes: usize,
    /// False when the pass cap was hit while the count was still shrinking.
    pub reached_fixed_point: bool,
}

/// Repeats `pass` until it leaves the element count unchanged, running at
/// most `max_passes` passes (at least one).
pub fn converge<T, F>(items: Vec<T>, max_passes: usize, mut pass: F) -> Converged<T>
where
    F: FnMut(&[T]) -> Vec<T>,
{
    let mut items = items;
    let mut passes = 0;

    while passes < max_passes.max(1) {
        let before = items.len();
        items = pass(&items);
        passes += 1;
        if items.len() == before {
            return Converged {
                items,
                passes,
                reached_fixed_point: true,
            };
        }
    }

    Converged {
        items,
        passes,
        reached_fixed_point: false,
    }
}

/// Merges tokens into lines until the line count stabilizes.
pub fn merge_lines(tokens: &[Token], params: &ReconstructParams) -> Converged<Line> {
    let seeds: Vec<Line> = tokens.iter().map(Line::from).collect();
    converge(seeds, params.max_passes, group_words)
}

/// Merges blocks into paragraph groups until the group count stabilizes.
pub fn merge_paragraphs(blocks: Vec<Block>, params: &ReconstructParams) -> Converged<Block> {
    converge(blocks, params.max_passes, |b| group_blocks(b, params))
}

/// Runs every geometric stage over a page's raw tokens and returns the
/// final regions in production order.
pub fn analyze_tokens(tokens: Vec<Token>, params: &ReconstructParams) -> Vec<Block> {
    let total = tokens.len();
    let tokens = filter_tokens(tokens, params);
    debug!(kept = tokens.len(), dropped = total - tokens.len(), "filtered tokens");

    let lines = merge_lines(&tokens, params);
    debug!(
        lines = lines.items.len(),
        passes = lines.passes,
        fixed_point = lines.reached_fixed_point,
        "merged tokens into lines"
    );

    let blocks = group_lines(&lines.items, params);
    debug!(blocks = blocks.len(), "merged lines into blocks");

    let paragraphs = merge_paragraphs(blocks, params);
    debug!(
        regions = paragraphs.items.len(),
        passes = paragraphs.passes,
        fixed_point = paragraphs.reached_fixed_point,
        "merged blocks into paragraphs"
    );

    paragraphs.items
}
