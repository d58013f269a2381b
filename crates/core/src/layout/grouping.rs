//! Token-to-line and line-to-block grouping algorithms.
//!
//! Contains group_words() for chaining tokens into visual lines, and
//! group_lines() for chaining lines into paragraph-like blocks. Both walk the
//! input in OCR-reported order and never reorder it.

use crate::utils::HasBBox;

use super::elements::{Block, Line};
use super::filter::relevant_text;
use super::params::ReconstructParams;

/// A lone hyphen glyph, which OCR engines often report as its own token.
const HYPHEN: &str = "-";

/// Distance between the right edge of `a` and the left edge of `b`.
///
/// Unsigned: a `b` that starts inside `a` is as far away as one starting
/// the same distance past it.
fn hgap<A: HasBBox, B: HasBBox>(a: &A, b: &B) -> i32 {
    (b.bbox().left - a.bbox().right).abs()
}

/// Decides whether `b` continues the visual line ending with `a`.
///
/// ```text
///   +------+ - - +------+   -
///   |  a   |     |  b   |   | (half the smaller height)
///   +------+ - - |      |   -
///          |<--->+------+
///      (taller height)
/// ```
///
/// A hyphen only needs to be close horizontally, and anything following a
/// hyphen is attached unconditionally.
pub fn words_mergeable(a: &Line, b: &Line) -> bool {
    let close = hgap(a, b) < a.height.max(b.height);

    if b.text == HYPHEN {
        close
    } else if a.text == HYPHEN {
        true
    } else {
        // |dy| < 0.5 * h, kept in integers.
        let baseline_shift = (b.bbox.bottom - a.bbox.bottom).abs();
        close && baseline_shift * 2 < a.height.min(b.height)
    }
}

/// Chains adjacent elements into lines in a single greedy pass.
///
/// Each unconsumed element seeds a line; the chain extends while every
/// element is mergeable with the one just before it and stops at the first
/// failure. Consumed elements are never used as seeds again.
pub fn group_words(objs: &[Line]) -> Vec<Line> {
    let mut result = Vec::with_capacity(objs.len());
    let mut i = 0;

    while i < objs.len() {
        let mut line = objs[i].clone();
        let mut next = i + 1;
        while next < objs.len() && words_mergeable(&objs[next - 1], &objs[next]) {
            line.absorb(&objs[next]);
            next += 1;
        }
        result.push(line);
        i = next;
    }

    result
}

/// Returns true if the horizontal midpoint of the narrower box falls inside
/// the wider one. Zero-width boxes have no midpoint.
fn midpoint_within<A: HasBBox, B: HasBBox>(block: &A, line: &B) -> bool {
    let (outer, inner) = if block.width() > line.width() {
        (block.bbox(), line.bbox())
    } else {
        (line.bbox(), block.bbox())
    };
    if inner.width() <= 0 {
        return false;
    }
    let mid = inner.left + inner.width() / 2;
    outer.left <= mid && mid < outer.right
}

/// Decides whether `line2` joins `block`, given `line1` directly above it in
/// reading order.
///
/// Two branches are evaluated. The first requires `line2` to sit just below
/// both `line1` and the block, `line1` to already be part of the block's text,
/// and the narrower of block/`line2` to be centred over the other. The second
/// only checks the block gap and the centring. Both are kept as written so
/// that any divergence between them stays visible.
pub fn lines_mergeable(
    block: &Block,
    line1: &Line,
    line2: &Line,
    params: &ReconstructParams,
) -> bool {
    let max_space = if line1.height > params.line_gap_cap {
        params.line_gap_cap
    } else {
        line1.height
    };

    if relevant_text(&line1.text, params.max_token_chars).is_none() {
        return false;
    }

    let below_line = (line1.bbox.bottom - line2.bbox.top).abs() < max_space;
    let below_block = (block.bbox.bottom - line2.bbox.top).abs() < max_space;
    let continues_block = block.text.contains(line1.text.as_str());
    let centred = midpoint_within(block, line2);

    let follows_line = below_line && below_block && continues_block && centred;
    let follows_block = below_block && centred;

    follows_line || follows_block
}

/// Groups lines into blocks in a single pass.
///
/// Each line not yet absorbed by an earlier block seeds a block, then every
/// later line is tested against the growing block and the line preceding it
/// in the input. Absorbed lines no longer seed blocks but may still join
/// later ones, so a line can appear in more than one block; the paragraph
/// stage reunites such blocks.
pub fn group_lines(lines: &[Line], params: &ReconstructParams) -> Vec<Block> {
    let mut claimed = vec![false; lines.len()];
    let mut blocks = Vec::new();

    for i in 0..lines.len() {
        if claimed[i] {
            continue;
        }
        claimed[i] = true;

        let mut block = Block::seed(&lines[i]);
        for j in (i + 1)..lines.len() {
            if lines_mergeable(&block, &lines[j - 1], &lines[j], params) {
                block.absorb_line(&lines[j]);
                claimed[j] = true;
            }
        }
        blocks.push(block);
    }

    blocks
}
