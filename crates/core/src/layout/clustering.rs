//! Block-to-paragraph clustering.
//!
//! Reunites blocks that inconsistent OCR segmentation split out of the same
//! physical area: any two blocks whose padded boxes overlap on both axes end
//! up in one paragraph group.

use super::elements::Block;
use super::params::ReconstructParams;

/// Returns true if the boxes of `a` and `b`, each grown by `padding` pixels on
/// every side, intersect horizontally and vertically.
pub fn blocks_mergeable(a: &Block, b: &Block, padding: i32) -> bool {
    let pa = a.bbox.padded(padding);
    let pb = b.bbox.padded(padding);
    pa.is_hoverlap(&pb) && pa.is_voverlap(&pb)
}

/// Runs one clustering pass.
///
/// Each block not yet gathered by an earlier group seeds one, gathering every
/// later block that overlaps it, gathered or not. The group is collapsed with
/// [`Block::merge_group`]. Group order follows the order of the seeding blocks.
pub fn group_blocks(blocks: &[Block], params: &ReconstructParams) -> Vec<Block> {
    let mut claimed = vec![false; blocks.len()];
    let mut result = Vec::with_capacity(blocks.len());

    for (i, seed) in blocks.iter().enumerate() {
        if claimed[i] {
            continue;
        }
        claimed[i] = true;

        let mut members = vec![seed];
        for (j, other) in blocks.iter().enumerate().skip(i + 1) {
            if blocks_mergeable(seed, other, params.paragraph_padding) {
                members.push(other);
                claimed[j] = true;
            }
        }

        result.extend(Block::merge_group(&members));
    }

    result
}
