//! Tests for the geometric reconstruction stages: line merging, block
//! grouping and paragraph clustering, including their convergence loops.

use reflow_core::layout::{
    Block, Line, ReconstructParams, Token, analyze_tokens, group_lines, group_words, merge_lines,
    merge_paragraphs,
};
use reflow_core::utils::Rect;

fn token(text: &str, left: i32, right: i32, bottom: i32, top: i32) -> Token {
    Token::new(text, Rect::new(left, right, bottom, top))
}

fn block(text: &str, left: i32, right: i32, bottom: i32, top: i32) -> Block {
    Block::seed(&Line::new(text, Rect::new(left, right, bottom, top), top - bottom))
}

/// Two columns of three short lines each, four words per line.
fn two_column_tokens() -> Vec<Token> {
    let mut tokens = Vec::new();
    for column in 0..2 {
        let base_x = 20 + column * 300;
        for row in 0..3 {
            let top = 500 - row * 14;
            for word in 0..4 {
                let left = base_x + word * 40;
                tokens.push(token(
                    &format!("w{}{}{}", column, row, word),
                    left,
                    left + 34,
                    top - 10,
                    top,
                ));
            }
        }
    }
    tokens
}

// ============================================================================
// Line merging
// ============================================================================

#[test]
fn test_hyphen_rule_merges_across_baseline_shift() {
    let params = ReconstructParams::default();
    let tokens = vec![
        token("inter", 0, 10, 0, 10),
        Token::with_height("-", Rect::new(11, 13, 2, 8), 10),
        token("national", 14, 40, 0, 10),
    ];
    let lines = merge_lines(&tokens, &params);
    assert_eq!(lines.items.len(), 1);
    assert_eq!(lines.items[0].text, "inter - national");
    assert_eq!(lines.items[0].bbox, Rect::new(0, 40, 0, 10));
}

#[test]
fn test_line_merging_is_idempotent_on_merged_lines() {
    let params = ReconstructParams::default();
    let tokens = two_column_tokens();
    let first = merge_lines(&tokens, &params);
    assert!(first.reached_fixed_point);

    let again = reflow_core::layout::converge(first.items.clone(), params.max_passes, group_words);
    assert_eq!(again.passes, 1);
    assert!(again.reached_fixed_point);
    assert_eq!(again.items, first.items);
}

#[test]
fn test_later_pass_merges_what_the_first_missed() {
    // x and y are too far apart for their small heights, but once y has
    // joined the tall z the wider tolerance lets x attach.
    let params = ReconstructParams::default();
    let tokens = vec![
        token("x", 0, 10, 0, 4),
        token("y", 16, 20, 0, 4),
        token("z", 22, 40, 0, 20),
    ];

    assert_eq!(group_words(&tokens.iter().map(Line::from).collect::<Vec<_>>()).len(), 2);

    let lines = merge_lines(&tokens, &params);
    assert_eq!(lines.items.len(), 1);
    assert_eq!(lines.items[0].text, "x y z");
    assert_eq!(lines.passes, 3);
    assert!(lines.reached_fixed_point);
}

#[test]
fn test_pass_cap_bounds_line_merging() {
    let params = ReconstructParams::new(1, 20, 20, 2, 5).unwrap();
    let tokens = vec![
        token("x", 0, 10, 0, 4),
        token("y", 16, 20, 0, 4),
        token("z", 22, 40, 0, 20),
    ];
    let lines = merge_lines(&tokens, &params);
    assert_eq!(lines.passes, 1);
    assert!(!lines.reached_fixed_point);
    assert_eq!(lines.items.len(), 2);
}

#[test]
fn test_line_text_preserves_token_order() {
    let params = ReconstructParams::default();
    let tokens = two_column_tokens();
    let lines = merge_lines(&tokens, &params);

    let rejoined: Vec<String> = lines
        .items
        .iter()
        .flat_map(|l| l.text.split(' ').map(String::from).collect::<Vec<_>>())
        .collect();
    let original: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
    assert_eq!(rejoined, original);
    assert_eq!(lines.items.len(), 6);
}

#[test]
fn test_line_boxes_cover_their_tokens() {
    let params = ReconstructParams::default();
    let tokens = two_column_tokens();
    let lines = merge_lines(&tokens, &params);

    for t in &tokens {
        let owner = lines
            .items
            .iter()
            .find(|l| l.text.split(' ').any(|w| w == t.text))
            .expect("every token lands in a line");
        assert!(owner.bbox.contains(&t.bbox));
    }
}

// ============================================================================
// Block grouping
// ============================================================================

#[test]
fn test_columns_become_separate_blocks() {
    let params = ReconstructParams::default();
    let lines = merge_lines(&two_column_tokens(), &params).items;
    let blocks = group_lines(&lines, &params);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].lines.len(), 3);
    assert_eq!(blocks[1].lines.len(), 3);
    assert_eq!(blocks[0].bbox, Rect::new(20, 174, 462, 500));
    assert_eq!(blocks[1].bbox, Rect::new(320, 474, 462, 500));
    assert_eq!(blocks[0].lines[0], "w000 w001 w002 w003");
}

#[test]
fn test_short_lines_stack_into_one_block() {
    let params = ReconstructParams::default();
    let lines = vec![
        Line::new("Dear", Rect::new(20, 60, 490, 500), 10),
        Line::new("board", Rect::new(20, 70, 478, 488), 10),
        Line::new("members", Rect::new(20, 90, 466, 476), 10),
    ];
    let blocks = group_lines(&lines, &params);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].lines, vec!["Dear", "board", "members"]);
    assert_eq!(blocks[0].text, "Dear board members");
    assert_eq!(blocks[0].bbox, Rect::new(20, 90, 466, 500));
}

#[test]
fn test_shared_line_reunites_blocks_into_one_region() {
    // `wide` joins the `left` block first, then the later `right` block as
    // well, which makes the two blocks overlap.
    let params = ReconstructParams::default();
    let lines = vec![
        Line::new("left", Rect::new(0, 100, 101, 111), 10),
        Line::new("right", Rect::new(200, 300, 116, 136), 20),
        Line::new("wide", Rect::new(0, 300, 90, 100), 10),
    ];
    let blocks = group_lines(&lines, &params);
    assert_eq!(blocks.len(), 2);

    let regions = merge_paragraphs(blocks, &params);
    assert_eq!(regions.items.len(), 1);
    assert_eq!(regions.items[0].lines, vec!["left", "wide", "right"]);
    assert_eq!(regions.items[0].bbox, Rect::new(0, 300, 90, 136));
    assert_eq!(regions.items[0].text, "left wide");
}

// ============================================================================
// Paragraph clustering
// ============================================================================

#[test]
fn test_distant_blocks_stay_separate() {
    let params = ReconstructParams::default();
    let blocks = vec![block("a", 0, 10, 0, 10), block("b", 50, 60, 0, 10)];
    let paragraphs = merge_paragraphs(blocks.clone(), &params);
    assert_eq!(paragraphs.items, blocks);
    assert_eq!(paragraphs.passes, 1);
}

#[test]
fn test_overlapping_blocks_merge_transitively_over_passes() {
    // b overlaps both a and c, but a and c do not overlap each other.
    let params = ReconstructParams::default();
    let blocks = vec![
        block("a", 0, 10, 0, 10),
        block("c", 30, 40, 0, 10),
        block("b", 12, 28, 0, 10),
    ];
    let paragraphs = merge_paragraphs(blocks, &params);
    assert_eq!(paragraphs.items.len(), 1);
    assert_eq!(paragraphs.items[0].text, "a");
    assert_eq!(paragraphs.items[0].bbox, Rect::new(0, 40, 0, 10));
    assert_eq!(paragraphs.items[0].lines, vec!["a", "b", "c"]);
    assert_eq!(paragraphs.passes, 3);
    assert!(paragraphs.reached_fixed_point);
}

#[test]
fn test_paragraph_boxes_never_shrink() {
    let params = ReconstructParams::default();
    let blocks = vec![
        block("a", 0, 100, 0, 30),
        block("b", 90, 200, 25, 60),
        block("c", 500, 600, 0, 30),
    ];
    let paragraphs = merge_paragraphs(blocks.clone(), &params);
    for input in &blocks {
        assert!(
            paragraphs
                .items
                .iter()
                .any(|p| p.bbox.contains(&input.bbox))
        );
    }
    assert!(paragraphs.items.len() <= blocks.len());
}

// ============================================================================
// Full geometric pipeline
// ============================================================================

#[test]
fn test_analyze_tokens_drops_noise_before_merging() {
    let params = ReconstructParams::default();
    let tokens = vec![
        token("nan", 0, 10, 0, 10),
        token("Hello", 20, 60, 100, 110),
        token("ẞẞ", 65, 80, 100, 110),
        token("world", 65, 100, 100, 110),
    ];
    let regions = analyze_tokens(tokens, &params);
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].text, "Hello world");
}
