//! Layout element types: Token, Line, Block.
//!
//! Each stage of the reconstruction produces the next, larger element:
//! tokens are chained into lines, lines into blocks, and blocks are regrouped
//! into paragraph-sized blocks. Boxes only ever grow through unions.

use serde::Serialize;

use crate::ocr::RawToken;
use crate::utils::{HasBBox, Rect, get_bound, uniq};

/// A single OCR-recognized fragment in flipped-Y page coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub bbox: Rect,
    pub height: i32,
}

impl Token {
    /// Creates a token whose height is the height of its box.
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
            height: bbox.height(),
        }
    }

    /// Creates a token with an explicit glyph height.
    pub fn with_height(text: impl Into<String>, bbox: Rect, height: i32) -> Self {
        Self {
            text: text.into(),
            bbox,
            height,
        }
    }

    /// Converts an engine token (top-left origin) into page coordinates.
    pub fn from_raw(raw: &RawToken, page_height: i32) -> Self {
        let bbox = Rect::from_pixels(raw.left, raw.top, raw.width, raw.height, page_height);
        Self {
            text: raw.text.clone(),
            bbox,
            height: raw.height,
        }
    }
}

/// A chain of tokens sharing one visual text line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub text: String,
    pub bbox: Rect,
    pub height: i32,
}

impl Line {
    pub fn new(text: impl Into<String>, bbox: Rect, height: i32) -> Self {
        Self {
            text: text.into(),
            bbox,
            height,
        }
    }

    /// Appends another line (or single-token line) to the end of this one.
    pub fn absorb(&mut self, other: &Line) {
        self.bbox = self.bbox.union(&other.bbox);
        self.height = self.height.max(other.height);
        self.text.push(' ');
        self.text.push_str(&other.text);
    }
}

impl From<&Token> for Line {
    fn from(token: &Token) -> Self {
        Self {
            text: token.text.clone(),
            bbox: token.bbox,
            height: token.height,
        }
    }
}

impl HasBBox for Line {
    fn bbox(&self) -> Rect {
        self.bbox
    }
}

/// A run of lines forming one paragraph-like region.
///
/// `lines` keeps the constituent line texts in the order they were merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub text: String,
    pub bbox: Rect,
    pub height: i32,
    pub lines: Vec<String>,
}

impl Block {
    /// Seeds a block from its first line.
    pub fn seed(line: &Line) -> Self {
        Self {
            text: line.text.clone(),
            bbox: line.bbox,
            height: line.height,
            lines: vec![line.text.clone()],
        }
    }

    /// Appends a line below the block.
    pub fn absorb_line(&mut self, line: &Line) {
        self.bbox = self.bbox.union(&line.bbox);
        self.height = self.bbox.top - line.bbox.bottom;
        self.text.push(' ');
        self.text.push_str(&line.text);
        self.lines.push(line.text.clone());
    }

    /// Collapses a group of overlapping blocks into one.
    ///
    /// The box is the union of all members, the text key comes from the first
    /// member and the line lists are unioned in order without duplicates.
    /// Returns `None` for an empty group.
    pub fn merge_group(members: &[&Block]) -> Option<Self> {
        let first = members.first()?;
        let bbox = get_bound(members.iter().copied())?;
        let lines = uniq(members.iter().flat_map(|b| b.lines.iter().cloned()));
        Some(Self {
            text: first.text.clone(),
            bbox,
            height: bbox.height(),
            lines,
        })
    }
}

impl HasBBox for Block {
    fn bbox(&self) -> Rect {
        self.bbox
    }
}
