//! Reconstruction parameters.
//!
//! Contains ReconstructParams for controlling how tokens are merged into
//! lines, blocks and paragraphs, and how regions are cropped for re-OCR.

use serde::Deserialize;

use crate::error::{ReflowError, Result};

/// Parameters for layout reconstruction.
///
/// All distances are in page pixels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReconstructParams {
    /// Upper bound on passes for the iterative merge stages (line and
    /// paragraph). A pass that leaves the element count unchanged ends the
    /// loop earlier. This is a safeguard, not a termination proof.
    pub max_passes: usize,

    /// Tokens whose text is longer than this many characters are treated as
    /// OCR noise.
    pub max_token_chars: usize,

    /// Cap on the vertical gap between two lines of the same block. Lines
    /// shorter than the cap use their own height instead.
    pub line_gap_cap: i32,

    /// Padding added on every side of a block before testing paragraph overlap.
    pub paragraph_padding: i32,

    /// Padding added on every side of a region before cropping it for re-OCR.
    pub crop_padding: i32,
}

impl Default for ReconstructParams {
    fn default() -> Self {
        Self {
            max_passes: 5,
            max_token_chars: 20,
            line_gap_cap: 20,
            paragraph_padding: 2,
            crop_padding: 5,
        }
    }
}

impl ReconstructParams {
    /// Creates new reconstruction parameters with the specified values.
    ///
    /// Rejects a zero pass cap and negative paddings.
    pub fn new(
        max_passes: usize,
        max_token_chars: usize,
        line_gap_cap: i32,
        paragraph_padding: i32,
        crop_padding: i32,
    ) -> Result<Self> {
        let params = Self {
            max_passes,
            max_token_chars,
            line_gap_cap,
            paragraph_padding,
            crop_padding,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the invariants `new` enforces; useful after deserializing.
    pub fn validate(&self) -> Result<()> {
        if self.max_passes == 0 {
            return Err(ReflowError::InvalidParams(
                "max_passes must be at least 1".to_string(),
            ));
        }
        if self.line_gap_cap < 0 || self.paragraph_padding < 0 || self.crop_padding < 0 {
            return Err(ReflowError::InvalidParams(
                "gap cap and paddings must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
