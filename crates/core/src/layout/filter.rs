//! Noise filtering for raw OCR tokens.

use super::elements::Token;
use super::params::ReconstructParams;

/// Literal the OCR data frame uses for an empty cell.
const NAN_TOKEN: &str = "nan";

/// Returns the ASCII-only, trimmed form of `text` used for geometric
/// relevance tests, or `None` when the text counts as noise.
///
/// The stripped text never replaces the token's own text; the final page text
/// always comes from region re-OCR.
pub fn relevant_text(text: &str, max_chars: usize) -> Option<String> {
    if text == NAN_TOKEN || text.chars().count() > max_chars {
        return None;
    }
    let ascii: String = text.chars().filter(char::is_ascii).collect();
    let trimmed = ascii.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Keeps the tokens that survive [`relevant_text`], in their original order.
pub fn filter_tokens(tokens: impl IntoIterator<Item = Token>, params: &ReconstructParams) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|t| relevant_text(&t.text, params.max_token_chars).is_some())
        .collect()
}
