//! Page text assembly.
//!
//! Joins the pooled region lines into one string, guessing at the sentence
//! punctuation that was lost when the page layout fragmented the text.

/// Trailing marks after which the next line simply continues the sentence.
const CONTINUATION_MARKS: [char; 3] = [',', ':', ';'];

/// Returns true if `word` has at least one cased letter and no lowercase ones.
fn is_all_uppercase(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// Chooses the separator placed between the text so far and `line`.
fn separator(output: &str, line: &str) -> &'static str {
    if output
        .trim_end()
        .chars()
        .next_back()
        .is_some_and(|c| CONTINUATION_MARKS.contains(&c))
    {
        return " ";
    }

    let Some(first) = line.chars().next() else {
        return " ";
    };

    if first.is_ascii_punctuation() {
        ". "
    } else if first.is_uppercase() {
        // All-caps lead word: acronym or heading continuation.
        match line.split_whitespace().next() {
            Some(word) if is_all_uppercase(word) => " ",
            _ => ". ",
        }
    } else {
        " "
    }
}

/// Assembles cleaned lines into one page string.
///
/// Blank lines are skipped. Returns `None` when no line has any text, so a
/// page without extractable text is never reported as `Some("")`.
pub fn assemble<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    let mut lines = lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty());

    let mut output = lines.next()?.to_string();
    for line in lines {
        output.push_str(separator(&output, line));
        output.push_str(line);
    }
    Some(output)
}
