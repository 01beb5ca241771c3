//! Text handling shared by the JD and resume paths: extraction from documents,
//! normalization, and a few word-level helpers.

pub mod extraction;
pub mod normalizer;

pub use extraction::{run_extraction, FileTextExtractor, TextExtractor};
pub use normalizer::normalize;

/// Upper bound on the characters handed to an embedding backend.
pub const MAX_EMBED_CHARS: usize = 10_000;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whole-word containment that also works for needles with symbolic edges
/// (`c++`, `.net`, `ci/cd`), where a regex `\b` would not.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }
        // Advance by one char so multi-byte text stays on a boundary.
        start = begin
            + haystack[begin..]
                .chars()
                .next()
                .map_or(1, |c| c.len_utf8());
    }
    false
}

/// Truncates to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Capitalises the first letter of every whitespace-separated word and lowercases the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut out = String::with_capacity(word.len());
            let mut at_start = true;
            for c in word.chars() {
                if at_start && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                    at_start = false;
                } else {
                    out.extend(c.to_lowercase());
                    // Hyphenated and apostrophe parts restart capitalisation ("O'Neil", "Jean-Luc").
                    if !c.is_alphabetic() {
                        at_start = true;
                    }
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_word_boundaries() {
        assert!(contains_word("we use c++ daily", "c++"));
        assert!(contains_word("python", "python"));
        assert!(contains_word("node.js, react", "react"));
        assert!(!contains_word("trusty", "rust"));
        assert!(!contains_word("pythonic code", "python"));
        assert!(!contains_word("anything", ""));
    }

    #[test]
    fn test_contains_word_skips_partial_then_finds_later() {
        assert!(contains_word("javascript and java", "java"));
    }

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jane a. doe"), "Jane A. Doe");
        assert_eq!(title_case("JOHN o'neil"), "John O'Neil");
    }
}
