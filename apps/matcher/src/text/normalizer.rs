//! Text Normalizer: an ordered pipeline of pure string stages.
//!
//! Output invariants: no control characters other than `\n`, single spaces inside lines,
//! no blank lines, no URLs or email-like tokens. Line structure is kept so the section
//! segmenter can still see headers at line starts.

use once_cell::sync::Lazy;
use regex::Regex;

static HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").unwrap());
static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(?:[^\S\n]*\n)+").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:https?|www)\S+").unwrap());
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S*").unwrap());
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,\-/()+#:%&@*']").unwrap());

/// A single named stage of the cleanup pipeline.
pub type Stage = fn(&str) -> String;

/// The stages `normalize` applies, in order.
pub const PIPELINE: &[(&str, Stage)] = &[
    ("collapse_whitespace", collapse_whitespace),
    ("strip_links_and_emails", strip_links_and_emails),
    ("keep_allowed_chars", keep_allowed_chars),
    ("drop_non_printable", drop_non_printable),
    // Character filtering can expose fresh `www`/`@` tokens, so strip once more.
    ("strip_links_and_emails", strip_links_and_emails),
    ("tidy_lines", tidy_lines),
];

/// Cleans raw extracted text. Idempotent.
pub fn normalize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    PIPELINE
        .iter()
        .fold(raw.to_string(), |text, (_, stage)| stage(&text))
}

/// Unifies line endings, collapses horizontal whitespace runs to one space and
/// newline runs to one newline, then trims.
pub fn collapse_whitespace(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let spaced = HORIZONTAL_WS.replace_all(&unified, " ");
    NEWLINE_RUNS.replace_all(&spaced, "\n").trim().to_string()
}

pub fn strip_links_and_emails(text: &str) -> String {
    let without_urls = URL.replace_all(text, "");
    EMAIL.replace_all(&without_urls, "").into_owned()
}

/// Removes everything outside word chars, whitespace and `. , - / ( ) + # : % & @ * '`.
pub fn keep_allowed_chars(text: &str) -> String {
    DISALLOWED.replace_all(text, "").into_owned()
}

pub fn drop_non_printable(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

/// Collapses spacing inside each line, trims it, and drops lines left empty.
pub fn tidy_lines(text: &str) -> String {
    text.split(['\n', '\r'])
        .map(|line| HORIZONTAL_WS.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace_keeps_single_newlines() {
        assert_eq!(
            collapse_whitespace("  a \t b\r\n\r\n\n  c  "),
            "a b\nc",
            "horizontal runs become one space, newline runs one newline"
        );
    }

    #[test]
    fn test_strip_links_and_emails() {
        let out = strip_links_and_emails("see https://x.io/jobs or www.acme.com, mail jane@acme.com now");
        assert!(!out.contains("http"));
        assert!(!out.contains("www"));
        assert!(!out.contains('@'));
        assert!(out.contains("now"));
    }

    #[test]
    fn test_keep_allowed_chars() {
        assert_eq!(keep_allowed_chars("C++ & C# (5%) ★ — ok!"), "C++ & C# (5%)   ok");
    }

    #[test]
    fn test_drop_non_printable_keeps_layout_controls() {
        assert_eq!(drop_non_printable("a\u{0007}b\nc\td"), "ab\nc\td");
    }

    #[test]
    fn test_normalize_end_to_end() {
        let raw = "Jane Doe\n\n\u{0000}Email: jane.doe@example.com   |  https://janedoe.dev\nSkills:  Python, C++ ★\n\n";
        let cleaned = normalize(raw);
        assert_eq!(cleaned, "Jane Doe\nEmail:\nSkills: Python, C++");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "Plain text only",
            "Hello   world\n\n\nNew   para\r\nwith\u{0003} control",
            "Contact: a@b.c or http://foo.bar/baz  ★★ www.site.org",
            "odd w★ww.site.org and x@★y tokens",
            "Requirements:\n - Python\n - AWS\n\n\nNice to have:\n * Kubernetes",
            "tab\tseparated\tvalues\u{00A0}and nbsp",
        ];
        for s in samples {
            let once = normalize(s);
            let twice = normalize(&once);
            assert_eq!(once, twice, "normalize must be idempotent for {s:?}");
        }
    }

    #[test]
    fn test_normalize_output_has_no_blank_lines_or_controls() {
        let cleaned = normalize("a\n \n\u{0001}\nb\t\tc");
        assert!(!cleaned.lines().any(|l| l.trim().is_empty()));
        assert!(!cleaned.chars().any(|c| c.is_control() && c != '\n'));
        assert_eq!(cleaned, "a\nb c");
    }
}
