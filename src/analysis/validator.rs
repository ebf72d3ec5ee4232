//! Heading shape filter.
//!
//! Judges only the text of a line, not its size or level. Anything short,
//! non-empty and not made of bare digits or rule characters passes, which
//! means small-font body lines can still end up as low-level headings.

use std::sync::OnceLock;

use regex::Regex;

/// Longest text, in characters after trimming, accepted as a heading.
pub const MAX_HEADING_CHARS: usize = 150;

/// Decimal digits plus the other characters with a digit value: super- and
/// subscripts, circled, parenthesized and dingbat digits. Fractions and
/// numeral letters such as "½" or "Ⅳ" are not digits.
fn digits_regex() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| {
        Regex::new(concat!(
            r"^[\p{Nd}",
            r"\u{00B2}\u{00B3}\u{00B9}\u{2070}\u{2074}-\u{2079}\u{2080}-\u{2089}",
            r"\u{1369}-\u{1371}\u{19DA}",
            r"\u{2460}-\u{2468}\u{2474}-\u{247C}\u{2488}-\u{2490}\u{24EA}",
            r"\u{24F5}-\u{24FD}\u{24FF}\u{2776}-\u{277E}\u{2780}-\u{2788}",
            r"\u{278A}-\u{2792}\u{1F100}-\u{1F10A}]+$",
        ))
        .unwrap()
    })
}

fn separator_regex() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"^[\-\u{2013}\u{2014}\s]*$").unwrap())
}

/// Whether `text` has the shape of a heading.
pub fn is_plausible_heading(text: &str) -> bool {
    is_plausible_heading_with_limit(text, MAX_HEADING_CHARS)
}

/// Like [`is_plausible_heading`] with a custom length limit.
pub fn is_plausible_heading_with_limit(text: &str, max_chars: usize) -> bool {
    let text = text.trim();
    if text.is_empty() || text.chars().count() > max_chars {
        return false;
    }
    !is_numeric_only(text) && !is_separator(text)
}

/// Digits only once ASCII spaces are removed ("12", "3 4", "٣", "²").
fn is_numeric_only(text: &str) -> bool {
    let compact: String = text.chars().filter(|c| *c != ' ').collect();
    digits_regex().is_match(&compact)
}

/// Only whitespace, hyphens, en dashes and em dashes.
fn is_separator(text: &str) -> bool {
    separator_regex().is_match(text)
}
