//! Title canonicalization and text cleanup shared by every source.
//!
//! The three sources spell episode titles differently (casing, quoting, embedded
//! broadcast dates). [`canonicalize`] is the only join key: every title from every
//! source goes through it before rows are correlated.

use std::sync::LazyLock;

use regex::Regex;

static PARENTHESIZED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\(.*?\)").unwrap());

static FIRST_PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)").unwrap());

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Map a raw title to its canonical join key.
///
/// Lowercases, drops parenthesized substrings (embedded air dates and similar
/// metadata), removes punctuation and collapses whitespace. Total and idempotent.
#[must_use]
pub fn canonicalize(raw_title: &str) -> String {
    let lowered = raw_title.to_lowercase();
    let without_parens = PARENTHESIZED.replace_all(lowered.trim(), "");
    let without_punct = NON_WORD.replace_all(&without_parens, "");
    WHITESPACE_RUN.replace_all(&without_punct, " ").trim().to_owned()
}

/// Remove every parenthesized substring, keeping the rest of the text untouched.
#[must_use]
pub fn strip_parenthesized(text: &str) -> String {
    PARENTHESIZED.replace_all(text, "").into_owned()
}

/// Contents of the first `( ... )` group, trimmed.
#[must_use]
pub fn first_parenthesized(text: &str) -> Option<&str> {
    FIRST_PARENTHESIZED.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str().trim())
}

/// Drop double quote characters anywhere, and single quotes wrapping the whole text.
///
/// Apostrophes inside a word (`Winter's`) survive.
#[must_use]
pub fn strip_quotes(text: &str) -> String {
    let without_double: String =
        text.chars().filter(|c| !matches!(c, '"' | '\u{201c}' | '\u{201d}')).collect();
    let trimmed = without_double.trim();
    trimmed
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(trimmed)
        .to_owned()
}

/// Title-case a string: the first letter of every word is upper-cased, the rest lower-cased.
///
/// An apostrophe does not start a new word, so `winter's` becomes `Winter's`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}');
        }
    }
    out
}

/// Collapse internal whitespace runs and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_strips_trailing_date() {
        assert_eq!(
            canonicalize("Mountain Stream (Jan 1, 1983)"),
            canonicalize("mountain stream")
        );
        assert_eq!(canonicalize("Mountain Stream (Jan 1, 1983)"), "mountain stream");
    }

    #[test]
    fn canonicalize_ignores_case_whitespace_and_punctuation() {
        assert_eq!(canonicalize("  \"A Walk in the Woods\"  "), "a walk in the woods");
        assert_eq!(canonicalize("MT. MCKINLEY"), "mt mckinley");
        assert_eq!(canonicalize("Winter's   Peace!"), "winters peace");
    }

    #[test]
    fn canonicalize_handles_parenthetical_in_the_middle() {
        assert_eq!(canonicalize("Lake (Special) At Dusk"), "lake at dusk");
        assert_eq!(canonicalize("(Bonus) Ocean Sunset"), "ocean sunset");
    }

    #[test]
    fn canonicalize_unclosed_parenthesis_is_punctuation() {
        assert_eq!(canonicalize("Quiet Pond (Jan 5"), "quiet pond jan 5");
    }

    #[test]
    fn canonicalize_is_total_on_degenerate_input() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("   "), "");
        assert_eq!(canonicalize("(only a date)"), "");
        assert_eq!(canonicalize("!!!"), "");
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let samples = [
            "Mountain Stream (Jan 1, 1983)",
            "  \"A Walk in the Woods\"  ",
            "(intro) mountain",
            "mountain stream !",
            "Lake (Special) At Dusk",
            "Quiet Pond (Jan 5",
            "Été à la Montagne",
            "tabs\tand\nnewlines",
            "",
        ];
        for sample in samples {
            let once = canonicalize(sample);
            assert_eq!(canonicalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn canonicalize_keeps_unicode_word_characters() {
        assert_eq!(canonicalize("Été à la Montagne"), "été à la montagne");
    }

    #[test]
    fn first_parenthesized_returns_first_group_only() {
        assert_eq!(first_parenthesized("Title (January 11, 1983) (rerun)"), Some("January 11, 1983"));
        assert_eq!(first_parenthesized("No date here"), None);
    }

    #[test]
    fn strip_parenthesized_removes_groups_and_leading_space() {
        assert_eq!(strip_parenthesized("Meadow Lake (Feb 1, 1983)"), "Meadow Lake");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("a walk in the woods"), "A Walk In The Woods");
        assert_eq!(title_case("MT. MCKINLEY"), "Mt. Mckinley");
        assert_eq!(title_case("winter's peace"), "Winter's Peace");
        assert_eq!(title_case("lake-side cabin"), "Lake-Side Cabin");
    }

    #[test]
    fn strip_quotes_removes_straight_and_curly_quotes() {
        assert_eq!(strip_quotes("\"\"\"A WALK\"\"\""), "A WALK");
        assert_eq!(strip_quotes("\u{201c}Ocean\u{201d}"), "Ocean");
        assert_eq!(strip_quotes("'Winter's Peace'"), "Winter's Peace");
        assert_eq!(strip_quotes("Winter's Peace"), "Winter's Peace");
    }
}
