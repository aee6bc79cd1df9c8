//! Content validation: is this text substantive enough to build a quiz from?
//!
//! Three independent gates, checked in order, first failure wins:
//!
//! 1. trimmed length must exceed `min_chars` (default 100)
//! 2. printable-or-whitespace share must be at least `min_printable_ratio`
//!    (default 0.8); catches binary garbage decoded as text
//! 3. whitespace-delimited word count must exceed `min_words` (default 50)
//!
//! Character counts are Unicode scalar values, not bytes.

use crate::config::ValidationThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Which gate, if any, rejected a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ContentVerdict {
    Accepted,
    TooShort { chars: usize },
    Unprintable { ratio: f64 },
    TooFewWords { words: usize },
}

impl ContentVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ContentVerdict::Accepted)
    }
}

impl fmt::Display for ContentVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentVerdict::Accepted => write!(f, "accepted"),
            ContentVerdict::TooShort { chars } => {
                write!(f, "only {chars} characters of text")
            }
            ContentVerdict::Unprintable { ratio } => {
                write!(f, "only {:.0}% of characters are printable", ratio * 100.0)
            }
            ContentVerdict::TooFewWords { words } => write!(f, "only {words} words of text"),
        }
    }
}

/// `true` when `text` clears every default gate.
pub fn is_valid(text: &str) -> bool {
    assess(text, &ValidationThresholds::default()).is_accepted()
}

/// Run the gates in order and report the first one that fails.
pub fn assess(text: &str, thresholds: &ValidationThresholds) -> ContentVerdict {
    let trimmed_chars = text.trim().chars().count();
    if trimmed_chars <= thresholds.min_chars {
        return ContentVerdict::TooShort {
            chars: trimmed_chars,
        };
    }

    let ratio = printable_ratio(text);
    if ratio < thresholds.min_printable_ratio {
        return ContentVerdict::Unprintable { ratio };
    }

    let words = word_count(text);
    if words <= thresholds.min_words {
        return ContentVerdict::TooFewWords { words };
    }

    ContentVerdict::Accepted
}

/// Share of characters that are printable or whitespace. `1.0` for empty input.
pub fn printable_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut printable = 0usize;
    for c in text.chars() {
        total += 1;
        if c.is_whitespace() || is_printable(c) {
            printable += 1;
        }
    }
    if total == 0 {
        return 1.0;
    }
    printable as f64 / total as f64
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Control, format, surrogate, private-use and unassigned code points are
/// unprintable; every other general category prints.
fn is_printable(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize, word: &str) -> String {
        vec![word; n].join(" ")
    }

    #[test]
    fn empty_is_invalid() {
        assert!(!is_valid(""));
        assert!(!is_valid("   \n\t "));
    }

    #[test]
    fn length_boundary_is_exclusive() {
        let t = ValidationThresholds {
            min_words: 0,
            ..Default::default()
        };
        assert_eq!(
            assess(&"a".repeat(100), &t),
            ContentVerdict::TooShort { chars: 100 }
        );
        assert_eq!(assess(&"a".repeat(101), &t), ContentVerdict::Accepted);
    }

    #[test]
    fn hundred_one_chars_fifty_one_words_is_valid() {
        // 50 two-letter words + one single letter = 101 non-whitespace chars.
        let text = format!("{} z", words(50, "ab"));
        assert_eq!(text.split_whitespace().collect::<String>().len(), 101);
        assert_eq!(word_count(&text), 51);
        assert!(is_valid(&text));
    }

    #[test]
    fn fifty_words_is_invalid() {
        let text = words(50, "syllabus");
        assert!(text.trim().chars().count() > 100);
        assert_eq!(
            assess(&text, &ValidationThresholds::default()),
            ContentVerdict::TooFewWords { words: 50 }
        );
    }

    #[test]
    fn control_garbage_is_invalid() {
        let mut text = words(60, "topic");
        text.push_str(&"\u{0001}\u{E001}".repeat(200));
        match assess(&text, &ValidationThresholds::default()) {
            ContentVerdict::Unprintable { ratio } => assert!(ratio < 0.8),
            other => panic!("expected Unprintable, got {other:?}"),
        }
    }

    #[test]
    fn zero_width_space_flood_is_invalid() {
        let mut text = words(60, "topic");
        text.push_str(&"\u{200B}".repeat(200));
        match assess(&text, &ValidationThresholds::default()) {
            ContentVerdict::Unprintable { ratio } => assert!((ratio - 359.0 / 559.0).abs() < 1e-9),
            other => panic!("expected Unprintable, got {other:?}"),
        }
        assert!(!is_valid(&text));
    }

    #[test]
    fn format_characters_are_unprintable() {
        assert_eq!(printable_ratio("\u{00AD}\u{FEFF}"), 0.0);
        assert_eq!(printable_ratio("a\u{E000}"), 0.5);
        // Unassigned code point.
        assert_eq!(printable_ratio("\u{0378}"), 0.0);
    }

    #[test]
    fn replacement_character_flood_is_printable() {
        let mut text = words(60, "topic");
        text.push_str(&"\u{FFFD}".repeat(200));
        assert_eq!(printable_ratio(&text), 1.0);
        assert!(is_valid(&text));
    }

    #[test]
    fn whitespace_counts_as_printable() {
        assert_eq!(printable_ratio("a\tb\nc"), 1.0);
        assert_eq!(printable_ratio(""), 1.0);
    }

    #[test]
    fn unicode_length_counts_chars_not_bytes() {
        let t = ValidationThresholds {
            min_words: 0,
            ..Default::default()
        };
        // 100 two-byte chars: 200 bytes, still too short.
        assert_eq!(
            assess(&"é".repeat(100), &t),
            ContentVerdict::TooShort { chars: 100 }
        );
    }

    #[test]
    fn is_valid_is_deterministic() {
        let text = words(80, "lecture");
        assert_eq!(is_valid(&text), is_valid(&text));
        assert!(is_valid(&text));
    }

    #[test]
    fn verdict_display_is_human_readable() {
        let v = ContentVerdict::TooFewWords { words: 12 };
        assert_eq!(v.to_string(), "only 12 words of text");
    }
}
