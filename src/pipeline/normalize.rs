//! Normalisation: deterministic cleanup of extracted text before it is
//! stored or embedded in an LLM prompt.
//!
//! PDF text comes out with hard line wraps, column gutters rendered as runs
//! of spaces, ligature and bullet glyphs, and stray symbols from headers and
//! footers. None of it helps the model write questions, and all of it costs
//! tokens.
//!
//! ## Rule Order
//!
//! 1. Collapse whitespace runs to a single space (paragraph mode: keep
//!    blank-line breaks as `\n\n`, collapse everything else)
//! 2. Collapse repeated blank lines (only has an effect in paragraph mode)
//! 3. Strip everything except word characters, whitespace and
//!    `. , ; : ! ? - ( ) [ ] { } ' " /`
//! 4. Trim
//!
//! Step 3 can leave two spaces where a symbol sat between words, so the
//! whitespace rules run again before the final trim. That keeps
//! `clean(clean(x)) == clean(x)`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Clean extracted text with the default (single-line) whitespace rules.
pub fn clean(text: &str) -> String {
    clean_with(text, false)
}

/// Clean extracted text, optionally keeping paragraph breaks.
///
/// Total and pure: never fails, same input always gives the same output.
/// Returns an empty string when nothing survives stripping.
pub fn clean_with(text: &str, preserve_paragraphs: bool) -> String {
    let s = collapse(text, preserve_paragraphs);
    let s = strip_disallowed(&s);
    collapse(&s, preserve_paragraphs).trim().to_string()
}

fn collapse(input: &str, preserve_paragraphs: bool) -> String {
    if preserve_paragraphs {
        collapse_paragraphs(input)
    } else {
        let s = collapse_whitespace(input);
        collapse_blank_lines(&s)
    }
}

// ── Rule 1: Collapse whitespace ──────────────────────────────────────────────

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn collapse_whitespace(input: &str) -> String {
    RE_WHITESPACE.replace_all(input, " ").into_owned()
}

// ── Rule 2: Collapse blank lines ─────────────────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").into_owned()
}

/// Paragraph mode: split on blank lines first, then collapse inside each
/// paragraph so the breaks survive.
fn collapse_paragraphs(input: &str) -> String {
    RE_BLANK_LINES
        .split(input)
        .map(|para| collapse_whitespace(para).trim().to_string())
        .filter(|para| !para.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ── Rule 3: Strip disallowed characters ──────────────────────────────────────

static RE_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^\w\s.,;:!?()\[\]{}'"/-]"#).unwrap());

fn strip_disallowed(input: &str) -> String {
    RE_DISALLOWED.replace_all(input, "").into_owned()
}
