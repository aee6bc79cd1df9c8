//! Prompts for generating multiple-choice quizzes from syllabus text.
//!
//! The extractor does not call a model itself; these builders exist so that
//! whatever service does make the call sends the same instructions every
//! time, and so the response format [`crate::questions::parse_questions`]
//! expects is written down next to the parser that enforces it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How hard the generated questions should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{other}' (expected easy, medium or hard)"
            )),
        }
    }
}

/// The first `max_chars` characters of `text`.
///
/// Cuts on a char boundary, so multi-byte text never panics.
pub fn prompt_excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// System prompt asking for `num_questions` questions as a bare JSON array.
pub fn quiz_system_prompt(num_questions: usize, difficulty: Difficulty) -> String {
    format!(
        r#"You are an expert educator creating multiple choice questions from academic syllabi.
Create {num_questions} multiple choice questions at {difficulty} difficulty level.

Requirements:
- Each question must have exactly 4 options
- Exactly one option is correct
- Questions should test understanding, not just memorization
- Cover different topics from the syllabus
- Make questions clear and unambiguous

Return ONLY a valid JSON array with this exact format:
[
  {{
    "question": "Question text here?",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "correct_answer": "Option A"
  }}
]

"correct_answer" must repeat one of the options word for word.
Do not include any additional text or explanation, just the JSON array."#
    )
}

/// User prompt carrying the syllabus, cut to `max_chars` characters.
pub fn quiz_user_prompt(syllabus_text: &str, num_questions: usize, max_chars: usize) -> String {
    format!(
        "Based on the following syllabus content, create {} multiple choice questions:\n\n\
         SYLLABUS CONTENT:\n{}\n\n\
         Generate the questions now.",
        num_questions,
        prompt_excerpt(syllabus_text, max_chars)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_shorter_than_limit_is_unchanged() {
        assert_eq!(prompt_excerpt("abc", 10), "abc");
        assert_eq!(prompt_excerpt("", 10), "");
    }

    #[test]
    fn excerpt_counts_chars_not_bytes() {
        let text = "é".repeat(10);
        let cut = prompt_excerpt(&text, 4);
        assert_eq!(cut.chars().count(), 4);
        assert_eq!(cut.len(), 8);
    }

    #[test]
    fn system_prompt_mentions_count_and_difficulty() {
        let p = quiz_system_prompt(7, Difficulty::Hard);
        assert!(p.contains("Create 7 multiple choice questions at hard difficulty"));
        assert!(p.contains("\"correct_answer\""));
        // The format braces must come out literal.
        assert!(p.contains("[\n  {\n"));
    }

    #[test]
    fn user_prompt_is_truncated() {
        let syllabus = format!("{}TAIL", "x".repeat(4000));
        let p = quiz_user_prompt(&syllabus, 10, 4000);
        assert!(p.contains(&"x".repeat(4000)));
        assert!(!p.contains("TAIL"));
        assert!(p.starts_with("Based on the following syllabus content, create 10"));
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default().to_string(), "medium");
    }
}
