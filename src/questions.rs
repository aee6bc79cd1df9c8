//! Parsing and validating a model's quiz response.
//!
//! Models asked for "ONLY a JSON array" still wrap it in a ```` ```json ````
//! fence often enough that the fence is stripped before parsing. After that
//! the response is held to the format in [`crate::prompts::quiz_system_prompt`]:
//! every question has all three fields, exactly four options, and an answer
//! that is one of them.

use crate::prompts::Difficulty;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of options every question must carry.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Always equal to one of `options`.
    pub correct_answer: String,
}

/// Why a quiz response was rejected. Question numbers are 1-based.
#[derive(Debug, Error)]
pub enum QuestionParseError {
    #[error("response is not a JSON array of questions: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response contained no questions")]
    Empty,

    #[error("question {number} is missing '{field}'")]
    MissingField { number: usize, field: &'static str },

    #[error("question {number} has {count} options, expected 4")]
    WrongOptionCount { number: usize, count: usize },

    #[error("question {number}: correct answer is not one of the options")]
    AnswerNotInOptions { number: usize },
}

#[derive(Deserialize)]
struct RawQuestion {
    question: Option<String>,
    options: Option<Vec<String>>,
    correct_answer: Option<String>,
}

static RE_FENCE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```(?:json)?").unwrap());
static RE_FENCE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```$").unwrap());

/// Strip a leading ```` ```json ```` and a trailing ```` ``` ````, each on
/// its own, so a response cut off before its closing fence still parses.
fn strip_json_fence(input: &str) -> &str {
    let mut body = input.trim();
    if let Some(m) = RE_FENCE_OPEN.find(body) {
        body = &body[m.end()..];
    }
    if let Some(m) = RE_FENCE_CLOSE.find(body) {
        body = &body[..m.start()];
    }
    body.trim()
}

/// Parse a model response into at most `limit` questions.
///
/// Any invalid question rejects the whole response; a partially usable quiz
/// is treated the same as an unusable one.
pub fn parse_questions(response: &str, limit: usize) -> Result<Vec<QuizQuestion>, QuestionParseError> {
    let body = strip_json_fence(response);
    let raw: Vec<RawQuestion> = serde_json::from_str(body)?;
    if raw.is_empty() {
        return Err(QuestionParseError::Empty);
    }

    let mut questions = Vec::with_capacity(raw.len().min(limit));
    for (i, q) in raw.into_iter().enumerate() {
        let number = i + 1;
        let question = q.question.ok_or(QuestionParseError::MissingField {
            number,
            field: "question",
        })?;
        let options = q.options.ok_or(QuestionParseError::MissingField {
            number,
            field: "options",
        })?;
        let correct_answer = q.correct_answer.ok_or(QuestionParseError::MissingField {
            number,
            field: "correct_answer",
        })?;

        if options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionParseError::WrongOptionCount {
                number,
                count: options.len(),
            });
        }
        if !options.contains(&correct_answer) {
            return Err(QuestionParseError::AnswerNotInOptions { number });
        }

        questions.push(QuizQuestion {
            question,
            options,
            correct_answer,
        });
    }

    questions.truncate(limit);
    Ok(questions)
}

/// A placeholder quiz for when the model's response cannot be used.
///
/// Deterministic: the same count and difficulty always give the same
/// questions, each of which passes the checks in [`parse_questions`].
pub fn fallback_questions(num_questions: usize, difficulty: Difficulty) -> Vec<QuizQuestion> {
    let correct = format!("Concept related to {difficulty} level understanding");
    (1..=num_questions)
        .map(|n| QuizQuestion {
            question: format!(
                "Based on the syllabus content, which of the following is most relevant \
                 to the topic discussed? (Question {n})"
            ),
            options: vec![
                correct.clone(),
                "Basic principle from the syllabus material".to_string(),
                "Advanced topic requiring deeper knowledge".to_string(),
                "Fundamental concept from the course content".to_string(),
            ],
            correct_answer: correct.clone(),
        })
        .collect()
}
