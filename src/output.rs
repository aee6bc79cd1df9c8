//! Result types produced by the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Text a backend pulled out of a document, one entry per page that had any.
///
/// Every entry is trimmed and non-empty; pages with no text (or whose text
/// could not be decoded) are omitted, so `pages.len() <= page_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Trimmed, non-empty page strings in document order.
    pub pages: Vec<String>,
    /// Number of pages the backend found in the document.
    pub page_count: usize,
}

impl PageText {
    /// Build from raw per-page strings, trimming and dropping empty entries.
    pub fn from_raw_pages<I, S>(raw: I, page_count: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pages = raw
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self { pages, page_count }
    }

    /// Pages joined with a single newline.
    pub fn joined(&self) -> String {
        self.pages.join("\n")
    }

    /// Pages that were present in the document but yielded no text.
    pub fn skipped_pages(&self) -> usize {
        self.page_count.saturating_sub(self.pages.len())
    }
}

/// What happened when the orchestrator tried one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The backend's text was returned to the caller.
    Accepted { chars: usize },
    /// The backend ran but its trimmed text did not clear the threshold.
    Insufficient { chars: usize },
    /// The backend could not open or parse the document.
    Failed { error: String },
}

/// One entry in the orchestrator's attempt log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendAttempt {
    /// Backend name (`"lopdf"`, `"pdfium"`, or a custom backend's name).
    pub backend: String,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
    /// Wall-clock time spent in the backend.
    pub duration_ms: u64,
}

/// Successful orchestrator result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    /// Newline-joined page text from the accepted backend. Never blank.
    pub text: String,
    /// Name of the backend whose text was accepted.
    pub backend: String,
    /// Pages found by the accepted backend.
    pub page_count: usize,
    /// Pages the accepted backend found but could not get text from.
    pub skipped_pages: usize,
    /// Every backend tried, in order.
    pub attempts: Vec<BackendAttempt>,
    pub total_duration_ms: u64,
}

/// Cleaned, validated syllabus text ready to be stored or sent to the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedSyllabus {
    /// Output of the text normaliser.
    pub text: String,
    pub char_count: usize,
    pub word_count: usize,
    /// How the raw text was obtained.
    pub extraction: ExtractionOutput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_pages_trims_and_skips_empty() {
        let pt = PageText::from_raw_pages(["  intro \n", "", "   ", "week 1"], 4);
        assert_eq!(pt.pages, vec!["intro", "week 1"]);
        assert_eq!(pt.skipped_pages(), 2);
        assert_eq!(pt.joined(), "intro\nweek 1");
    }

    #[test]
    fn empty_page_text_joins_to_empty_string() {
        let pt = PageText::default();
        assert_eq!(pt.joined(), "");
        assert_eq!(pt.skipped_pages(), 0);
    }

    #[test]
    fn attempt_serialises_flat() {
        let attempt = BackendAttempt {
            backend: "lopdf".into(),
            outcome: AttemptOutcome::Insufficient { chars: 12 },
            duration_ms: 3,
        };
        let json = serde_json::to_value(&attempt).unwrap();
        assert_eq!(json["backend"], "lopdf");
        assert_eq!(json["outcome"], "insufficient");
        assert_eq!(json["chars"], 12);
    }
}
