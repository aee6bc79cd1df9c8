//! Error types for the syllabus-extract library.
//!
//! Two distinct error types reflect two distinct failure scopes:
//!
//! * [`ExtractError`]: **Caller-visible**: the pipeline could not produce
//!   usable text (missing file, every backend exhausted, content too thin to
//!   build a quiz from). Returned as `Err(ExtractError)` from the top-level
//!   `extract*` and [`crate::prepare_syllabus`] functions.
//!
//! * [`BackendError`]: **Backend-local**: one extraction strategy could not
//!   open or parse the document. The orchestrator swallows it and moves on to
//!   the next backend; only when the last backend fails does it surface, as
//!   the `source` of [`ExtractError::ExtractionFailed`].
//!
//! Page-level glitches are neither: backends skip the page and keep going.

use std::path::PathBuf;
use thiserror::Error;

/// All caller-visible errors returned by the syllabus-extract library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'")]
    DocumentNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// Every backend was tried and none produced usable text.
    ///
    /// `source` is set when the final backend failed outright rather than
    /// returning empty text.
    #[error("Failed to extract text from '{path}': {reason}")]
    ExtractionFailed {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<BackendError>,
    },

    /// Text was extracted but is not substantive enough to generate a quiz.
    #[error("Syllabus content insufficient: {reason}")]
    InsufficientContent { reason: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A single backend could not open or parse the document at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The bytes are not a parseable PDF (bad header, broken xref, truncated).
    #[error("{backend}: document could not be parsed: {detail}")]
    Corrupt {
        backend: &'static str,
        detail: String,
    },

    /// The PDF is encrypted and no password was configured.
    #[error("{backend}: document is encrypted and requires a password")]
    PasswordRequired { backend: &'static str },

    /// A password was configured but the document rejected it.
    #[error("{backend}: wrong password")]
    WrongPassword { backend: &'static str },

    /// The native library behind the backend could not be loaded.
    #[error("{backend}: library unavailable: {detail}")]
    LibraryUnavailable {
        backend: &'static str,
        detail: String,
    },

    /// Reading the file failed.
    #[error("{backend}: I/O error: {detail}")]
    Io {
        backend: &'static str,
        detail: String,
    },
}

impl BackendError {
    /// Name of the backend that raised this error.
    pub fn backend(&self) -> &'static str {
        match self {
            BackendError::Corrupt { backend, .. }
            | BackendError::PasswordRequired { backend }
            | BackendError::WrongPassword { backend }
            | BackendError::LibraryUnavailable { backend, .. }
            | BackendError::Io { backend, .. } => *backend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn not_found_display() {
        let e = ExtractError::DocumentNotFound {
            path: PathBuf::from("/tmp/missing.pdf"),
        };
        assert!(e.to_string().contains("/tmp/missing.pdf"), "got: {e}");
    }

    #[test]
    fn extraction_failed_exposes_backend_source() {
        let e = ExtractError::ExtractionFailed {
            path: PathBuf::from("a.pdf"),
            reason: "layout backend failed".into(),
            source: Some(BackendError::PasswordRequired { backend: "pdfium" }),
        };
        let source = e.source().expect("source should be attached");
        assert!(source.to_string().contains("pdfium"));
        assert!(source.to_string().contains("password"));
    }

    #[test]
    fn extraction_failed_without_source() {
        let e = ExtractError::ExtractionFailed {
            path: PathBuf::from("a.pdf"),
            reason: "no text could be extracted".into(),
            source: None,
        };
        assert!(e.source().is_none());
        assert!(e.to_string().contains("no text could be extracted"));
    }

    #[test]
    fn backend_name_accessor() {
        let e = BackendError::Corrupt {
            backend: "lopdf",
            detail: "invalid file header".into(),
        };
        assert_eq!(e.backend(), "lopdf");
        assert!(e.to_string().starts_with("lopdf:"));
    }
}
