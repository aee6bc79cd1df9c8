//! Configuration types for syllabus text extraction.
//!
//! All pipeline behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. The defaults reproduce the production
//! heuristics: a 50-character acceptance threshold for the fast backend and
//! the 100-char / 0.8 printable-ratio / 50-word validation gates.

use crate::error::ExtractError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Characters of prompt excerpt sent to the LLM by default.
pub const DEFAULT_PROMPT_CHAR_LIMIT: usize = 4000;

/// Configuration for one extraction run.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use syllabus_extract::{BackendKind, ExtractionConfig};
///
/// let config = ExtractionConfig::builder()
///     .min_backend_chars(80)
///     .backends(vec![BackendKind::Stream, BackendKind::Layout])
///     .preserve_paragraphs(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Backends to try, in order. Default: `[Stream, Layout]`.
    ///
    /// Every backend except the last must produce more than
    /// `min_backend_chars` trimmed characters to be accepted; the last one is
    /// accepted as long as it produces anything.
    pub backends: Vec<BackendKind>,

    /// Trimmed length a non-final backend must exceed. Default: 50.
    pub min_backend_chars: usize,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Directory holding the platform pdfium library.
    ///
    /// Falls back to `PDFIUM_LIB_PATH`, then to the system library search
    /// path.
    pub pdfium_lib_path: Option<PathBuf>,

    /// Keep paragraph breaks (`\n\n`) when cleaning. Default: false.
    pub preserve_paragraphs: bool,

    /// Gates applied by the content validator.
    pub validation: ValidationThresholds,

    /// Upper bound on syllabus characters embedded in a quiz prompt. Default: 4000.
    pub prompt_char_limit: usize,

    /// Optional observer for per-backend events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            backends: vec![BackendKind::Stream, BackendKind::Layout],
            min_backend_chars: 50,
            password: None,
            pdfium_lib_path: None,
            preserve_paragraphs: false,
            validation: ValidationThresholds::default(),
            prompt_char_limit: DEFAULT_PROMPT_CHAR_LIMIT,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("backends", &self.backends)
            .field("min_backend_chars", &self.min_backend_chars)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pdfium_lib_path", &self.pdfium_lib_path)
            .field("preserve_paragraphs", &self.preserve_paragraphs)
            .field("validation", &self.validation)
            .field("prompt_char_limit", &self.prompt_char_limit)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn backends(mut self, backends: Vec<BackendKind>) -> Self {
        self.config.backends = backends;
        self
    }

    pub fn min_backend_chars(mut self, n: usize) -> Self {
        self.config.min_backend_chars = n;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn pdfium_lib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(path.into());
        self
    }

    pub fn preserve_paragraphs(mut self, v: bool) -> Self {
        self.config.preserve_paragraphs = v;
        self
    }

    pub fn validation(mut self, thresholds: ValidationThresholds) -> Self {
        self.config.validation = thresholds;
        self
    }

    pub fn prompt_char_limit(mut self, n: usize) -> Self {
        self.config.prompt_char_limit = n.max(1);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let c = &self.config;
        if c.backends.is_empty() {
            return Err(ExtractError::InvalidConfig(
                "At least one backend must be configured".into(),
            ));
        }
        let ratio = c.validation.min_printable_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ExtractError::InvalidConfig(format!(
                "Printable ratio must be within 0.0–1.0, got {}",
                ratio
            )));
        }
        Ok(self.config)
    }
}

// ── Enums & thresholds ───────────────────────────────────────────────────

/// Text-extraction strategies known to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Decode page content streams with lopdf. Fast, no native deps.
    Stream,
    /// Ask pdfium for layout-aware page text. Slower, handles more encodings.
    Layout,
}

impl BackendKind {
    /// Stable name used in logs, reports and progress events.
    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Stream => "lopdf",
            BackendKind::Layout => "pdfium",
        }
    }
}

/// Gates used by [`crate::pipeline::validate::assess`].
///
/// All three are independent; text must clear every one. Bounds are
/// exclusive: text of exactly `min_chars` characters is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationThresholds {
    /// Trimmed character count must exceed this. Default: 100.
    pub min_chars: usize,
    /// Printable-or-whitespace share must be at least this. Default: 0.8.
    pub min_printable_ratio: f64,
    /// Whitespace-delimited word count must exceed this. Default: 50.
    pub min_words: usize,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            min_chars: 100,
            min_printable_ratio: 0.8,
            min_words: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_heuristics() {
        let c = ExtractionConfig::default();
        assert_eq!(c.backends, vec![BackendKind::Stream, BackendKind::Layout]);
        assert_eq!(c.min_backend_chars, 50);
        assert_eq!(c.validation.min_chars, 100);
        assert_eq!(c.validation.min_words, 50);
        assert!((c.validation.min_printable_ratio - 0.8).abs() < f64::EPSILON);
        assert_eq!(c.prompt_char_limit, 4000);
    }

    #[test]
    fn builder_rejects_empty_backend_list() {
        let err = ExtractionConfig::builder().backends(vec![]).build().unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_out_of_range_ratio() {
        let err = ExtractionConfig::builder()
            .validation(ValidationThresholds {
                min_printable_ratio: 1.5,
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("1.5"), "got: {err}");
    }

    #[test]
    fn debug_redacts_password() {
        let c = ExtractionConfig::builder().password("hunter2").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn backend_kind_serde_names() {
        let json = serde_json::to_string(&BackendKind::Layout).unwrap();
        assert_eq!(json, "\"layout\"");
        assert_eq!(BackendKind::Stream.name(), "lopdf");
    }
}
