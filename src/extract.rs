//! Extraction entry points and the backend fallback orchestrator.
//!
//! ## Fallback policy
//!
//! Backends run in configured order (lopdf, then pdfium by default):
//!
//! - a non-final backend is accepted only if its trimmed text is longer than
//!   `min_backend_chars`; anything else (short text, or an error, which is
//!   logged and dropped) moves on to the next backend;
//! - the final backend is accepted if it produced any text at all; if it
//!   errors, that error becomes the `source` of
//!   [`ExtractError::ExtractionFailed`].
//!
//! Each attempt is recorded as a [`BackendAttempt`] so callers can tell a
//! document lopdf choked on from one it read but found nearly empty, even
//! though both take the same path through the fallback.

use crate::config::ExtractionConfig;
use crate::error::{BackendError, ExtractError};
use crate::output::{AttemptOutcome, BackendAttempt, ExtractionOutput, PageText, PreparedSyllabus};
use crate::pipeline::backend::{build_backends, TextBackend};
use crate::pipeline::input::{self, RawDocument, ResolvedInput};
use crate::pipeline::{normalize, validate};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs a fixed, ordered list of backends against a document.
pub struct Extractor {
    backends: Vec<Box<dyn TextBackend>>,
    config: ExtractionConfig,
}

impl Extractor {
    /// Build the backends named in `config.backends`.
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            backends: build_backends(config),
            config: config.clone(),
        }
    }

    /// Use caller-supplied backends instead of the configured kinds.
    pub fn with_backends(backends: Vec<Box<dyn TextBackend>>, config: &ExtractionConfig) -> Self {
        Self {
            backends,
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract text from the file at `path`.
    ///
    /// # Errors
    /// - [`ExtractError::DocumentNotFound`] before any backend runs if the
    ///   path is not an existing file
    /// - [`ExtractError::ExtractionFailed`] if no backend produced usable text
    pub fn extract(&self, path: impl AsRef<Path>) -> Result<ExtractionOutput, ExtractError> {
        let resolved = input::resolve_local(path)?;
        self.extract_resolved(&resolved)
    }

    /// Extract text from an in-memory document via a scoped temp file.
    pub fn extract_bytes(&self, doc: &RawDocument) -> Result<ExtractionOutput, ExtractError> {
        let resolved = input::spill_to_temp(doc)?;
        self.extract_resolved(&resolved)
        // `resolved` drops here and deletes the temp file.
    }

    fn extract_resolved(&self, resolved: &ResolvedInput) -> Result<ExtractionOutput, ExtractError> {
        let total_start = Instant::now();
        let path = resolved.path();
        let source = resolved.describe();
        info!("Extracting text: {}", source);

        let cb = self.config.progress_callback.as_ref();
        if let Some(cb) = cb {
            cb.on_extraction_start(&source);
        }

        let result = self.run_backends(path, &source);

        if let Some(cb) = cb {
            cb.on_extraction_complete(result.as_ref().ok().map(|o| o.backend.as_str()));
        }

        result.map(|mut output| {
            output.total_duration_ms = total_start.elapsed().as_millis() as u64;
            info!(
                "Extracted {} chars from {} using {} in {}ms",
                output.text.chars().count(),
                source,
                output.backend,
                output.total_duration_ms
            );
            output
        })
    }

    fn run_backends(&self, path: &Path, source: &str) -> Result<ExtractionOutput, ExtractError> {
        let cb = self.config.progress_callback.as_ref();
        let total = self.backends.len();
        let mut attempts = Vec::with_capacity(total);

        for (i, backend) in self.backends.iter().enumerate() {
            let name = backend.name().to_string();
            let is_last = i + 1 == total;
            if let Some(cb) = cb {
                cb.on_backend_start(&name, i + 1, total);
            }

            let started = Instant::now();
            let result = backend.extract(path);
            let duration_ms = started.elapsed().as_millis() as u64;

            match result {
                Ok(pages) => {
                    let text = pages.joined();
                    let chars = text.trim().chars().count();
                    let accepted = if is_last {
                        chars > 0
                    } else {
                        chars > self.config.min_backend_chars
                    };

                    if accepted {
                        debug!("{}: accepted {} chars", name, chars);
                        if let Some(cb) = cb {
                            cb.on_backend_accepted(&name, chars);
                        }
                        attempts.push(BackendAttempt {
                            backend: name.clone(),
                            outcome: AttemptOutcome::Accepted { chars },
                            duration_ms,
                        });
                        return Ok(build_output(text, name, &pages, attempts));
                    }

                    info!(
                        "{}: {} chars of text from {}, not enough to accept",
                        name, chars, source
                    );
                    if let Some(cb) = cb {
                        cb.on_backend_insufficient(&name, chars);
                    }
                    attempts.push(BackendAttempt {
                        backend: name,
                        outcome: AttemptOutcome::Insufficient { chars },
                        duration_ms,
                    });
                }
                Err(e) => {
                    if let Some(cb) = cb {
                        cb.on_backend_failed(&name, &e.to_string());
                    }
                    attempts.push(BackendAttempt {
                        backend: name.clone(),
                        outcome: AttemptOutcome::Failed {
                            error: e.to_string(),
                        },
                        duration_ms,
                    });

                    if is_last {
                        warn!("{}: final backend failed on {}: {}", name, source, e);
                        return Err(final_backend_failed(path, e));
                    }
                    warn!("{}: extraction failed on {}, falling back: {}", name, source, e);
                }
            }
        }

        Err(ExtractError::ExtractionFailed {
            path: path.to_path_buf(),
            reason: "no text could be extracted".into(),
            source: None,
        })
    }
}

fn build_output(
    text: String,
    backend: String,
    pages: &PageText,
    attempts: Vec<BackendAttempt>,
) -> ExtractionOutput {
    ExtractionOutput {
        text,
        backend,
        page_count: pages.page_count,
        skipped_pages: pages.skipped_pages(),
        attempts,
        total_duration_ms: 0,
    }
}

fn final_backend_failed(path: &Path, e: BackendError) -> ExtractError {
    ExtractError::ExtractionFailed {
        path: path.to_path_buf(),
        reason: format!("{} backend failed", e.backend()),
        source: Some(e),
    }
}

// ── Public entry points ──────────────────────────────────────────────────

/// Extract raw text from the PDF at `path`.
///
/// Page texts from the accepted backend are trimmed and joined with `\n`.
/// The result is never empty or all-whitespace.
///
/// This is blocking; use [`extract_text_async`] from async code.
pub fn extract_text(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<String, ExtractError> {
    Extractor::new(config).extract(path).map(|o| o.text)
}

/// Extract raw text from an in-memory document.
///
/// The bytes are written to a temp file that is removed before this returns.
pub fn extract_from_bytes(
    doc: &RawDocument,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    Extractor::new(config).extract_bytes(doc)
}

/// Run [`extract_text`] on tokio's blocking thread pool.
///
/// PDF parsing is CPU-bound and neither backend yields, so calling the
/// blocking API from an async handler would stall a runtime worker.
pub async fn extract_text_async(
    path: impl Into<PathBuf>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let path = path.into();
    let config = config.clone();

    tokio::task::spawn_blocking(move || Extractor::new(&config).extract(&path))
        .await
        .map_err(|e| ExtractError::Internal(format!("Extraction task panicked: {}", e)))?
}

/// Extract, clean and validate a syllabus.
///
/// # Errors
/// Everything [`extract_text`] returns, plus
/// [`ExtractError::InsufficientContent`] when the cleaned text fails the
/// validator.
pub fn prepare_syllabus(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<PreparedSyllabus, ExtractError> {
    let extraction = Extractor::new(config).extract(path)?;
    finish_preparation(extraction, config)
}

/// [`prepare_syllabus`] for an in-memory document.
pub fn prepare_syllabus_from_bytes(
    doc: &RawDocument,
    config: &ExtractionConfig,
) -> Result<PreparedSyllabus, ExtractError> {
    let extraction = Extractor::new(config).extract_bytes(doc)?;
    finish_preparation(extraction, config)
}

/// Clean and validate an orchestrator result.
pub fn finish_preparation(
    extraction: ExtractionOutput,
    config: &ExtractionConfig,
) -> Result<PreparedSyllabus, ExtractError> {
    let text = normalize::clean_with(&extraction.text, config.preserve_paragraphs);

    let verdict = validate::assess(&text, &config.validation);
    if !verdict.is_accepted() {
        warn!("Rejecting syllabus text: {}", verdict);
        return Err(ExtractError::InsufficientContent {
            reason: verdict.to_string(),
        });
    }

    Ok(PreparedSyllabus {
        char_count: text.chars().count(),
        word_count: validate::word_count(&text),
        text,
        extraction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Fixed {
        name: &'static str,
        result: Result<Vec<&'static str>, BackendError>,
        calls: Arc<AtomicUsize>,
    }

    impl TextBackend for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn extract(&self, _path: &Path) -> Result<PageText, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .map(|pages| PageText::from_raw_pages(pages.clone(), pages.len()))
        }
    }

    fn fixed(
        name: &'static str,
        result: Result<Vec<&'static str>, BackendError>,
    ) -> (Box<dyn TextBackend>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Box::new(Fixed {
                name,
                result,
                calls: Arc::clone(&calls),
            }),
            calls,
        )
    }

    #[test]
    fn single_backend_is_final_and_needs_only_some_text() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let (only, _) = fixed("only", Ok(vec!["short"]));
        let extractor = Extractor::with_backends(vec![only], &ExtractionConfig::default());
        let out = extractor.extract(tmp.path()).unwrap();
        assert_eq!(out.text, "short");
    }

    #[test]
    fn insufficient_then_failed_records_both_attempts() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let (a, _) = fixed("a", Ok(vec!["tiny"]));
        let (b, _) = fixed(
            "b",
            Err(BackendError::Corrupt {
                backend: "b",
                detail: "xref".into(),
            }),
        );
        let extractor = Extractor::with_backends(vec![a, b], &ExtractionConfig::default());
        let err = extractor.extract(tmp.path()).unwrap_err();
        match err {
            ExtractError::ExtractionFailed { source, .. } => {
                assert!(matches!(source, Some(BackendError::Corrupt { .. })));
            }
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }

    #[test]
    fn finish_preparation_rejects_thin_text() {
        let extraction = build_output(
            "Syllabus #1".into(),
            "lopdf".into(),
            &PageText::default(),
            vec![],
        );
        let err = finish_preparation(extraction, &ExtractionConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractError::InsufficientContent { .. }));
        assert!(err.to_string().contains("insufficient"));
    }

    #[test]
    fn finish_preparation_cleans_before_counting() {
        let raw = (0..60)
            .map(|i| format!("topic{i} ***"))
            .collect::<Vec<_>>()
            .join("\n");
        let extraction = build_output(raw, "pdfium".into(), &PageText::default(), vec![]);
        let prepared = finish_preparation(extraction, &ExtractionConfig::default()).unwrap();
        assert!(!prepared.text.contains('*'));
        assert!(!prepared.text.contains('\n'));
        assert_eq!(prepared.word_count, 60);
        assert_eq!(prepared.extraction.backend, "pdfium");
    }
}
