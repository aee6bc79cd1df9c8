//! Progress-callback trait for per-backend extraction events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ExtractionConfigBuilder::progress_callback`] to observe
//! the orchestrator as it walks its backend list.
//!
//! The orchestrator logs through `tracing` regardless; callbacks exist for
//! hosts that want structured events (a CLI spinner, a metrics counter that
//! separates "backend failed" from "backend returned too little text").
//!
//! # Example
//!
//! ```rust
//! use syllabus_extract::{ExtractionConfig, ExtractionProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct FallbackCounter {
//!     fallbacks: AtomicUsize,
//! }
//!
//! impl ExtractionProgressCallback for FallbackCounter {
//!     fn on_backend_insufficient(&self, _backend: &str, _chars: usize) {
//!         self.fallbacks.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let counter = Arc::new(FallbackCounter { fallbacks: AtomicUsize::new(0) });
//!
//! let config = ExtractionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ExtractionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the orchestrator as it tries each backend.
///
/// Implementations must be `Send + Sync` because [`crate::extract_text_async`]
/// runs the pipeline on a blocking worker thread. All methods default to
/// no-ops so callers only override what they care about.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called once the input path has been resolved, before any backend runs.
    fn on_extraction_start(&self, source: &str) {
        let _ = source;
    }

    /// Called just before a backend is invoked.
    ///
    /// # Arguments
    /// * `backend`: backend name (`"lopdf"`, `"pdfium"`, …)
    /// * `attempt`: 1-indexed position in the backend list
    /// * `total`  : number of configured backends
    fn on_backend_start(&self, backend: &str, attempt: usize, total: usize) {
        let _ = (backend, attempt, total);
    }

    /// Called when a backend's text was accepted.
    fn on_backend_accepted(&self, backend: &str, chars: usize) {
        let _ = (backend, chars);
    }

    /// Called when a backend ran but produced too little text to accept.
    fn on_backend_insufficient(&self, backend: &str, chars: usize) {
        let _ = (backend, chars);
    }

    /// Called when a backend could not open or parse the document.
    fn on_backend_failed(&self, backend: &str, error: &str) {
        let _ = (backend, error);
    }

    /// Called once after the orchestrator has resolved.
    ///
    /// `backend` is the name of the backend whose text was returned, or
    /// `None` when extraction failed.
    fn on_extraction_complete(&self, backend: Option<&str>) {
        let _ = backend;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExtractionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCallback {
        events: Mutex<Vec<String>>,
    }

    impl ExtractionProgressCallback for RecordingCallback {
        fn on_backend_start(&self, backend: &str, attempt: usize, total: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {backend} {attempt}/{total}"));
        }

        fn on_backend_failed(&self, backend: &str, error: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("failed {backend}: {error}"));
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_extraction_start("syllabus.pdf");
        cb.on_backend_start("lopdf", 1, 2);
        cb.on_backend_insufficient("lopdf", 12);
        cb.on_backend_accepted("pdfium", 400);
        cb.on_backend_failed("pdfium", "corrupt");
        cb.on_extraction_complete(Some("pdfium"));
    }

    #[test]
    fn overridden_methods_receive_events() {
        let cb = RecordingCallback::default();
        cb.on_backend_start("lopdf", 1, 2);
        cb.on_backend_failed("lopdf", "bad xref");
        // Not overridden: must stay a no-op.
        cb.on_backend_accepted("pdfium", 10);

        let events = cb.events.lock().unwrap();
        assert_eq!(
            *events,
            vec!["start lopdf 1/2".to_string(), "failed lopdf: bad xref".to_string()]
        );
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_backend_start("lopdf", 1, 1);
        cb.on_extraction_complete(None);
    }
}
