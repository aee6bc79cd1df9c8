//! The contract shared by every text-extraction strategy.

use crate::config::{BackendKind, ExtractionConfig};
use crate::error::BackendError;
use crate::output::PageText;
use crate::pipeline::content_stream::StreamBackend;
use crate::pipeline::layout::LayoutBackend;
use std::path::Path;

/// One way of getting text out of a PDF.
///
/// Implementations must:
/// - fail only when the document as a whole cannot be opened or parsed;
/// - skip, never fail on, individual pages whose text cannot be decoded;
/// - return trimmed, non-empty page strings in document order
///   (see [`PageText::from_raw_pages`]);
/// - release any file handle or native document before returning.
pub trait TextBackend: Send + Sync {
    /// Stable name used in logs and attempt reports.
    fn name(&self) -> &str;

    /// Extract per-page text from the PDF at `path`.
    fn extract(&self, path: &Path) -> Result<PageText, BackendError>;
}

/// Instantiate the backends named in `config.backends`, in order.
pub fn build_backends(config: &ExtractionConfig) -> Vec<Box<dyn TextBackend>> {
    config
        .backends
        .iter()
        .map(|kind| -> Box<dyn TextBackend> {
            match kind {
                BackendKind::Stream => Box::new(StreamBackend::new(config.password.clone())),
                BackendKind::Layout => Box::new(LayoutBackend::new(
                    config.password.clone(),
                    config.pdfium_lib_path.clone(),
                )),
            }
        })
        .collect()
}
