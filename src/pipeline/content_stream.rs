//! Fast-path backend: decode page content streams with lopdf.
//!
//! lopdf is pure Rust and reads the whole file into memory, so there is no
//! native library to bind and no file handle outlives [`Document::load`].
//! It decodes text operators using the page fonts' declared encodings, which
//! works for most word-processor exports but misses CID fonts without a
//! usable `ToUnicode` map. Those documents come back short or empty and the
//! orchestrator falls through to the layout backend.

use crate::error::BackendError;
use crate::output::PageText;
use crate::pipeline::backend::TextBackend;
use lopdf::Document;
use std::path::Path;
use tracing::debug;

const NAME: &str = "lopdf";

/// Content-stream text extraction via lopdf.
#[derive(Debug, Clone, Default)]
pub struct StreamBackend {
    password: Option<String>,
}

impl StreamBackend {
    pub fn new(password: Option<String>) -> Self {
        Self { password }
    }
}

impl TextBackend for StreamBackend {
    fn name(&self) -> &str {
        NAME
    }

    fn extract(&self, path: &Path) -> Result<PageText, BackendError> {
        let mut document = Document::load(path).map_err(map_load_error)?;

        if document.is_encrypted() {
            match self.password.as_deref() {
                Some(pwd) => document
                    .decrypt(pwd)
                    .map_err(|_| BackendError::WrongPassword { backend: NAME })?,
                // Owner-password-only files open with an empty user password.
                None => document
                    .decrypt("")
                    .map_err(|_| BackendError::PasswordRequired { backend: NAME })?,
            }
            debug!("{}: decrypted {}", NAME, path.display());
        }

        let pages = document.get_pages();
        let page_count = pages.len();
        let mut raw = Vec::with_capacity(page_count);

        // BTreeMap keys: page numbers in document order.
        for &page_num in pages.keys() {
            match document.extract_text(&[page_num]) {
                Ok(text) => raw.push(text),
                Err(e) => debug!("{}: skipping page {}: {}", NAME, page_num, e),
            }
        }

        let text = PageText::from_raw_pages(raw, page_count);
        debug!(
            "{}: {} of {} pages had text",
            NAME,
            text.pages.len(),
            page_count
        );
        Ok(text)
    }
}

fn map_load_error(e: lopdf::Error) -> BackendError {
    match e {
        lopdf::Error::IO(io) => BackendError::Io {
            backend: NAME,
            detail: io.to_string(),
        },
        other => BackendError::Corrupt {
            backend: NAME,
            detail: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn non_pdf_bytes_are_corrupt() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"this is a plain text file, not a PDF")
            .unwrap();

        let err = StreamBackend::default().extract(tmp.path()).unwrap_err();
        assert!(
            matches!(err, BackendError::Corrupt { backend: "lopdf", .. }),
            "got: {err:?}"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = StreamBackend::default()
            .extract(Path::new("/definitely/not/here.pdf"))
            .unwrap_err();
        assert_eq!(err.backend(), "lopdf");
    }
}
