//! Fallback backend: layout-aware page text via pdfium.
//!
//! pdfium reconstructs text from glyph positions rather than raw content
//! stream operators, so it recovers documents lopdf cannot decode (CID fonts,
//! unusual encodings, heavily positioned layouts). It needs the native
//! pdfium library, bound per call:
//!
//! 1. `pdfium_lib_path` from config (directory containing the library)
//! 2. `PDFIUM_LIB_PATH` environment variable (same meaning)
//! 3. the system library search path
//!
//! The bindings and the loaded document are dropped before `extract`
//! returns, which closes the file on every exit path.

use crate::error::BackendError;
use crate::output::PageText;
use crate::pipeline::backend::TextBackend;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

const NAME: &str = "pdfium";

/// Layout-aware text extraction via pdfium.
#[derive(Debug, Clone, Default)]
pub struct LayoutBackend {
    password: Option<String>,
    lib_dir: Option<PathBuf>,
}

impl LayoutBackend {
    pub fn new(password: Option<String>, lib_dir: Option<PathBuf>) -> Self {
        Self { password, lib_dir }
    }

    fn bind(&self) -> Result<Pdfium, BackendError> {
        let lib_dir = self.lib_dir.clone().or_else(|| {
            std::env::var_os("PDFIUM_LIB_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });

        let bindings = match lib_dir {
            Some(dir) => {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir))
            }
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| BackendError::LibraryUnavailable {
            backend: NAME,
            detail: e.to_string(),
        })?;

        Ok(Pdfium::new(bindings))
    }
}

impl TextBackend for LayoutBackend {
    fn name(&self) -> &str {
        NAME
    }

    fn extract(&self, path: &Path) -> Result<PageText, BackendError> {
        let pdfium = self.bind()?;
        let password = self.password.as_deref();

        let document = pdfium
            .load_pdf_from_file(path, password)
            .map_err(|e| map_load_error(e, password.is_some()))?;

        let pages = document.pages();
        let page_count = pages.len() as usize;
        let mut raw = Vec::with_capacity(page_count);

        for (idx, page) in pages.iter().enumerate() {
            match page.text() {
                Ok(text) => raw.push(text.all()),
                Err(e) => debug!("{}: skipping page {}: {:?}", NAME, idx + 1, e),
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

fn map_load_error(e: PdfiumError, had_password: bool) -> BackendError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if had_password {
            BackendError::WrongPassword { backend: NAME }
        } else {
            BackendError::PasswordRequired { backend: NAME }
        }
    } else if err_str.contains("FileError") || err_str.contains("IoError") {
        BackendError::Io {
            backend: NAME,
            detail: err_str,
        }
    } else {
        BackendError::Corrupt {
            backend: NAME,
            detail: err_str,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_reports_its_name() {
        assert_eq!(LayoutBackend::default().name(), "pdfium");
    }

    #[test]
    fn unloadable_library_is_reported_not_panicked() {
        let backend = LayoutBackend::new(None, Some(PathBuf::from("/nonexistent/pdfium/dir")));
        let err = backend.extract(Path::new("irrelevant.pdf")).unwrap_err();
        assert!(
            matches!(err, BackendError::LibraryUnavailable { backend: "pdfium", .. }),
            "got: {err:?}"
        );
    }
}
