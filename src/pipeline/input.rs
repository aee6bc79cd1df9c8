//! Input resolution: check a caller-supplied path, or spill bytes to disk.
//!
//! Both backends open documents by path, so in-memory uploads are written
//! to a [`NamedTempFile`] first. The temp file is owned by [`ResolvedInput`]
//! and deleted when it drops, whether extraction succeeded, failed or
//! panicked.
//!
//! No format sniffing happens here: a file that is not a PDF is the
//! backends' call to reject, so the orchestrator's fallback still applies.

use crate::error::ExtractError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// An uploaded document held in memory.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Where the bytes came from (upload filename, object key, …). Used in
    /// logs and error messages only.
    pub source: String,
    bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(source: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            source: source.into(),
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The resolved input, either a local path or a temp copy of in-memory bytes.
pub enum ResolvedInput {
    /// Input was already a local file.
    Local(PathBuf),
    /// Input was a [`RawDocument`]; the temp file lives as long as this value.
    Spilled { source: String, file: NamedTempFile },
}

impl ResolvedInput {
    /// Get the path to the PDF file regardless of how it was resolved.
    pub fn path(&self) -> &Path {
        match self {
            ResolvedInput::Local(p) => p,
            ResolvedInput::Spilled { file, .. } => file.path(),
        }
    }

    /// Human-readable origin for logs.
    pub fn describe(&self) -> String {
        match self {
            ResolvedInput::Local(p) => p.display().to_string(),
            ResolvedInput::Spilled { source, .. } => source.clone(),
        }
    }
}

/// Validate that `path` names an existing, readable file.
pub fn resolve_local(path: impl AsRef<Path>) -> Result<ResolvedInput, ExtractError> {
    let path = path.as_ref().to_path_buf();

    if !path.is_file() {
        return Err(ExtractError::DocumentNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ExtractError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(ExtractError::DocumentNotFound { path });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(ResolvedInput::Local(path))
}

/// Write `doc` to a temp file that is removed when the result drops.
pub fn spill_to_temp(doc: &RawDocument) -> Result<ResolvedInput, ExtractError> {
    let mut file = tempfile::Builder::new()
        .prefix("syllabus-")
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| ExtractError::Internal(format!("tempfile: {e}")))?;
    file.write_all(doc.bytes())
        .and_then(|_| file.flush())
        .map_err(|e| ExtractError::Internal(format!("tempfile write: {e}")))?;

    debug!(
        "Spilled {} ({} bytes) to {}",
        doc.source,
        doc.len(),
        file.path().display()
    );
    Ok(ResolvedInput::Spilled {
        source: doc.source.clone(),
        file,
    })
}
