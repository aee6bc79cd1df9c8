//! Pipeline stages for syllabus text extraction.
//!
//! Each submodule implements exactly one step so it can be tested alone and
//! swapped without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ backend (content_stream, then layout) ──▶ normalize ──▶ validate
//! (path)     (lopdf)           (pdfium)               (cleanup)     (gates)
//! ```
//!
//! 1. [`input`]         : check the path exists and is readable, or spill
//!    in-memory bytes to a scoped temp file
//! 2. [`backend`]       : the [`backend::TextBackend`] contract shared by
//!    every extraction strategy
//! 3. [`content_stream`]: fast path: decode page content streams via lopdf
//! 4. [`layout`]        : fallback: layout-aware page text via pdfium
//! 5. [`normalize`]     : deterministic whitespace and symbol cleanup
//! 6. [`validate`]      : decide whether the text can drive quiz generation

pub mod backend;
pub mod content_stream;
pub mod input;
pub mod layout;
pub mod normalize;
pub mod validate;
