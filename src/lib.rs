//! # syllabus-extract
//!
//! Pull plain text out of course-syllabus PDFs, clean it up, and decide
//! whether there is enough of it to generate a quiz from.
//!
//! ## Why two backends?
//!
//! Syllabi arrive from every word processor and scanner driver in existence.
//! Decoding page content streams directly (lopdf) is fast and dependency-free
//! and handles most of them. The rest (CID fonts, odd encodings, text placed
//! glyph by glyph) come out empty or garbled, and pdfium's layout-aware text
//! layer recovers them. The fast path runs first and pdfium only runs when it
//! returns too little.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input      check the path, or spill uploaded bytes to a temp file
//!  ├─ 2. Extract    lopdf content streams ─(too little text)─▶ pdfium
//!  ├─ 3. Normalize  collapse whitespace, strip stray symbols
//!  ├─ 4. Validate   length, printable ratio, word count
//!  └─ 5. Prompt     optional: quiz prompts + response parsing
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use syllabus_extract::{prepare_syllabus, quiz_user_prompt, ExtractionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::default();
//!     let syllabus = prepare_syllabus("syllabus.pdf", &config)?;
//!     eprintln!(
//!         "{} words via {}",
//!         syllabus.word_count, syllabus.extraction.backend
//!     );
//!     println!("{}", quiz_user_prompt(&syllabus.text, 10, config.prompt_char_limit));
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `syllabus-extract` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! syllabus-extract = { version = "0.1", default-features = false }
//! ```
//!
//! ## Native pdfium
//!
//! The layout backend binds pdfium at call time, looking in
//! [`ExtractionConfig::pdfium_lib_path`], then `PDFIUM_LIB_PATH`, then the
//! system library path. If none has it, that backend fails and the
//! orchestrator treats it like any other backend failure.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod questions;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{BackendKind, ExtractionConfig, ExtractionConfigBuilder, ValidationThresholds};
pub use error::{BackendError, ExtractError};
pub use extract::{
    extract_from_bytes, extract_text, extract_text_async, prepare_syllabus,
    prepare_syllabus_from_bytes, Extractor,
};
pub use output::{AttemptOutcome, BackendAttempt, ExtractionOutput, PageText, PreparedSyllabus};
pub use pipeline::backend::TextBackend;
pub use pipeline::input::RawDocument;
pub use pipeline::normalize::{clean, clean_with};
pub use pipeline::validate::{assess, is_valid, ContentVerdict};
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use prompts::{prompt_excerpt, quiz_system_prompt, quiz_user_prompt, Difficulty};
pub use questions::{fallback_questions, parse_questions, QuestionParseError, QuizQuestion};
