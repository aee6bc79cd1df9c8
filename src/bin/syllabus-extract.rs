//! CLI binary for syllabus-extract.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ExtractionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use syllabus_extract::extract::finish_preparation;
use syllabus_extract::{
    assess, clean_with, extract_text_async, quiz_system_prompt, quiz_user_prompt, Difficulty,
    ExtractError, ExtractionConfig, ExtractionProgressCallback, ProgressCallback,
};
use tracing_subscriber::EnvFilter;

/// Exit status for `--check` when the text is too thin to use.
const EXIT_INSUFFICIENT: i32 = 2;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner that shows which backend is running and logs each outcome above it.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, source: &str) {
        self.bar.set_prefix("Extracting");
        self.bar.set_message(source.to_string());
    }

    fn on_backend_start(&self, backend: &str, attempt: usize, total: usize) {
        self.bar
            .set_message(format!("{backend} {}", dim(&format!("({attempt}/{total})"))));
    }

    fn on_backend_accepted(&self, backend: &str, chars: usize) {
        self.bar.println(format!(
            "  {} {:<8} {}",
            green("✓"),
            backend,
            dim(&format!("{chars} chars"))
        ));
    }

    fn on_backend_insufficient(&self, backend: &str, chars: usize) {
        self.bar.println(format!(
            "  {} {:<8} {}",
            yellow("⚠"),
            backend,
            dim(&format!("only {chars} chars, falling back"))
        ));
    }

    fn on_backend_failed(&self, backend: &str, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let msg = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };
        self.bar
            .println(format!("  {} {:<8} {}", red("✗"), backend, red(&msg)));
    }

    fn on_extraction_complete(&self, backend: Option<&str>) {
        self.bar.finish_and_clear();
        match backend {
            Some(b) => eprintln!("{} extracted with {}", green("✔"), bold(b)),
            None => eprintln!("{} no backend produced text", red("✘")),
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Cleaned, validated text (stdout)
  syllabus-extract syllabus.pdf

  # Text exactly as the accepted backend produced it
  syllabus-extract --raw syllabus.pdf

  # Is this upload usable? (exit 0 = yes, 2 = too little text)
  syllabus-extract --check syllabus.pdf

  # Full report: text, backend, page counts, per-backend attempts
  syllabus-extract --json syllabus.pdf > report.json

  # Prompts for a 15-question hard quiz
  syllabus-extract --prompt --questions 15 --difficulty hard syllabus.pdf

BACKENDS:
  lopdf    decodes page content streams directly; fast, pure Rust
  pdfium   layout-aware text layer; used when lopdf returns too little

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH    Directory containing libpdfium (overridden by --pdfium-lib)
  RUST_LOG           Log filter, e.g. syllabus_extract=debug
"#;

#[derive(Parser, Debug)]
#[command(
    name = "syllabus-extract",
    version,
    about = "Extract, clean and validate text from syllabus PDFs",
    long_about = "Extract text from a course syllabus PDF using lopdf with a pdfium fallback, \
normalise it, and check that it is substantive enough to generate a quiz from.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the PDF.
    input: PathBuf,

    /// Print the orchestrator's text without cleaning or validation.
    #[arg(long, env = "SYLLABUS_RAW", conflicts_with_all = ["check", "prompt"])]
    raw: bool,

    /// Print a JSON report instead of plain text.
    #[arg(long, env = "SYLLABUS_JSON")]
    json: bool,

    /// Only report whether the text passes validation.
    #[arg(long, env = "SYLLABUS_CHECK", conflicts_with = "prompt")]
    check: bool,

    /// Print the quiz-generation prompts built from the cleaned text.
    #[arg(long, env = "SYLLABUS_PROMPT")]
    prompt: bool,

    /// Trimmed characters a non-final backend must exceed to be accepted.
    #[arg(long, env = "SYLLABUS_MIN_BACKEND_CHARS", default_value_t = 50)]
    min_backend_chars: usize,

    #[arg(long, env = "SYLLABUS_PASSWORD")]
    password: Option<String>,

    /// Directory containing the pdfium shared library.
    #[arg(long, env = "SYLLABUS_PDFIUM_LIB")]
    pdfium_lib: Option<PathBuf>,

    /// Keep blank-line paragraph breaks when cleaning.
    #[arg(long, env = "SYLLABUS_PRESERVE_PARAGRAPHS")]
    preserve_paragraphs: bool,

    /// Number of questions to ask for in `--prompt` mode.
    #[arg(long, env = "SYLLABUS_QUESTIONS", default_value_t = 10,
          value_parser = clap::value_parser!(u32).range(1..=50))]
    questions: u32,

    #[arg(long, env = "SYLLABUS_DIFFICULTY", value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    #[arg(short, long, env = "SYLLABUS_VERBOSE")]
    verbose: bool,

    #[arg(short, long, env = "SYLLABUS_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner covers what INFO logs would say; keep them out of its way.
    let show_progress = !cli.quiet && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ExtractionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Run extraction ───────────────────────────────────────────────────
    let output = extract_text_async(&cli.input, &config)
        .await
        .with_context(|| format!("Extraction failed for {}", cli.input.display()))?;

    if cli.raw {
        if cli.json {
            print_json(&output)?;
        } else {
            print_text(&output.text)?;
        }
        return Ok(());
    }

    if cli.check {
        let text = clean_with(&output.text, config.preserve_paragraphs);
        let verdict = assess(&text, &config.validation);
        if cli.json {
            print_json(&serde_json::json!({
                "valid": verdict.is_accepted(),
                "result": verdict,
                "backend": output.backend,
                "chars": text.chars().count(),
            }))?;
        } else if verdict.is_accepted() {
            println!(
                "{} ({} via {})",
                green("ok"),
                dim(&format!("{} chars", text.chars().count())),
                output.backend
            );
        } else {
            println!("{}: {}", red("insufficient"), verdict);
        }
        if !verdict.is_accepted() {
            std::process::exit(EXIT_INSUFFICIENT);
        }
        return Ok(());
    }

    let prepared = match finish_preparation(output, &config) {
        Ok(p) => p,
        Err(e @ ExtractError::InsufficientContent { .. }) => {
            eprintln!("{} {}", red("✘"), e);
            std::process::exit(EXIT_INSUFFICIENT);
        }
        Err(e) => return Err(e).context("Failed to prepare syllabus text"),
    };

    if cli.prompt {
        let n = cli.questions as usize;
        let system = quiz_system_prompt(n, cli.difficulty);
        let user = quiz_user_prompt(&prepared.text, n, config.prompt_char_limit);
        if cli.json {
            print_json(&serde_json::json!({ "system": system, "user": user }))?;
        } else {
            print_text(&format!("{system}\n\n{user}"))?;
        }
        return Ok(());
    }

    if cli.json {
        print_json(&prepared)?;
    } else {
        print_text(&prepared.text)?;
        if !cli.quiet && !show_progress {
            eprintln!(
                "{} words, {} chars via {} in {}ms",
                prepared.word_count,
                prepared.char_count,
                prepared.extraction.backend,
                prepared.extraction.total_duration_ms
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder()
        .min_backend_chars(cli.min_backend_chars)
        .preserve_paragraphs(cli.preserve_paragraphs);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(ref dir) = cli.pdfium_lib {
        builder = builder.pdfium_lib_path(dir.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn print_text(text: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_text(&mut handle, text)
}

/// Write `text` followed by a newline if it lacks one.
fn write_text(out: &mut impl Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .context("Failed to write to stdout")?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")
            .context("Failed to write to stdout")?;
    }
    out.flush().context("Failed to flush stdout")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialise output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts `budget` bytes, then fails every write.
    struct ShortWriter {
        budget: usize,
        written: Vec<u8>,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_text_appends_newline() {
        let mut out = Vec::new();
        write_text(&mut out, "syllabus").unwrap();
        assert_eq!(out, b"syllabus\n");

        let mut out = Vec::new();
        write_text(&mut out, "done\n").unwrap();
        assert_eq!(out, b"done\n");
    }

    #[test]
    fn write_text_reports_failed_trailing_newline() {
        let mut out = ShortWriter {
            budget: 8,
            written: Vec::new(),
        };
        let err = write_text(&mut out, "syllabus").unwrap_err();
        assert_eq!(out.written, b"syllabus");
        assert!(err.to_string().contains("stdout"), "got: {err}");
    }
}
