//! CLI binary for edgequake-pdf2quiz.
//!
//! A thin shim over the library crate: maps CLI flags to `PipelineConfig`
//! and `GenerationOptions`, then prints the report, the text, or JSON.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_pdf2quiz::{
    format_report, questions_json, ExtractionProgressCallback, GenerationOptions,
    PipelineConfig, ProgressCallback, QuestionPipeline, RawDocument, StrategyKind,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner until the page count is known,
/// then a bar with one log line per failed page.
struct CliProgressCallback {
    bar: ProgressBar,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Extracting");
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
    }

    fn on_page_extracted(&self, _page_num: usize, _total_pages: usize, _run_count: usize) {
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        let msg: String = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            red("✗"),
            page_num,
            total_pages,
            red(&msg)
        ));
        self.bar.inc(1);
    }

    fn on_extraction_complete(&self, total_pages: usize, text_len: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} pages extracted  {}",
            green("✔"),
            bold(&total_pages.to_string()),
            dim(&format!("{text_len} bytes of text"))
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # All three strategies, report on stdout
  pdf2quiz lecture.pdf

  # Only template and generative questions, written to a file
  pdf2quiz --strategies template,generative lecture.pdf -o questions.txt

  # Same questions on every run
  pdf2quiz --seed 42 lecture.pdf

  # Show the extracted text only
  pdf2quiz --text-only lecture.pdf

  # Inspect PDF metadata
  pdf2quiz --inspect-only lecture.pdf

  # Questions as JSON
  pdf2quiz --json lecture.pdf > questions.json

STRATEGIES:
  template     fixed question shapes (Who / What / Where / Why / How)
  contextual   open analysis prompts about the sentence subject
  generative   reading-comprehension prompts about the passage

REPORT FORMAT:
  1. <question>
     Source: <first 100 characters of the sentence>...
     Type: TEMPLATE | CONTEXTUAL | GENERATIVE
"#;

/// Generate study questions from PDF documents.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2quiz",
    version,
    about = "Generate study questions from PDF documents",
    long_about = "Extract the text of a PDF document, pick its first meaningful sentences and \
turn each one into questions using up to three independent strategies. Every question \
keeps a reference to the sentence it was generated from.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    input: PathBuf,

    /// Write the report (or JSON / text) to this file instead of stdout.
    #[arg(short, long, env = "PDF2QUIZ_OUTPUT")]
    output: Option<PathBuf>,

    /// Comma-separated strategies to run: template, contextual, generative.
    #[arg(long, env = "PDF2QUIZ_STRATEGIES", default_value = "template,contextual,generative")]
    strategies: String,

    /// Disable template questions.
    #[arg(long)]
    no_template: bool,

    /// Disable contextual questions.
    #[arg(long)]
    no_contextual: bool,

    /// Disable generative questions.
    #[arg(long)]
    no_generative: bool,

    /// Seed template selection for reproducible questions.
    #[arg(long, env = "PDF2QUIZ_SEED")]
    seed: Option<u64>,

    /// Number of pages decoded at once.
    #[arg(short, long, env = "PDF2QUIZ_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Output questions as JSON instead of the text report.
    #[arg(long, env = "PDF2QUIZ_JSON")]
    json: bool,

    /// Print the extracted text and stop.
    #[arg(long)]
    text_only: bool,

    /// Print PDF metadata only, no extraction.
    #[arg(long)]
    inspect_only: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2QUIZ_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2QUIZ_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2QUIZ_QUIET")]
    quiet: bool,

    /// Decode with pdfium from this shared library instead of lopdf.
    #[cfg(feature = "pdfium")]
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
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

    let raw = RawDocument::from_path(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ExtractionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;
    let pipeline = QuestionPipeline::new(config).context("Failed to set up document backend")?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = pipeline.inspect(&raw).await.context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
            );
        } else {
            println!("File:         {}", cli.input.display());
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            println!("Backend:      {}", meta.backend);
        }
        return Ok(());
    }

    // ── Extract ──────────────────────────────────────────────────────────
    let start = Instant::now();
    let text = pipeline
        .process(&raw)
        .await
        .context("Text extraction failed")?;

    if cli.text_only {
        let mut body = text.into_string();
        if !body.ends_with('\n') {
            body.push('\n');
        }
        return emit(&cli, &body);
    }

    // ── Generate ─────────────────────────────────────────────────────────
    let mut options = parse_strategies(&cli.strategies)?;
    for (kind, disabled) in [
        (StrategyKind::Template, cli.no_template),
        (StrategyKind::Contextual, cli.no_contextual),
        (StrategyKind::Generative, cli.no_generative),
    ] {
        if disabled {
            options = options.with(kind, false);
        }
    }
    if !options.any_enabled() {
        anyhow::bail!("No question strategy enabled");
    }

    let questions = pipeline.generate(&text, &options);

    let body = if cli.json {
        let mut json = serde_json::to_string_pretty(&questions_json(&questions, text.len()))
            .context("Failed to serialise questions")?;
        json.push('\n');
        json
    } else {
        format_report(&questions)
    };
    emit(&cli, &body)?;

    if !cli.quiet && !cli.json {
        eprintln!(
            "{}  {} questions  {}ms",
            if questions.is_empty() { cyan("⚠") } else { green("✔") },
            bold(&questions.len().to_string()),
            start.elapsed().as_millis()
        );
        if questions.is_empty() {
            eprintln!("   {}", dim("no sentence was long enough to ask about"));
        }
    }

    Ok(())
}

/// Map CLI args to `PipelineConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<PipelineConfig> {
    let mut builder = PipelineConfig::builder().page_concurrency(cli.concurrency);

    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }
    #[cfg(feature = "pdfium")]
    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_library(lib.clone());
    }

    builder.build().context("Invalid configuration")
}

/// Parse `--strategies` into `GenerationOptions`.
fn parse_strategies(s: &str) -> Result<GenerationOptions> {
    let mut options = GenerationOptions::none();
    for tag in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let kind = StrategyKind::from_tag(tag)
            .with_context(|| format!("Unknown strategy '{}'", tag))?;
        options = options.with(kind, true);
    }
    Ok(options)
}

/// Write `body` to `--output` or stdout.
fn emit(cli: &Cli, body: &str) -> Result<()> {
    if let Some(ref path) = cli.output {
        std::fs::write(path, body)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !cli.quiet {
            eprintln!("{}  {}", green("→"), bold(&path.display().to_string()));
        }
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(body.as_bytes())
            .context("Failed to write to stdout")?;
    }
    Ok(())
}
