//! CLI binary for cor2sched.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractionConfig` and prints the extracted schedule.

use anyhow::{Context, Result};
use clap::Parser;
use cor2sched::{
    extract, extract_to_file, inspect, Course, ExtractionConfig, ExtractionOutput,
    ExtractionProgressCallback, ExtractionStage, ProgressCallback, ScheduleEntry,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
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
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a single spinner that tracks the current
/// pipeline stage and logs a tick line as each stage completes.
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
        bar.set_prefix("Extracting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_stage_start(&self, stage: ExtractionStage) {
        let msg = match stage {
            ExtractionStage::Rasterizing => "Rendering first page…",
            ExtractionStage::Recognizing => "Recognising text…",
            ExtractionStage::Parsing => "Parsing schedule…",
            _ => return,
        };
        self.bar.set_message(msg);
    }

    fn on_stage_complete(&self, stage: ExtractionStage, elapsed_ms: u64) {
        self.bar.println(format!(
            "  {} {:<12} {}",
            green("✓"),
            stage.to_string(),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
    }

    fn on_sample_substituted(&self, reason: &str) {
        self.bar.println(format!(
            "  {} {}",
            yellow("⚠"),
            yellow(&format!("OCR unusable ({reason}); showing sample data")),
        ));
    }

    fn on_extraction_complete(&self, courses: usize, meetings: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} courses, {} weekly meetings",
            green("✔"),
            bold(&courses.to_string()),
            bold(&meetings.to_string()),
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract a schedule and print it
  cor2sched registration.pdf

  # Structured JSON to a file
  cor2sched registration.pdf --json -o schedule.json

  # Extract from a URL
  cor2sched https://portal.example.edu/cor/2026-1.pdf

  # Higher render scale for low-quality scans
  cor2sched --scale 4 scanned-cor.pdf

  # Fail hard instead of substituting sample data when OCR fails
  cor2sched --no-sample-fallback registration.pdf

  # Inspect PDF metadata only (no OCR)
  cor2sched --inspect-only registration.pdf

ENVIRONMENT VARIABLES:
  COR2SCHED_TESSERACT   Path to the tesseract binary
  COR2SCHED_LANG        Tesseract language code (default: eng)
  PDFIUM_LIB_PATH       Path to an existing libpdfium shared library

SETUP:
  cor2sched needs two native components at runtime:
  1. pdfium — the shared library pdfium-render binds to.
  2. tesseract — any 4.x/5.x install on PATH (apt install tesseract-ocr).
"#;

/// Extract course schedules from Certificate of Registration PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "cor2sched",
    version,
    about = "Extract course schedules from Certificate of Registration PDFs",
    long_about = "Extract a weekly course schedule from a Certificate of Registration (COR) PDF. \
The first page is rendered via pdfium, read with Tesseract OCR, and parsed with a structured \
table parser plus a heuristic fallback for free-form layouts.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path or HTTP/HTTPS URL.
    input: String,

    /// Write output to this file instead of stdout (always JSON).
    #[arg(short, long, env = "COR2SCHED_OUTPUT")]
    output: Option<PathBuf>,

    /// Print structured JSON (ExtractionOutput) instead of the schedule table.
    #[arg(long, env = "COR2SCHED_JSON")]
    json: bool,

    /// Print PDF metadata only, no OCR or parsing.
    #[arg(long)]
    inspect_only: bool,

    /// Render scale factor for the first page (1.0–8.0).
    #[arg(long, env = "COR2SCHED_SCALE", default_value_t = 2.0)]
    scale: f32,

    /// Maximum rendered image dimension in pixels.
    #[arg(long, env = "COR2SCHED_MAX_PIXELS", default_value_t = 4000)]
    max_pixels: u32,

    /// Tesseract command or path.
    #[arg(long, env = "COR2SCHED_TESSERACT", default_value = "tesseract")]
    tesseract_cmd: String,

    /// Tesseract language code.
    #[arg(long, env = "COR2SCHED_LANG", default_value = "eng")]
    lang: String,

    /// Minimum recognised characters before OCR output counts as usable.
    #[arg(long, env = "COR2SCHED_MIN_TEXT_CHARS", default_value_t = 50)]
    min_text_chars: usize,

    /// Fail when OCR is unusable instead of substituting sample data.
    #[arg(long, env = "COR2SCHED_NO_SAMPLE_FALLBACK")]
    no_sample_fallback: bool,

    /// OCR timeout in seconds.
    #[arg(long, env = "COR2SCHED_OCR_TIMEOUT", default_value_t = 60)]
    ocr_timeout: u64,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "COR2SCHED_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "COR2SCHED_PASSWORD")]
    password: Option<String>,

    /// Disable the progress spinner.
    #[arg(long, env = "COR2SCHED_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "COR2SCHED_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the schedule itself.
    #[arg(short, long, env = "COR2SCHED_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; the
    // spinner provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
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

    let config = build_config(&cli)?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input, &config)
            .await
            .context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialise metadata")?
            );
        } else {
            println!("File:         {}", cli.input);
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
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    // ── Run extraction ───────────────────────────────────────────────────
    let progress = if show_progress {
        Some(CliProgressCallback::new())
    } else {
        None
    };
    let config = match progress {
        Some(ref cb) => {
            let mut c = config;
            c.progress_callback = Some(Arc::clone(cb) as ProgressCallback);
            c
        }
        None => config,
    };

    let result = if let Some(ref output_path) = cli.output {
        extract_to_file(&cli.input, output_path, &config).await
    } else {
        extract(&cli.input, &config).await
    };

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            if let Some(ref cb) = progress {
                cb.finish();
            }
            return Err(e).context("Extraction failed");
        }
    };

    if let Some(ref output_path) = cli.output {
        if !cli.quiet {
            eprintln!(
                "{}  {} courses  {}ms  →  {}",
                green("✔"),
                output.stats.course_count,
                output.stats.total_duration_ms,
                bold(&output_path.display().to_string()),
            );
        }
    } else if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else {
        print_schedule(&output)?;
        if output.used_sample_text && !cli.quiet && !show_progress {
            eprintln!("{}", yellow("warning: OCR failed, showing sample data"));
        }
    }

    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder()
        .render_scale(cli.scale)
        .max_rendered_pixels(cli.max_pixels)
        .min_recognized_chars(cli.min_text_chars)
        .sample_fallback(!cli.no_sample_fallback)
        .tesseract_cmd(cli.tesseract_cmd.clone())
        .ocr_language(cli.lang.clone())
        .ocr_timeout_secs(cli.ocr_timeout)
        .download_timeout_secs(cli.download_timeout);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }

    builder.build().context("Invalid configuration")
}

/// Weekday order for the by-day listing.
const DAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Print the extracted schedule as a readable course table plus a per-day
/// meeting list.
fn print_schedule(output: &ExtractionOutput) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", bold("Courses"))?;
    for course in &output.data.courses {
        write!(out, "  {}  {}", cyan(&course.code), course.name)?;
        if let Some(ref section) = course.section {
            write!(out, "  {}", dim(section))?;
        }
        writeln!(out, "  {}", dim(&format!("{} units", course.units)))?;
    }

    writeln!(out)?;
    writeln!(out, "{}", bold("Weekly schedule"))?;
    for day in DAY_ORDER {
        let mut meetings: Vec<&ScheduleEntry> = output
            .data
            .schedule
            .iter()
            .filter(|e| e.day == day)
            .collect();
        if meetings.is_empty() {
            continue;
        }
        meetings.sort_by(|a, b| a.start_time.cmp(&b.start_time));

        writeln!(out, "  {}", bold(day))?;
        for meeting in meetings {
            let code = output
                .data
                .course(meeting.course_id)
                .map(|c: &Course| c.code.as_str())
                .unwrap_or("?");
            write!(
                out,
                "    {}–{}  {}",
                meeting.start_time, meeting.end_time, code
            )?;
            if !meeting.room.is_empty() {
                write!(out, "  {}", dim(&meeting.room))?;
            }
            writeln!(out)?;
        }
    }

    Ok(())
}
