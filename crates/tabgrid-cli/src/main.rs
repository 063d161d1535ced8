//! Tabgrid CLI - recover structured tables from HTML documents.
//!
//! Three subcommands mirror the pipeline stages: `fetch` acquires a document
//! into the input directory, `process` runs named documents through
//! render -> segment -> OCR, and `batch` processes every document the input
//! directory contains.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tabgrid_core::{DocumentResult, PipelineConfig};
use tabgrid_ocr::{FixedRecognizer, TextRecognizer};
use tabgrid_pipeline::{DocumentFetcher, PipelineDriver, TableRenderer, WkhtmltoimageRenderer};

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "tabgrid.toml";

#[derive(Parser)]
#[command(
    name = "tabgrid",
    version,
    about = "Extract tables from HTML documents via image segmentation and OCR"
)]
struct Cli {
    /// Path to a TOML configuration file (default: ./tabgrid.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured input directory
    #[arg(long, global = true)]
    input_dir: Option<PathBuf>,

    /// Override the configured output directory
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Explicit path to the wkhtmltoimage binary
    #[arg(long, global = true)]
    renderer_bin: Option<PathBuf>,

    /// Replace OCR with a stub that returns empty text (segmentation
    /// debugging; no tesseract required)
    #[arg(long, global = true)]
    stub_ocr: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a document into the input directory
    Fetch {
        /// URL to fetch
        url: String,

        /// File name to store the document under (default: derived from the URL)
        #[arg(long)]
        name: Option<String>,

        /// Minimum randomized post-fetch delay in seconds
        #[arg(long)]
        min_delay: Option<u64>,

        /// Maximum randomized post-fetch delay in seconds
        #[arg(long)]
        max_delay: Option<u64>,
    },

    /// Process named documents from the input directory
    Process {
        /// Document file names (relative to the input directory)
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Process every document in the input directory
    Batch,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.input_dir {
        config.input_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(bin) = cli.renderer_bin {
        config.renderer_binary = Some(bin);
    }

    match cli.command {
        Commands::Fetch {
            url,
            name,
            min_delay,
            max_delay,
        } => cmd_fetch(&config, &url, name, min_delay, max_delay),
        Commands::Process { files } => cmd_process(&config, cli.stub_ocr, &files),
        Commands::Batch => cmd_batch(&config, cli.stub_ocr),
    }
}

/// Load the pipeline configuration.
///
/// An explicitly passed file must exist; the default file is optional and
/// silently falls back to built-in defaults.
fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let path = match path {
        Some(p) => p,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
        None => return Ok(PipelineConfig::default()),
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
}

fn build_renderer(config: &PipelineConfig) -> Result<Box<dyn TableRenderer>> {
    let timeout = Duration::from_secs(config.render_timeout_secs);
    let renderer = match &config.renderer_binary {
        Some(binary) => WkhtmltoimageRenderer::with_binary(binary.clone(), timeout),
        None => WkhtmltoimageRenderer::new(timeout)
            .context("wkhtmltoimage is required for rendering (or pass --renderer-bin)")?,
    };
    Ok(Box::new(renderer))
}

fn build_recognizer(config: &PipelineConfig, stub_ocr: bool) -> Result<Box<dyn TextRecognizer>> {
    if stub_ocr {
        return Ok(Box::new(FixedRecognizer::default()));
    }

    #[cfg(feature = "tesseract")]
    {
        let recognizer = tabgrid_ocr::TesseractRecognizer::new(&config.ocr_language)
            .context("failed to initialize tesseract")?;
        Ok(Box::new(recognizer))
    }

    #[cfg(not(feature = "tesseract"))]
    {
        let _ = config;
        anyhow::bail!(
            "this build has no OCR engine; rebuild with --features tesseract \
             or pass --stub-ocr"
        );
    }
}

fn cmd_fetch(
    config: &PipelineConfig,
    url: &str,
    name: Option<String>,
    min_delay: Option<u64>,
    max_delay: Option<u64>,
) -> Result<()> {
    let mut fetch_options = config.fetch.clone();
    match (min_delay, max_delay) {
        (Some(min), Some(max)) => fetch_options.delay_range_secs = Some((min, max)),
        (Some(v), None) | (None, Some(v)) => fetch_options.delay_range_secs = Some((v, v)),
        (None, None) => {}
    }

    let filename = name.unwrap_or_else(|| filename_from_url(url));
    let path = config.input_dir.join(&filename);

    let fetcher = DocumentFetcher::new(fetch_options)?;
    fetcher.fetch_to(url, &path)?;

    println!("{} {} -> {}", "✓".green(), url, path.display());
    Ok(())
}

fn cmd_process(config: &PipelineConfig, stub_ocr: bool, files: &[String]) -> Result<()> {
    let driver = PipelineDriver::new(
        config.clone(),
        build_renderer(config)?,
        build_recognizer(config, stub_ocr)?,
    );

    let results = driver.process_batch(files);
    report(&driver, &results)
}

fn cmd_batch(config: &PipelineConfig, stub_ocr: bool) -> Result<()> {
    let driver = PipelineDriver::new(
        config.clone(),
        build_renderer(config)?,
        build_recognizer(config, stub_ocr)?,
    );

    let files = driver
        .discover_documents()
        .with_context(|| format!("failed to list {}", config.input_dir.display()))?;
    if files.is_empty() {
        println!("no documents found in {}", config.input_dir.display());
        return Ok(());
    }
    println!("processing {} document(s)", files.len());

    let results = driver.process_batch(&files);
    report(&driver, &results)
}

/// Persist every result and print a per-document summary line.
fn report(driver: &PipelineDriver, results: &[DocumentResult]) -> Result<()> {
    let mut failed = 0usize;
    for result in results {
        let path = driver.write_result(result)?;

        if result.tables.is_empty() && !result.errors.is_empty() {
            failed += 1;
            println!(
                "{} {}: {}",
                "✗".red(),
                result.source,
                result.errors.join("; ")
            );
        } else {
            let note = if result.errors.is_empty() {
                String::new()
            } else {
                format!(" ({} table error(s))", result.errors.len())
            };
            println!(
                "{} {}: {} table(s){} -> {}",
                "✓".green(),
                result.source,
                result.tables.len(),
                note,
                path.display()
            );
        }
    }

    println!(
        "{} processed, {} failed",
        results.len(),
        failed
    );
    Ok(())
}

/// Derive a storage file name from the last URL path segment.
fn filename_from_url(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let trimmed = without_scheme.trim_end_matches('/');
    let Some((_, path)) = trimmed.split_once('/') else {
        return "document.html".to_string();
    };
    let candidate = path
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    if candidate.is_empty() {
        "document.html".to_string()
    } else {
        candidate.to_string()
    }
}
