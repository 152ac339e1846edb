//! OCR Reflow CLI - turn a raw OCR engine dump into markdown paragraphs.

use anyhow::{Context, Result};
use clap::Parser;
use ocr_reflow::markdown::write_markdown;
use ocr_reflow::{AnchorEdge, Backend, Fragment, ReflowConfig, Reflower};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "ocr-reflow", version, about = "Rebuild reading-order paragraphs from OCR output")]
struct Args {
    /// Engine that produced the input: paddle, paddle_page, easyocr or tesseract
    #[arg(short, long, value_parser = parse_backend)]
    backend: Backend,

    /// Raw engine output as JSON ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// JSON reflow config (defaults and REFLOW_* env vars otherwise)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vertical anchor edge: top or bottom (bottom implies a 15px gap unless --line-gap is set)
    #[arg(long, value_parser = parse_anchor)]
    anchor: Option<AnchorEdge>,

    /// Maximum vertical gap in pixels between lines of one paragraph
    #[arg(long)]
    line_gap: Option<f64>,

    /// Write markdown to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print every fragment in reading order with its confidence to stderr
    #[arg(long)]
    show_fragments: bool,

    /// Print the paragraph structure as JSON instead of markdown
    #[arg(long)]
    json: bool,
}

fn parse_backend(s: &str) -> std::result::Result<Backend, String> {
    Backend::from_name(s).ok_or_else(|| {
        format!(
            "unknown backend '{}', expected paddle, paddle_page, easyocr or tesseract",
            s
        )
    })
}

fn parse_anchor(s: &str) -> std::result::Result<AnchorEdge, String> {
    s.parse().map_err(|e: ocr_reflow::ReflowError| e.to_string())
}

/// One `--show-fragments` line.
fn describe_fragment(fragment: &Fragment) -> String {
    match fragment.confidence {
        Some(score) => format!("Detected text: {} (Confidence score: {})", fragment.text, score),
        None => format!("Detected text: {}", fragment.text),
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean markdown
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ocr_reflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ReflowConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => ReflowConfig::from_env().context("Invalid REFLOW_* environment")?,
    };
    if let Some(anchor) = args.anchor {
        config = config
            .with_anchor(anchor)
            .with_line_gap(anchor.default_line_gap());
    }
    if let Some(gap) = args.line_gap {
        config = config.with_line_gap(gap);
    }

    let raw_json = read_input(&args.input)?;
    let raw: serde_json::Value =
        serde_json::from_str(&raw_json).context("Input is not valid JSON")?;

    let reflower = Reflower::new(config)?;
    let reflowed = reflower.reflow(args.backend, &raw)?;

    // Requested output, so it bypasses the log filter.
    if args.show_fragments {
        for fragment in &reflowed.fragments {
            eprintln!("{}", describe_fragment(fragment));
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reflowed.document)?);
    } else if let Some(path) = &args.output {
        write_markdown(path, &reflowed.document)
            .with_context(|| format!("Failed to write {:?}", path))?;
    } else {
        println!("{}", reflowed.markdown);
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
    }
}
