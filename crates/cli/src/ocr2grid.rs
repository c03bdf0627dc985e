//! ocr2grid - Render OCR results as a monospace text layout
//!
//! A command line tool that reads word boxes produced by an OCR engine and
//! writes a fixed-size text grid approximating where each word appeared
//! on the source image.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use gridscribe_core::high_level::{ComposeOptions, render_text_to_fp, write_text_file};
use gridscribe_core::layout::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GridParams};
use gridscribe_core::ocr::{OcrWord, parse_paddle_json, parse_words_json};
use gridscribe_core::SourceFrame;
use tracing::{Level, debug, info};

/// Shape of the OCR results file.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum InputFormat {
    /// Raw PaddleOCR result: pages of `[quad, [text, score]]` detections (default)
    #[default]
    Paddle,
    /// Flat list of `{"text": ..., "bbox": [x_min, y_min, x_max, y_max]}` objects
    Words,
}

/// Render OCR word boxes as a monospace text layout.
#[derive(Parser, Debug)]
#[command(name = "ocr2grid")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the OCR results (JSON)
    results: PathBuf,

    /// Image the results were produced from; only its dimensions are read
    #[arg(short = 'i', long, conflicts_with_all = ["frame_width", "frame_height"])]
    image: Option<PathBuf>,

    /// Source image width in pixels (instead of --image)
    #[arg(long = "frame-width", requires = "frame_height")]
    frame_width: Option<u32>,

    /// Source image height in pixels (instead of --image)
    #[arg(long = "frame-height", requires = "frame_width")]
    frame_height: Option<u32>,

    /// Shape of the results file
    #[arg(short = 'f', long, value_enum, default_value = "paddle")]
    format: InputFormat,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Number of grid columns
    #[arg(short = 'W', long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: usize,

    /// Number of grid rows
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: usize,

    /// Worker threads for placement (0 = all cores, 1 = sequential)
    #[arg(short = 'j', long, default_value = "1")]
    threads: usize,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Resolve the source frame from either the image header or explicit flags.
fn resolve_frame(args: &Args) -> Result<SourceFrame> {
    let (width, height) = match (&args.image, args.frame_width, args.frame_height) {
        (Some(path), _, _) => image::image_dimensions(path)
            .with_context(|| format!("failed to read dimensions of {}", path.display()))?,
        (None, Some(w), Some(h)) => (w, h),
        _ => bail!("either --image or --frame-width/--frame-height is required"),
    };
    debug!(width, height, "source frame");
    Ok(SourceFrame::new(width, height)?)
}

fn load_words(path: &Path, format: InputFormat) -> Result<Vec<OcrWord>> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read OCR results {}", path.display()))?;
    let words = match format {
        InputFormat::Paddle => parse_paddle_json(&input),
        InputFormat::Words => parse_words_json(&input),
    }
    .with_context(|| format!("failed to parse OCR results {}", path.display()))?;
    Ok(words)
}

fn run(args: &Args) -> Result<()> {
    let params = GridParams::new(args.width, args.height)?;
    let frame = resolve_frame(args)?;
    let words = load_words(&args.results, args.format)?;
    info!(words = words.len(), "loaded OCR results");

    let options = ComposeOptions {
        params,
        threads: Some(args.threads),
    };

    if args.outfile == "-" {
        let stdout = io::stdout();
        let mut output = BufWriter::new(stdout.lock());
        render_text_to_fp(&words, frame, &mut output, Some(options))?;
        output.flush()?;
    } else {
        write_text_file(&words, frame, &args.outfile, Some(options))
            .with_context(|| format!("failed to write {}", args.outfile))?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
