//! Command line interface.

use crate::error::{AppError, AppResult};
use clap::{Parser, Subcommand};
use sigpad_core::export::{self, ExportFormat, ExportOptions};
use sigpad_core::stats::{self, DEFAULT_TOLERANCE, SignatureStats};
use sigpad_core::SignatureData;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sigpad")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect, optimize and export signature documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a signature document as PNG, JPEG, SVG or JSON
    Export {
        /// Signature document (JSON)
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Output format (png, jpeg, svg, json); guessed from the output extension if omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Encoder quality between 0 and 1 (JPEG only)
        #[arg(short, long)]
        quality: Option<f64>,

        /// Background color override for raster output
        #[arg(short, long)]
        background: Option<String>,
    },

    /// Print stroke count, point count, duration and bounds
    Stats {
        /// Signature document (JSON)
        input: PathBuf,
    },

    /// Drop points closer than the tolerance to their predecessor
    Optimize {
        /// Signature document (JSON)
        input: PathBuf,

        /// Output document
        output: PathBuf,

        /// Minimum distance between kept points
        #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
    },

    /// Check that a file is a structurally valid signature document
    Validate {
        /// Signature document (JSON)
        input: PathBuf,
    },
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Commands::Export {
            input,
            output,
            format,
            quality,
            background,
        } => {
            let format = resolve_format(format.as_deref(), &output)?;
            let options = ExportOptions {
                format,
                quality,
                background_color: background,
            };
            let written = export_file(&input, &output, &options)?;
            log::info!("Wrote {} bytes to {}", written, output.display());
        }
        Commands::Stats { input } => {
            let stats = stats_file(&input)?;
            let text = serde_json::to_string_pretty(&stats).map_err(sigpad_core::SignatureError::from)?;
            println!("{}", text);
        }
        Commands::Optimize {
            input,
            output,
            tolerance,
        } => {
            let (before, after) = optimize_file(&input, &output, tolerance)?;
            log::info!("Reduced {} points to {}", before, after);
            println!("{} -> {} points", before, after);
        }
        Commands::Validate { input } => {
            if validate_file(&input)? {
                println!("{}: valid", input.display());
            } else {
                return Err(AppError::Usage(format!(
                    "{}: not a valid signature document",
                    input.display()
                )));
            }
        }
    }
    Ok(())
}

/// Format from an explicit name, else from the output extension, else PNG.
pub fn resolve_format(name: Option<&str>, output: &Path) -> AppResult<ExportFormat> {
    if let Some(name) = name {
        return ExportFormat::from_name(name)
            .ok_or_else(|| AppError::Usage(format!("unknown export format '{}'", name)));
    }

    let guessed = output
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ExportFormat::from_name);
    Ok(guessed.unwrap_or_default())
}

/// Read and validate a document.
pub fn load_document(path: &Path) -> AppResult<SignatureData> {
    let text = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    Ok(export::parse_validated(&text)?)
}

pub fn export_file(input: &Path, output: &Path, options: &ExportOptions) -> AppResult<usize> {
    let document = load_document(input)?;
    let encoded = sigpad_render::export(&document, options)?;
    let bytes = encoded.as_bytes();
    fs::write(output, bytes).map_err(|e| AppError::io(output, e))?;
    Ok(bytes.len())
}

pub fn stats_file(input: &Path) -> AppResult<SignatureStats> {
    Ok(stats::stats(&load_document(input)?))
}

/// Returns the point counts before and after.
pub fn optimize_file(input: &Path, output: &Path, tolerance: f64) -> AppResult<(usize, usize)> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(AppError::Usage(format!("invalid tolerance {}", tolerance)));
    }

    let document = load_document(input)?;
    let optimized = stats::optimize(&document, tolerance);
    fs::write(output, optimized.to_json()?).map_err(|e| AppError::io(output, e))?;
    Ok((document.total_points(), optimized.total_points()))
}

/// Malformed JSON is an error; well-formed JSON of the wrong shape is `false`.
pub fn validate_file(input: &Path) -> AppResult<bool> {
    let text = fs::read_to_string(input).map_err(|e| AppError::io(input, e))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(sigpad_core::SignatureError::from)?;
    Ok(export::validate(&value))
}
