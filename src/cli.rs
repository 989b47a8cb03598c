//! CLI argument parsing and validation.

use clap::Parser;
use std::path::{Path, PathBuf};

use scanfill::error::{Result, ScanfillError};
use scanfill::input::Format;
use scanfill::polygon::Styles;

use crate::logger::VerbosityLevel;

/// Input file format
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InputFormat {
    Text,
    Geojson,
}

impl From<InputFormat> for Format {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Text => Format::Text,
            InputFormat::Geojson => Format::Geojson,
        }
    }
}

/// Command line arguments for scanfill.
#[derive(Parser, Debug)]
#[command(name = "scanfill")]
#[command(version, about = "Fill polygons with an even-odd scanline rasterizer", long_about = None)]
pub struct Args {
    /// Path to the polygon file (text vertex list or GeoJSON).
    pub input: PathBuf,

    /// Input file format (default: guessed from the extension).
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<InputFormat>,

    /// Output PNG path (default: <input stem>.png).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Canvas width in pixels (requires --height).
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels (requires --width).
    #[arg(long)]
    pub height: Option<u32>,

    /// Margin in pixels added around the polygons when sizing the canvas.
    #[arg(short, long, default_value = "10")]
    pub margin: u32,

    /// Translate the polygons so their bounds start at (margin, margin).
    #[arg(long)]
    pub fit: bool,

    /// Fill color hex, RRGGBB or RRGGBBAA.
    #[arg(long, default_value = "3C8CFFA0")]
    pub fill: String,

    /// Stroke color hex, RRGGBB or RRGGBBAA.
    #[arg(long, default_value = "141414FF")]
    pub stroke: String,

    /// Stroke width in pixels (0 disables the outline).
    #[arg(long, default_value = "2")]
    pub stroke_width: u32,

    /// Background color hex, RRGGBB or RRGGBBAA.
    #[arg(long, default_value = "FFFFFFFF")]
    pub background: String,

    /// Print the fill spans per row instead of writing an image.
    #[arg(long)]
    pub spans: bool,

    /// Only print the output path.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Timestamped logs with per-polygon details.
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

/// Fully validated configuration object.
#[derive(Debug)]
pub struct Config {
    /// Path to the input file.
    pub input: PathBuf,
    /// Input format.
    pub format: Format,
    /// Path of the PNG to write.
    pub output: PathBuf,
    /// Explicit canvas size (None means size from the polygon bounds).
    pub dimensions: Option<(u32, u32)>,
    /// Margin around the polygons.
    pub margin: u32,
    /// Move the polygons next to the canvas origin.
    pub fit: bool,
    /// Styles applied to every polygon.
    pub styles: Styles,
    /// Background color RGBA.
    pub background: [u8; 4],
    /// Dump spans instead of rendering.
    pub spans: bool,
}

impl Args {
    /// Verbosity selected by `-q` / `-v`.
    pub fn verbosity(&self) -> VerbosityLevel {
        VerbosityLevel::from_flags(self.quiet, self.verbose)
    }

    /// Validates arguments and converts them to a structured `Config`.
    ///
    /// Checks paired options and parses color hex strings.
    pub fn validate(self) -> Result<Config> {
        let dimensions = match (self.width, self.height) {
            (Some(width), Some(height)) => {
                if width == 0 || height == 0 {
                    return Err(ScanfillError::InvalidDimensions { width, height });
                }
                Some((width, height))
            }
            (None, None) => None,
            _ => return Err(ScanfillError::MissingDimension),
        };

        let styles = Styles {
            fill: parse_color(&self.fill)?,
            stroke: parse_color(&self.stroke)?,
            stroke_width: self.stroke_width,
        };
        let background = parse_color(&self.background)?;

        let format = self
            .format
            .map(Format::from)
            .unwrap_or_else(|| guess_format(&self.input));

        let output = self.output.clone().unwrap_or_else(|| {
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            PathBuf::from(format!("{}.png", stem))
        });

        Ok(Config {
            input: self.input,
            format,
            output,
            dimensions,
            margin: self.margin,
            fit: self.fit,
            styles,
            background,
            spans: self.spans,
        })
    }
}

fn guess_format(path: &Path) -> Format {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("geojson") || ext.eq_ignore_ascii_case("json") => {
            Format::Geojson
        }
        _ => Format::Text,
    }
}

/// Parse `RRGGBB` (opaque) or `RRGGBBAA`.
fn parse_color(s: &str) -> Result<[u8; 4]> {
    let bytes = hex::decode(s).map_err(|_| ScanfillError::InvalidColor(s.to_string()))?;
    match bytes.as_slice() {
        &[r, g, b] => Ok([r, g, b, 255]),
        &[r, g, b, a] => Ok([r, g, b, a]),
        _ => Err(ScanfillError::InvalidColor(format!(
            "color must be 6 or 8 hex digits, got {}",
            s.len()
        ))),
    }
}
