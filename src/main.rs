mod cli;
mod logger;

use anyhow::{bail, Context, Result};
use clap::Parser;

use cli::{Args, Config};
use logger::Logger;
use scanfill::input::PolygonReader;
use scanfill::math::{canvas_dimensions, fit_offset, translate, Bounds};
use scanfill::render::Canvas;
use scanfill::{Polygon, Span};

fn main() {
    let args = Args::parse();
    Logger::init(args.verbosity(), args.no_color);

    if let Err(e) = run(args) {
        logger::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.validate()?;
    logger::debug(&format!("Config: {:?}", config));

    let reader = PolygonReader::open(&config.input, config.format)
        .with_context(|| format!("reading {}", config.input.display()))?;
    let mut polygons = drawable_polygons(reader.into_polygons(), &config);

    if polygons.is_empty() {
        bail!("no drawable polygons in {}", config.input.display());
    }

    let bounds = Bounds::of_all(polygons.iter().map(|p| p.vertices.as_slice()))
        .context("polygons have no vertices")?;

    let bounds = if config.fit {
        let offset = fit_offset(&bounds, config.margin);
        logger::debug(&format!("Translating by ({}, {})", offset.0, offset.1));
        for polygon in &mut polygons {
            translate(&mut polygon.vertices, offset);
            for hole in &mut polygon.holes {
                translate(hole, offset);
            }
        }
        Bounds::new(
            bounds.min_x + offset.0,
            bounds.min_y + offset.1,
            bounds.max_x + offset.0,
            bounds.max_y + offset.1,
        )
    } else {
        bounds
    };

    if config.spans {
        for (i, polygon) in polygons.iter().enumerate() {
            if polygons.len() > 1 {
                println!("# polygon {}", i);
            }
            for (y, row) in &polygon.spans() {
                println!("{}", format_row(*y, row));
            }
        }
        return Ok(());
    }

    let (width, height) = config
        .dimensions
        .unwrap_or_else(|| canvas_dimensions(&bounds, config.margin));
    logger::info(&format!(
        "Rendering {} polygon(s) on a {}x{} canvas",
        polygons.len(),
        width,
        height
    ));

    let mut canvas = Canvas::new(width, height, config.background)?;
    for (i, polygon) in polygons.iter().enumerate() {
        if logger::is_verbose() {
            let spans = polygon.spans();
            let pixels: u64 = spans.values().flatten().map(|s| s.width()).sum();
            logger::debug(&format!(
                "Polygon {}: {} vertices, {} holes, {} rows, {} pixels",
                i,
                polygon.vertices.len(),
                polygon.holes.len(),
                spans.len(),
                pixels
            ));
        }
        canvas.draw_polygon(polygon);
    }

    canvas
        .save(&config.output)
        .with_context(|| format!("writing {}", config.output.display()))?;
    logger::output(&config.output.display().to_string());

    Ok(())
}

/// Apply the configured styles and drop degenerate polygons with a warning.
fn drawable_polygons(polygons: Vec<Polygon>, config: &Config) -> Vec<Polygon> {
    polygons
        .into_iter()
        .enumerate()
        .filter_map(|(i, polygon)| match polygon.validate() {
            Ok(()) => Some(polygon.with_styles(config.styles)),
            Err(e) => {
                logger::warn(&format!("Skipping polygon {}: {}", i, e));
                None
            }
        })
        .collect()
}

/// `y: l..=r l..=r`
fn format_row(y: i32, spans: &[Span]) -> String {
    let spans: Vec<String> = spans
        .iter()
        .map(|s| format!("{}..={}", s.x_left, s.x_right))
        .collect();
    format!("{}: {}", y, spans.join(" "))
}
