//! Polygon input: plain-text vertex lists and GeoJSON.

use geo::Coord;
use geojson::{GeoJson, Geometry, Value};
use std::fs;
use std::path::Path;

use crate::error::{Result, ScanfillError};
use crate::polygon::Polygon;
use crate::scanline::Vertex;

/// Input file format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// One `x,y` (or `x y`) vertex per line, blank line between polygons.
    Text,
    Geojson,
}

/// Polygons loaded from an input file.
#[derive(Debug)]
pub struct PolygonReader {
    polygons: Vec<Polygon>,
}

impl PolygonReader {
    /// Opens and parses an input file.
    pub fn open(path: &Path, format: Format) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ScanfillError::FileNotFound(path.display().to_string())
            } else {
                ScanfillError::Io(e)
            }
        })?;

        let polygons = match format {
            Format::Text => parse_text(&content)?,
            Format::Geojson => parse_geojson(&content)?,
        };

        if polygons.is_empty() {
            return Err(ScanfillError::NoPolygons(path.display().to_string()));
        }

        Ok(Self { polygons })
    }

    /// Returns all parsed polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }
}

/// Parse the plain-text vertex list format.
///
/// `#` starts a comment. Blank lines separate polygons.
pub fn parse_text(content: &str) -> Result<Vec<Polygon>> {
    let mut polygons = Vec::new();
    let mut current: Vec<Vertex> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();

        if line.is_empty() {
            // A comment-only line does not end the polygon.
            if raw.trim().is_empty() && !current.is_empty() {
                polygons.push(Polygon::new(std::mem::take(&mut current)));
            }
            continue;
        }

        current.push(parse_vertex(line, idx + 1)?);
    }

    if !current.is_empty() {
        polygons.push(Polygon::new(current));
    }

    Ok(polygons)
}

fn parse_vertex(line: &str, line_no: usize) -> Result<Vertex> {
    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() != 2 {
        return Err(ScanfillError::InvalidVertex {
            line: line_no,
            reason: format!("expected 2 coordinates, got {}", parts.len()),
        });
    }

    let coord = |s: &str| -> Result<f64> {
        s.parse().map_err(|_| ScanfillError::InvalidVertex {
            line: line_no,
            reason: format!("invalid number '{}'", s),
        })
    };

    Ok(Coord {
        x: coord(parts[0])?,
        y: coord(parts[1])?,
    })
}

/// Parse GeoJSON content into polygons.
pub fn parse_geojson(content: &str) -> Result<Vec<Polygon>> {
    let geojson: GeoJson = content
        .parse()
        .map_err(|e| ScanfillError::InputParse(format!("{}", e)))?;
    Ok(extract_polygons(&geojson))
}

/// Extract polygon geometries from GeoJSON.
fn extract_polygons(geojson: &GeoJson) -> Vec<Polygon> {
    let mut polygons = Vec::new();

    match geojson {
        GeoJson::Geometry(geom) => polygons.extend(geometry_to_polygons(geom)),
        GeoJson::Feature(feature) => {
            if let Some(ref geom) = feature.geometry {
                polygons.extend(geometry_to_polygons(geom));
            }
        }
        GeoJson::FeatureCollection(collection) => {
            for feature in &collection.features {
                if let Some(ref geom) = feature.geometry {
                    polygons.extend(geometry_to_polygons(geom));
                }
            }
        }
    }

    polygons
}

fn geometry_to_polygons(geom: &Geometry) -> Vec<Polygon> {
    match &geom.value {
        Value::Polygon(rings) => polygon_from_rings(rings).into_iter().collect(),
        Value::MultiPolygon(multi) => multi
            .iter()
            .filter_map(|rings| polygon_from_rings(rings))
            .collect(),
        Value::GeometryCollection(geometries) => {
            geometries.iter().flat_map(geometry_to_polygons).collect()
        }
        _ => Vec::new(), // Ignore other geometry types
    }
}

/// First ring is the outline, the rest are holes.
fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Option<Polygon> {
    let (exterior, interiors) = rings.split_first()?;
    let exterior = ring_from_positions(exterior)?;
    let holes = interiors
        .iter()
        .filter_map(|ring| ring_from_positions(ring))
        .collect();

    Some(Polygon::new(exterior).with_holes(holes))
}

fn ring_from_positions(positions: &[Vec<f64>]) -> Option<Vec<Vertex>> {
    let points: Vec<Vertex> = positions
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| Coord { x: p[0], y: p[1] })
        .collect();

    if points.is_empty() {
        None
    } else {
        Some(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn test_parse_text_single_polygon() {
        let text = "0,0\n10,0\n0 10\n";
        let polygons = parse_text(text).unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(
            polygons[0].vertices,
            vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 10.0, y: 0.0 },
                coord! { x: 0.0, y: 10.0 },
            ]
        );
    }

    #[test]
    fn test_parse_text_multiple_polygons_and_comments() {
        let text = "# triangle\n0,0\n4,0 # corner\n0,4\n\n\n# square\n5,5\n# still the square\n9,5\n9,9\n5,9\n";
        let polygons = parse_text(text).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].vertices.len(), 3);
        assert_eq!(polygons[1].vertices.len(), 4);
    }

    #[test]
    fn test_parse_text_invalid_count() {
        let err = parse_text("0,0\n1,2,3\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn test_parse_text_invalid_number() {
        let err = parse_text("0,abc\n").unwrap_err();
        assert!(err.to_string().contains("invalid number 'abc'"));
    }

    #[test]
    fn test_parse_feature_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                    }
                }
            ]
        }"#;

        let polygons = parse_geojson(json).unwrap();
        assert_eq!(polygons.len(), 1);
        // closing position dropped
        assert_eq!(polygons[0].vertices.len(), 4);
    }

    #[test]
    fn test_parse_polygon_with_hole() {
        let json = r#"{
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                [[3.0, 3.0], [7.0, 3.0], [7.0, 7.0], [3.0, 7.0], [3.0, 3.0]]
            ]
        }"#;

        let polygons = parse_geojson(json).unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].holes.len(), 1);
        assert_eq!(polygons[0].holes[0].len(), 4);
    }

    #[test]
    fn test_parse_raw_multipolygon() {
        let json = r#"{
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                [[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]]
            ]
        }"#;

        let polygons = parse_geojson(json).unwrap();
        assert_eq!(polygons.len(), 2);
    }

    #[test]
    fn test_ignore_non_polygon_geometries() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [0.0, 0.0]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                    }
                }
            ]
        }"#;

        let polygons = parse_geojson(json).unwrap();
        assert_eq!(polygons.len(), 1);
    }

    #[test]
    fn test_parse_geojson_garbage() {
        let err = parse_geojson("{ not json").unwrap_err();
        assert!(matches!(err, ScanfillError::InputParse(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let err = PolygonReader::open(Path::new("does-not-exist.txt"), Format::Text).unwrap_err();
        assert!(matches!(err, ScanfillError::FileNotFound(_)));
    }

    #[test]
    fn test_open_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "# nothing here\n").unwrap();

        let err = PolygonReader::open(&path, Format::Text).unwrap_err();
        assert!(matches!(err, ScanfillError::NoPolygons(_)));
    }
}
