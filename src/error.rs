use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanfillError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No polygons found in {0}")]
    NoPolygons(String),

    #[error("Invalid vertex on line {line}: {reason}")]
    InvalidVertex { line: usize, reason: String },

    #[error("Failed to parse input: {0}")]
    InputParse(String),

    #[error("Degenerate polygon: {vertices} vertices, {distinct} distinct (need at least 3)")]
    DegeneratePolygon { vertices: usize, distinct: usize },

    #[error("Invalid color format: {0}")]
    InvalidColor(String),

    #[error("Options --width and --height must be given together")]
    MissingDimension,

    #[error("Canvas dimensions must be positive, got: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Image dimensions too large: {width}x{height} pixels (max: {max})")]
    ImageTooLarge { width: u32, height: u32, max: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ScanfillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScanfillError::FileNotFound("shape.txt".to_string());
        assert_eq!(err.to_string(), "File not found: shape.txt");
    }

    #[test]
    fn test_invalid_vertex_display() {
        let err = ScanfillError::InvalidVertex {
            line: 3,
            reason: "expected 2 coordinates, got 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid vertex on line 3: expected 2 coordinates, got 1"
        );
    }

    #[test]
    fn test_degenerate_display() {
        let err = ScanfillError::DegeneratePolygon { vertices: 4, distinct: 2 };
        assert!(err.to_string().contains("4 vertices, 2 distinct"));
    }
}
