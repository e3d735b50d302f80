//! Shared helpers for annotation format conversions.

use crate::geometry::Point;

/// Metadata about the annotated image.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// The filename of the image (e.g., "image001.jpg").
    pub file_name: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl ImageInfo {
    /// Create a new ImageInfo with the given filename and dimensions.
    pub fn new(file_name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            file_name: file_name.into(),
            width,
            height,
        }
    }
}

/// Convert a vertex ring to COCO's flat coordinate list [x1, y1, x2, y2, ...].
pub fn vertices_to_flat_coords(vertices: &[Point]) -> Vec<f32> {
    vertices.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Convert `[[x, y], ...]` pairs to a vertex ring.
pub fn pairs_to_vertices(pairs: &[[f32; 2]]) -> Vec<Point> {
    pairs.iter().map(|[x, y]| Point::new(*x, *y)).collect()
}

/// Convert a vertex ring to `[[x, y], ...]` pairs.
pub fn vertices_to_pairs(vertices: &[Point]) -> Vec<[f32; 2]> {
    vertices.iter().map(|p| [p.x, p.y]).collect()
}
