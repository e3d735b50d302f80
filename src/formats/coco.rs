//! COCO (Common Objects in Context) export.
//!
//! Produces a single dataset JSON with `images`, `annotations`, and
//! `categories` arrays. Quirks kept from the reference exporter:
//!
//! - `area` is the bounding-box width × height, not the true polygon area.
//! - One category is emitted per polygon, not deduplicated by label.
//! - `iscrowd` is always 0, and `segmentation` is a single flat
//!   `[x1, y1, x2, y2, ...]` array per annotation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::common::{vertices_to_flat_coords, ImageInfo};
use super::error::FormatError;
use crate::geometry::BoundingBox;
use crate::model::Polygon;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CocoDataset {
    images: Vec<CocoImage>,
    annotations: Vec<CocoAnnotation>,
    categories: Vec<CocoCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CocoImage {
    id: i64,
    file_name: String,
    width: i64,
    height: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CocoAnnotation {
    id: i64,
    image_id: i64,
    category_id: i64,
    bbox: Vec<f64>,
    segmentation: Vec<Vec<f64>>,
    area: f64,
    iscrowd: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CocoCategory {
    id: i64,
    name: String,
    supercategory: String,
}

/// Serialize the polygon list to a COCO dataset JSON string.
pub fn export(polygons: &[Polygon], info: &ImageInfo) -> Result<String, FormatError> {
    let image_id = 1;
    let mut coco = CocoDataset {
        images: vec![CocoImage {
            id: image_id,
            file_name: info.file_name.clone(),
            width: info.width as i64,
            height: info.height as i64,
        }],
        annotations: Vec::new(),
        categories: Vec::new(),
    };

    for (idx, poly) in polygons.iter().enumerate() {
        let seq_id = (idx + 1) as i64;

        coco.categories.push(CocoCategory {
            id: seq_id,
            name: poly.label.clone(),
            supercategory: "object".to_string(),
        });

        let bbox = poly
            .bounding_box()
            .unwrap_or(BoundingBox::new(0.0, 0.0, 0.0, 0.0));
        let flat: Vec<f64> = vertices_to_flat_coords(&poly.vertices)
            .iter()
            .map(|&v| v as f64)
            .collect();

        coco.annotations.push(CocoAnnotation {
            id: seq_id,
            image_id,
            category_id: seq_id,
            bbox: vec![
                bbox.x as f64,
                bbox.y as f64,
                bbox.width as f64,
                bbox.height as f64,
            ],
            segmentation: vec![flat],
            area: (bbox.width * bbox.height) as f64,
            iscrowd: 0,
        });
    }

    let json = serde_json::to_string_pretty(&coco)?;
    log::info!("Exported {} polygons to COCO JSON", polygons.len());
    Ok(json)
}

/// Export and write straight to a file path.
pub fn save(
    path: impl AsRef<Path>,
    polygons: &[Polygon],
    info: &ImageInfo,
) -> Result<(), FormatError> {
    let json = export(polygons, info)?;
    fs::write(path, json)?;
    Ok(())
}
