//! Native generic annotation JSON format.
//!
//! One JSON document per image, with the polygon list and two parallel
//! arrays for labels and scores:
//!
//! ```json
//! {
//!   "image": "photo.jpg",
//!   "width": 640,
//!   "height": 480,
//!   "polygons": [[[x, y], ...], ...],
//!   "labels": ["Object", ...],
//!   "scores": [0.97, null, ...]
//! }
//! ```
//!
//! Import only requires the `polygons` field; labels default to
//! `Obj_<index+1>` and scores are discarded by design.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::common::{pairs_to_vertices, vertices_to_pairs, ImageInfo};
use super::error::FormatError;
use crate::constants::MIN_POLYGON_VERTICES;
use crate::geometry::Point;
use crate::model::Polygon;

#[derive(Debug, Serialize)]
struct GenericDocument {
    image: String,
    width: u32,
    height: u32,
    polygons: Vec<Vec<[f32; 2]>>,
    labels: Vec<String>,
    scores: Vec<Option<f32>>,
}

#[derive(Debug, Deserialize)]
struct GenericImport {
    polygons: Option<Vec<Vec<[f32; 2]>>>,
    #[serde(default)]
    labels: Vec<String>,
}

/// Serialize the polygon list to formatted generic JSON.
pub fn export(polygons: &[Polygon], info: &ImageInfo) -> Result<String, FormatError> {
    let doc = GenericDocument {
        image: info.file_name.clone(),
        width: info.width,
        height: info.height,
        polygons: polygons
            .iter()
            .map(|p| vertices_to_pairs(&p.vertices))
            .collect(),
        labels: polygons.iter().map(|p| p.label.clone()).collect(),
        scores: polygons.iter().map(|p| p.score).collect(),
    };
    let json = serde_json::to_string_pretty(&doc)?;
    log::info!("Exported {} polygons to generic JSON", polygons.len());
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

/// Parse generic JSON back into (vertices, label) pairs.
///
/// Fails with a missing-field error if the document has no `polygons`
/// array, and rejects entries with fewer than 3 vertices. Labels come
/// from the parallel `labels` array, defaulting to `Obj_<index+1>` where
/// it is short or absent. Scores are not preserved.
pub fn import(json: &str) -> Result<Vec<(Vec<Point>, String)>, FormatError> {
    let doc: GenericImport = serde_json::from_str(json)?;
    let polygons = doc
        .polygons
        .ok_or_else(|| FormatError::missing_field("polygons"))?;

    for (i, pairs) in polygons.iter().enumerate() {
        if pairs.len() < MIN_POLYGON_VERTICES {
            return Err(FormatError::invalid_data(format!(
                "polygon {} has {} vertices, need at least {}",
                i,
                pairs.len(),
                MIN_POLYGON_VERTICES
            )));
        }
    }

    let imported: Vec<(Vec<Point>, String)> = polygons
        .iter()
        .enumerate()
        .map(|(i, pairs)| {
            let label = doc
                .labels
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Obj_{}", i + 1));
            (pairs_to_vertices(pairs), label)
        })
        .collect();

    log::info!("Imported {} polygons from generic JSON", imported.len());
    Ok(imported)
}
