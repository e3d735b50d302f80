//! Annotation data model and in-memory store.
//!
//! The store owns everything the user has placed on the canvas: prompt
//! points and the prompt box fed to the segmentation backend, finalized
//! polygons, the in-progress drawing, and the current selection. Polygons
//! are referenced from outside the store only by id.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, BoundingBox, Point};

/// Unique identifier for a polygon.
pub type PolygonId = String;

/// Active interaction mode, selecting how pointer-down events are
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No annotation tool active; dragging pans the viewport.
    #[default]
    None,
    /// Accumulate segmentation prompt points.
    Point,
    /// Define/extend the segmentation prompt box.
    Box,
    /// Draw a freehand polygon vertex by vertex.
    Draw,
    /// Select existing polygons and drag their vertices.
    Edit,
}

impl Mode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::None => "Pan",
            Mode::Point => "Point",
            Mode::Box => "Box",
            Mode::Draw => "Draw",
            Mode::Edit => "Edit",
        }
    }
}

/// A prompt box defined by two opposite corners in image coordinates.
///
/// The second corner is mutable while the box is being defined: the first
/// click sets both corners equal (a degenerate box), later clicks move
/// only the second corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxCorners {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoxCorners {
    /// Create a degenerate box with both corners at the given point.
    pub fn at(p: Point) -> Self {
        Self {
            x1: p.x,
            y1: p.y,
            x2: p.x,
            y2: p.y,
        }
    }

    /// Move the second corner.
    pub fn set_second(&mut self, p: Point) {
        self.x2 = p.x;
        self.y2 = p.y;
    }

    /// Normalized `[x_min, y_min, x_max, y_max]` as sent on the wire.
    pub fn as_xyxy(&self) -> [f32; 4] {
        [
            self.x1.min(self.x2),
            self.y1.min(self.y2),
            self.x1.max(self.x2),
            self.y1.max(self.y2),
        ]
    }
}

/// A finalized polygon annotation.
///
/// Vertices are an ordered ring, closed implicitly (first/last vertex not
/// duplicated). Created by segmentation or manual drawing, mutated by
/// vertex drag or relabel, destroyed by delete or clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Unique identifier.
    pub id: PolygonId,
    /// The vertex ring in image coordinates.
    pub vertices: Vec<Point>,
    /// User-facing label.
    pub label: String,
    /// Model confidence in [0, 1], when produced by segmentation.
    pub score: Option<f32>,
}

impl Polygon {
    /// Axis-aligned bounding box over the vertices.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::of_vertices(&self.vertices)
    }

    /// Shoelace area of the vertex ring.
    pub fn area(&self) -> f32 {
        geometry::polygon_area(&self.vertices)
    }

    /// Ray-casting containment test.
    pub fn contains(&self, point: &Point) -> bool {
        geometry::point_in_polygon(&self.vertices, point)
    }
}

/// In-memory collections of points, box, and finalized polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnnotationStore {
    /// Accumulated prompt points (foreground indicators). Ephemeral:
    /// cleared after each successful segmentation or on explicit clear.
    pub points: Vec<Point>,
    /// The prompt box, if one is being defined.
    pub prompt_box: Option<BoxCorners>,
    /// Finalized polygons.
    pub polygons: Vec<Polygon>,
    /// Id of the currently selected polygon, if any.
    pub selected: Option<PolygonId>,
    /// Vertices of the polygon currently being drawn freehand.
    pub working: Vec<Point>,
    /// Counter for generating polygon ids.
    next_id: u64,
    /// Bumped on every mutation. Segmentation responses are tagged with
    /// the generation at request time and discarded if it has moved on.
    generation: u64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current edit generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn touch(&mut self) {
        self.generation += 1;
    }

    fn fresh_id(&mut self) -> PolygonId {
        self.next_id += 1;
        format!("poly_{}", self.next_id)
    }

    /// Whether any segmentation prompt (point or box) is set.
    pub fn has_prompts(&self) -> bool {
        !self.points.is_empty() || self.prompt_box.is_some()
    }

    /// Append a prompt point.
    pub fn add_point(&mut self, p: Point) {
        self.points.push(p);
        self.touch();
    }

    /// Place or extend the prompt box: the first call anchors a degenerate
    /// box, subsequent calls move the second corner.
    pub fn place_box_corner(&mut self, p: Point) {
        match &mut self.prompt_box {
            Some(b) => b.set_second(p),
            None => self.prompt_box = Some(BoxCorners::at(p)),
        }
        self.touch();
    }

    /// Append a working vertex for the freehand polygon.
    pub fn add_working_vertex(&mut self, p: Point) {
        self.working.push(p);
        self.touch();
    }

    /// Add a finalized polygon and return its id.
    pub fn add_polygon(
        &mut self,
        vertices: Vec<Point>,
        label: impl Into<String>,
        score: Option<f32>,
    ) -> PolygonId {
        let id = self.fresh_id();
        self.polygons.push(Polygon {
            id: id.clone(),
            vertices,
            label: label.into(),
            score,
        });
        self.touch();
        id
    }

    /// Look up a polygon by id.
    pub fn polygon(&self, id: &str) -> Option<&Polygon> {
        self.polygons.iter().find(|p| p.id == id)
    }

    /// The currently selected polygon, if any.
    pub fn selected_polygon(&self) -> Option<&Polygon> {
        self.selected.as_deref().and_then(|id| self.polygon(id))
    }

    /// Select a polygon by id (or deselect with `None`). Selection is not
    /// an edit, so the generation is left alone.
    pub fn select(&mut self, id: Option<PolygonId>) {
        self.selected = id;
    }

    /// Hit-test a point against every polygon's vertex ring, returning the
    /// id of the first polygon containing it.
    pub fn hit_test(&self, p: &Point) -> Option<PolygonId> {
        self.polygons
            .iter()
            .find(|poly| poly.contains(p))
            .map(|poly| poly.id.clone())
    }

    /// Remove a polygon by id. Clears the selection if it pointed at it.
    pub fn remove_polygon(&mut self, id: &str) -> bool {
        let before = self.polygons.len();
        self.polygons.retain(|p| p.id != id);
        let removed = self.polygons.len() != before;
        if removed {
            if self.selected.as_deref() == Some(id) {
                self.selected = None;
            }
            self.touch();
        }
        removed
    }

    /// Change a polygon's label.
    pub fn relabel(&mut self, id: &str, label: impl Into<String>) -> bool {
        let Some(poly) = self.polygons.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        poly.label = label.into();
        self.touch();
        true
    }

    /// Move one vertex of a polygon.
    pub fn move_vertex(&mut self, id: &str, index: usize, p: Point) -> bool {
        let Some(poly) = self.polygons.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        let Some(v) = poly.vertices.get_mut(index) else {
            return false;
        };
        *v = p;
        self.touch();
        true
    }

    /// Clear the segmentation prompts (points and box).
    pub fn clear_prompts(&mut self) {
        self.points.clear();
        self.prompt_box = None;
        self.touch();
    }

    /// Drop the in-progress drawing.
    pub fn clear_working(&mut self) {
        self.working.clear();
        self.touch();
    }

    /// Clear everything: prompts, working vertices, polygons, selection.
    pub fn clear_all(&mut self) {
        self.points.clear();
        self.prompt_box = None;
        self.working.clear();
        self.polygons.clear();
        self.selected = None;
        self.touch();
    }

    /// Replace the polygon list wholesale (used by import). Each polygon
    /// gets a freshly generated id; the selection is dropped.
    pub fn replace_polygons(&mut self, polygons: Vec<(Vec<Point>, String)>) {
        self.polygons.clear();
        self.selected = None;
        for (vertices, label) in polygons {
            let id = self.fresh_id();
            self.polygons.push(Polygon {
                id,
                vertices,
                label,
                score: None,
            });
        }
        self.touch();
    }

    /// Number of finalized polygons.
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
