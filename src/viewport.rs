//! Viewport pan/zoom transform between display and image space.
//!
//! The affine map `display = image * zoom + pan` applies uniformly to the
//! image layer and every annotation layer so they move and scale together.
//! Extracted into plain functions for testability.

use serde::{Deserialize, Serialize};

use crate::constants::zoom as zoom_const;
use crate::geometry::Point;

/// Pan/zoom state of the canvas viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Uniform scale factor, always > 0.
    pub zoom: f32,
    /// Pan offset X in display pixels.
    pub pan_x: f32,
    /// Pan offset Y in display pixels.
    pub pan_y: f32,
}

impl Viewport {
    /// Create a new viewport with the given zoom and pan.
    pub fn new(zoom: f32, pan_x: f32, pan_y: f32) -> Self {
        Self { zoom, pan_x, pan_y }
    }

    /// Identity viewport (zoom=1, no pan).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Map a display-space position to image coordinates: `(d - pan) / zoom`.
    pub fn to_image(&self, display_x: f32, display_y: f32) -> Point {
        Point::new(
            (display_x - self.pan_x) / self.zoom,
            (display_y - self.pan_y) / self.zoom,
        )
    }

    /// Map an image-space point to display coordinates: `i * zoom + pan`.
    pub fn to_display(&self, point: &Point) -> (f32, f32) {
        (
            point.x * self.zoom + self.pan_x,
            point.y * self.zoom + self.pan_y,
        )
    }

    /// Zoom toward the cursor, keeping the image point under it fixed.
    ///
    /// The image point under the cursor before the scale change is computed,
    /// then pan is adjusted so that same point maps back to the cursor:
    /// `pan' = c - ((c - pan) / zoom) * new_zoom` per axis.
    pub fn zoom_to_cursor(&self, new_zoom: f32, cursor_x: f32, cursor_y: f32) -> Viewport {
        let new_zoom = new_zoom.clamp(zoom_const::MIN, zoom_const::MAX);
        let img = self.to_image(cursor_x, cursor_y);
        Viewport {
            zoom: new_zoom,
            pan_x: cursor_x - img.x * new_zoom,
            pan_y: cursor_y - img.y * new_zoom,
        }
    }

    /// Apply a pan delta (display pixels) to the viewport.
    pub fn pan_by(&self, dx: f32, dy: f32) -> Viewport {
        Viewport {
            zoom: self.zoom,
            pan_x: self.pan_x + dx,
            pan_y: self.pan_y + dy,
        }
    }

    /// Zoom in by the standard factor, clamped to the maximum.
    pub fn zoom_in(&self) -> Viewport {
        Viewport {
            zoom: (self.zoom * zoom_const::FACTOR).min(zoom_const::MAX),
            ..*self
        }
    }

    /// Zoom out by the standard factor, clamped to the minimum.
    pub fn zoom_out(&self) -> Viewport {
        Viewport {
            zoom: (self.zoom / zoom_const::FACTOR).max(zoom_const::MIN),
            ..*self
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity()
    }
}
