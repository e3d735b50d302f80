//! SVAT - Segmentation-Vision Annotation Tool
//!
//! Core state machine of an interactive image annotation tool built
//! around a Segment-Anything backend: prompt collection (points/boxes),
//! freehand polygon drawing, selection and vertex editing,
//! snapshot-based undo/redo, a pan/zoom viewport, and JSON/COCO
//! export/import. A rendering shell drives [`SvatApp`] with
//! [`Message`] values and draws from its public fields.

mod app;
mod constants;
mod error;
mod formats;
mod geometry;
mod handlers;
mod history;
mod message;
mod model;
mod segment;
mod viewport;

pub use app::{ContextMenuState, PendingLabel, SvatApp};
pub use constants::{threshold, zoom, DEFAULT_LABEL, MIN_POLYGON_VERTICES};
pub use error::SvatError;
pub use formats::{coco, generic, FormatError, ImageInfo};
pub use geometry::{point_in_polygon, polygon_area, polygon_centroid, BoundingBox, Point};
pub use history::History;
pub use message::Message;
pub use model::{AnnotationStore, BoxCorners, Mode, Polygon, PolygonId};
pub use segment::{
    best_mask, principal_contour, Client, HealthResponse, MaskCandidate, SegmentRequest,
    SegmentResponse, Session,
};
pub use viewport::Viewport;
