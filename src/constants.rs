//! Application-wide constants.

/// Zoom limits and step factor for the viewport.
pub mod zoom {
    /// Minimum zoom scale.
    pub const MIN: f32 = 0.1;
    /// Maximum zoom scale.
    pub const MAX: f32 = 10.0;
    /// Multiplicative step for zoom in/out.
    pub const FACTOR: f32 = 1.2;
}

/// Hit-test thresholds, in image pixels at zoom 1.0.
pub mod threshold {
    /// Radius around a polygon vertex that counts as grabbing its handle.
    /// Divided by the current zoom so the grab area is constant on screen.
    pub const VERTEX_HANDLE_RADIUS: f32 = 8.0;
}

/// Minimum number of vertices required to finalize a drawn polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Label used when the user cancels or submits an empty label prompt.
pub const DEFAULT_LABEL: &str = "Object";
