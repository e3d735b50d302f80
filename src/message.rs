//! Application message types.
//!
//! All UI events and actions are represented as messages in the Elm
//! architecture style. Pointer coordinates are in display space; handlers
//! convert to image space through the viewport.

use crate::error::SvatError;
use crate::model::Mode;
use crate::segment::{SegmentResponse, Session};

/// Messages that can be sent to update application state.
#[derive(Debug)]
pub enum Message {
    /// Switch the active interaction mode.
    SetMode(Mode),

    // Pointer events (display coordinates)
    /// Left button pressed.
    PointerDown { x: f32, y: f32 },
    /// Pointer moved (with or without a button held).
    PointerMove { x: f32, y: f32 },
    /// Left button released.
    PointerUp,
    /// Left button double-clicked.
    DoubleClick { x: f32, y: f32 },
    /// Right button pressed.
    RightClick { x: f32, y: f32 },

    // Viewport
    /// Zoom in one step.
    ZoomIn,
    /// Zoom out one step.
    ZoomOut,
    /// Set an absolute zoom, anchored on the cursor position.
    ZoomAtCursor { zoom: f32, x: f32, y: f32 },
    /// Reset pan and zoom.
    ResetView,

    // History
    /// Undo the last action.
    Undo,
    /// Redo the previously undone action.
    Redo,

    // Store edits
    /// Clear accumulated prompt points and box.
    ClearPrompts,
    /// Clear everything (prompts, drawing, polygons, selection).
    ClearAll,
    /// Delete the selected polygon (toolbar or context menu).
    DeleteSelected,
    /// Open the label prompt to relabel the selected polygon.
    RelabelSelected,
    /// Dismiss the context menu without acting.
    CloseContextMenu,
    /// The label prompt was confirmed (`Some`) or cancelled (`None`).
    LabelSubmitted(Option<String>),

    // Backend
    /// An image upload finished and a new session is live.
    SessionStarted(Session),
    /// A segmentation request completed. `generation` is the store edit
    /// generation captured when the request was built; stale responses
    /// are discarded.
    SegmentationFinished {
        generation: u64,
        result: Result<SegmentResponse, SvatError>,
    },

    // Import
    /// Replace the polygon list from generic JSON file contents.
    ImportGeneric(String),
}
