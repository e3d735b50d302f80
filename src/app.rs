//! Application state and the unidirectional update cycle.
//!
//! `SvatApp` is the single explicit state struct: annotation store,
//! history, viewport, interaction mode, backend session, and the
//! transient UI state (status message, label prompt, context menu).
//! Every user action flows through [`SvatApp::update`] as a
//! [`Message`]; a rendering shell reads the fields back out.
//!
//! The segmentation HTTP call itself happens outside the reducer: the
//! shell calls [`SvatApp::begin_segmentation`] to get a validated
//! request plus the current edit generation, performs the call (off the
//! UI thread if it likes), and feeds the outcome back in as
//! [`Message::SegmentationFinished`].

use crate::error::SvatError;
use crate::formats::{self, ImageInfo};
use crate::handlers;
use crate::history::History;
use crate::message::Message;
use crate::model::{AnnotationStore, Mode, PolygonId};
use crate::segment::{SegmentRequest, Session};
use crate::viewport::Viewport;

/// A pending label prompt and what confirming it will commit.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingLabel {
    /// A segmentation result waiting for its label. `generation` is the
    /// store's edit generation when the result arrived; the prompts are
    /// only cleared at commit if it still matches (otherwise they are
    /// newer than this result and stay).
    Segmented {
        vertices: Vec<crate::geometry::Point>,
        score: f32,
        generation: u64,
    },
    /// A finished freehand drawing waiting for its label.
    Drawn {
        vertices: Vec<crate::geometry::Point>,
    },
    /// Relabeling an existing polygon.
    Relabel { id: PolygonId },
}

/// The context menu, open at a display position over a selected polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenuState {
    pub x: f32,
    pub y: f32,
    /// The polygon the menu acts on.
    pub polygon: PolygonId,
}

/// What the pointer is currently dragging.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) enum DragState {
    #[default]
    Idle,
    /// Panning the viewport; stores the last pointer position.
    Panning { last_x: f32, last_y: f32 },
    /// Dragging one vertex of a polygon.
    Vertex { index: usize },
}

/// The whole application state.
#[derive(Debug, Default)]
pub struct SvatApp {
    /// Annotations, prompts, selection.
    pub store: AnnotationStore,
    /// Undo/redo snapshots.
    pub history: History,
    /// Pan/zoom transform.
    pub viewport: Viewport,
    /// Active interaction mode.
    pub mode: Mode,
    /// Live backend session, if an image has been uploaded.
    pub session: Option<Session>,
    /// Transient, non-blocking status line.
    pub status_message: Option<String>,
    /// Open label prompt, if any.
    pub pending_label: Option<PendingLabel>,
    /// Open context menu, if any.
    pub context_menu: Option<ContextMenuState>,
    pub(crate) drag: DragState,
}

impl SvatApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one message. All state mutation goes through here.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::SetMode(mode) => handlers::handle_set_mode(self, mode),

            Message::PointerDown { x, y } => handlers::handle_pointer_down(self, x, y),
            Message::PointerMove { x, y } => handlers::handle_pointer_move(self, x, y),
            Message::PointerUp => handlers::handle_pointer_up(self),
            Message::DoubleClick { x, y } => handlers::handle_double_click(self, x, y),
            Message::RightClick { x, y } => handlers::handle_right_click(self, x, y),

            Message::ZoomIn => self.viewport = self.viewport.zoom_in(),
            Message::ZoomOut => self.viewport = self.viewport.zoom_out(),
            Message::ZoomAtCursor { zoom, x, y } => {
                self.viewport = self.viewport.zoom_to_cursor(zoom, x, y);
            }
            Message::ResetView => self.viewport = Viewport::identity(),

            Message::Undo => handlers::handle_undo(self),
            Message::Redo => handlers::handle_redo(self),

            Message::ClearPrompts => handlers::handle_clear_prompts(self),
            Message::ClearAll => handlers::handle_clear_all(self),
            Message::DeleteSelected => handlers::handle_delete_selected(self),
            Message::RelabelSelected => handlers::handle_relabel_selected(self),
            Message::CloseContextMenu => self.context_menu = None,
            Message::LabelSubmitted(label) => handlers::handle_label_submitted(self, label),

            Message::SessionStarted(session) => handlers::handle_session_started(self, session),
            Message::SegmentationFinished { generation, result } => {
                handlers::handle_segmentation_finished(self, generation, result);
            }

            Message::ImportGeneric(contents) => handlers::handle_import_generic(self, &contents),
        }
    }

    /// Validate preconditions and build a segmentation request from the
    /// accumulated prompts, along with the edit generation to tag the
    /// response with. Does not mutate any state.
    pub fn begin_segmentation(&self) -> Result<(SegmentRequest, u64), SvatError> {
        let session = self.session.as_ref().ok_or(SvatError::SessionMissing)?;
        if !self.store.has_prompts() {
            return Err(SvatError::EmptyInput);
        }
        let request = SegmentRequest::from_prompts(
            session.session_id.clone(),
            &self.store.points,
            self.store.prompt_box.as_ref(),
        );
        Ok((request, self.store.generation()))
    }

    /// Metadata of the current image, for export.
    fn image_info(&self) -> Result<ImageInfo, SvatError> {
        let session = self.session.as_ref().ok_or(SvatError::SessionMissing)?;
        Ok(ImageInfo::new(
            session.image_name.clone(),
            session.image_size.0,
            session.image_size.1,
        ))
    }

    /// Serialize the polygon list to the generic JSON schema.
    pub fn export_generic(&self) -> Result<String, SvatError> {
        let info = self.image_info()?;
        Ok(formats::generic::export(&self.store.polygons, &info)?)
    }

    /// Serialize the polygon list to COCO dataset JSON.
    pub fn export_coco(&self) -> Result<String, SvatError> {
        let info = self.image_info()?;
        Ok(formats::coco::export(&self.store.polygons, &info)?)
    }

    /// Set the transient status line.
    pub(crate) fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}
