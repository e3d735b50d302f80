//! Message handlers for the application.
//!
//! Each handler processes one category of messages, keeping the
//! [`SvatApp::update`](crate::app::SvatApp::update) dispatch clean. The
//! invariant throughout: a history snapshot is pushed *before* every
//! state-mutating user action, never after.

use crate::app::{ContextMenuState, DragState, PendingLabel, SvatApp};
use crate::constants::{threshold, DEFAULT_LABEL, MIN_POLYGON_VERTICES};
use crate::error::SvatError;
use crate::model::Mode;
use crate::segment::{self, SegmentResponse, Session};
use crate::viewport::Viewport;

/// Switch the active mode. An in-progress drawing is abandoned, behind
/// one snapshot so an accidental switch is a single undo away.
pub fn handle_set_mode(app: &mut SvatApp, mode: Mode) {
    if app.mode == mode {
        return;
    }
    app.drag = DragState::Idle;
    if !app.store.working.is_empty() {
        app.history.snapshot(&app.store, &app.viewport);
        app.store.clear_working();
    }
    app.mode = mode;
    log::debug!("Mode: {}", mode.name());
}

pub fn handle_pointer_down(app: &mut SvatApp, x: f32, y: f32) {
    // An open context menu swallows the next left-click anywhere.
    if app.context_menu.is_some() {
        app.context_menu = None;
        return;
    }

    let img = app.viewport.to_image(x, y);
    match app.mode {
        Mode::None => {
            app.drag = DragState::Panning { last_x: x, last_y: y };
            log::debug!("Pan drag started at ({:.1}, {:.1})", x, y);
        }
        Mode::Point => {
            app.history.snapshot(&app.store, &app.viewport);
            app.store.add_point(img);
            log::debug!(
                "Added prompt point ({:.1}, {:.1}), total: {}",
                img.x,
                img.y,
                app.store.points.len()
            );
        }
        Mode::Box => {
            app.history.snapshot(&app.store, &app.viewport);
            app.store.place_box_corner(img);
            log::debug!("Box corner at ({:.1}, {:.1})", img.x, img.y);
        }
        Mode::Draw => {
            app.history.snapshot(&app.store, &app.viewport);
            app.store.add_working_vertex(img);
            log::debug!(
                "Added polygon vertex at ({:.1}, {:.1}), total: {}",
                img.x,
                img.y,
                app.store.working.len()
            );
        }
        Mode::Edit => {
            // Grab a vertex handle of the selected polygon first; the grab
            // radius is constant on screen, so divide by zoom.
            if let Some(selected) = app.store.selected_polygon() {
                let radius = threshold::VERTEX_HANDLE_RADIUS / app.viewport.zoom;
                let grabbed = selected
                    .vertices
                    .iter()
                    .position(|v| v.distance_to(&img) < radius);
                if let Some(index) = grabbed {
                    app.history.snapshot(&app.store, &app.viewport);
                    app.drag = DragState::Vertex { index };
                    log::debug!("Vertex {} drag started", index);
                    return;
                }
            }

            // Otherwise select the first polygon containing the point, or
            // deselect. Selection alone is not an undoable edit.
            let hit = app.store.hit_test(&img);
            match &hit {
                Some(id) => log::debug!("Selected polygon {}", id),
                None => log::debug!("Selection cleared"),
            }
            app.store.select(hit);
        }
    }
}

pub fn handle_pointer_move(app: &mut SvatApp, x: f32, y: f32) {
    match app.drag {
        DragState::Idle => {}
        DragState::Panning { last_x, last_y } => {
            app.viewport = app.viewport.pan_by(x - last_x, y - last_y);
            app.drag = DragState::Panning { last_x: x, last_y: y };
        }
        DragState::Vertex { index } => {
            // Live update; the pre-drag snapshot was taken at grab time.
            let img = app.viewport.to_image(x, y);
            if let Some(id) = app.store.selected.clone() {
                app.store.move_vertex(&id, index, img);
            }
        }
    }
}

pub fn handle_pointer_up(app: &mut SvatApp) {
    match app.drag {
        DragState::Panning { .. } => log::debug!("Pan drag ended"),
        DragState::Vertex { index } => log::debug!("Vertex {} drag committed", index),
        DragState::Idle => {}
    }
    app.drag = DragState::Idle;
}

/// Double-click finalizes a freehand polygon with at least 3 vertices:
/// the working ring is captured, the label prompt opens, and the mode
/// resets. One snapshot covers the whole finalize.
pub fn handle_double_click(app: &mut SvatApp, _x: f32, _y: f32) {
    if app.mode != Mode::Draw {
        return;
    }
    if app.store.working.len() < MIN_POLYGON_VERTICES {
        log::debug!(
            "Polygon needs at least {} vertices, has {}",
            MIN_POLYGON_VERTICES,
            app.store.working.len()
        );
        return;
    }
    app.history.snapshot(&app.store, &app.viewport);
    let vertices = app.store.working.clone();
    app.store.clear_working();
    app.mode = Mode::None;
    app.pending_label = Some(PendingLabel::Drawn { vertices });
    log::debug!("Drawing finalized, awaiting label");
}

/// Right-click opens the context menu at the pointer, but only while a
/// polygon is selected.
pub fn handle_right_click(app: &mut SvatApp, x: f32, y: f32) {
    let Some(id) = app.store.selected.clone() else {
        return;
    };
    app.context_menu = Some(ContextMenuState { x, y, polygon: id });
}

pub fn handle_undo(app: &mut SvatApp) {
    if app.history.undo(&mut app.store, &mut app.viewport) {
        app.set_status("Undo");
    }
}

pub fn handle_redo(app: &mut SvatApp) {
    if app.history.redo(&mut app.store, &mut app.viewport) {
        app.set_status("Redo");
    }
}

pub fn handle_clear_prompts(app: &mut SvatApp) {
    app.history.snapshot(&app.store, &app.viewport);
    app.store.clear_prompts();
    log::debug!("Prompts cleared");
}

pub fn handle_clear_all(app: &mut SvatApp) {
    let count = app.store.len();
    app.history.snapshot(&app.store, &app.viewport);
    app.store.clear_all();
    app.set_status(format!("Cleared {} polygons", count));
    log::info!("Cleared {} polygons", count);
}

/// Delete the polygon the context menu points at, or else the selection.
pub fn handle_delete_selected(app: &mut SvatApp) {
    let target = app
        .context_menu
        .take()
        .map(|menu| menu.polygon)
        .or_else(|| app.store.selected.clone());
    let Some(id) = target else {
        return;
    };
    app.history.snapshot(&app.store, &app.viewport);
    if app.store.remove_polygon(&id) {
        app.set_status("Polygon deleted");
        log::info!("Deleted polygon {}", id);
    }
}

/// Relabel via the context menu: opens the label prompt for the target
/// polygon. The actual rename happens on [`handle_label_submitted`].
pub fn handle_relabel_selected(app: &mut SvatApp) {
    let target = app
        .context_menu
        .take()
        .map(|menu| menu.polygon)
        .or_else(|| app.store.selected.clone());
    let Some(id) = target else {
        return;
    };
    app.pending_label = Some(PendingLabel::Relabel { id });
}

/// Commit whatever the open label prompt was for. A cancelled or empty
/// prompt falls back to the default label rather than aborting.
pub fn handle_label_submitted(app: &mut SvatApp, label: Option<String>) {
    let Some(pending) = app.pending_label.take() else {
        return;
    };
    let label = match label {
        Some(text) if !text.trim().is_empty() => text,
        _ => DEFAULT_LABEL.to_string(),
    };

    match pending {
        PendingLabel::Drawn { vertices } => {
            // Snapshot already taken when the drawing was finalized.
            let id = app.store.add_polygon(vertices, &label, None);
            app.set_status(format!("Added polygon '{}'", label));
            log::info!("Created drawn polygon {} ('{}')", id, label);
        }
        PendingLabel::Segmented {
            vertices,
            score,
            generation,
        } => {
            app.history.snapshot(&app.store, &app.viewport);
            // Prompts placed while the label prompt was open are newer
            // than this result; leave them alone.
            let prompts_current = app.store.generation() == generation;
            let id = app.store.add_polygon(vertices, &label, Some(score));
            if prompts_current {
                app.store.clear_prompts();
            }
            app.set_status(format!("Added polygon '{}' (score {:.2})", label, score));
            log::info!("Created segmented polygon {} ('{}', score {:.3})", id, label, score);
        }
        PendingLabel::Relabel { id } => {
            app.history.snapshot(&app.store, &app.viewport);
            if app.store.relabel(&id, &label) {
                app.set_status(format!("Relabeled to '{}'", label));
                log::info!("Relabeled polygon {} to '{}'", id, label);
            }
        }
    }
}

/// A new upload replaces the session entirely: annotations, history and
/// viewport all restart for the new image.
pub fn handle_session_started(app: &mut SvatApp, session: Session) {
    log::info!(
        "Session started: {} '{}' ({}x{})",
        session.session_id,
        session.image_name,
        session.image_size.0,
        session.image_size.1
    );
    app.set_status(format!("Loaded '{}'", session.image_name));
    app.session = Some(session);
    app.store.clear_all();
    app.history.clear();
    app.viewport = Viewport::identity();
    app.pending_label = None;
    app.context_menu = None;
    app.mode = Mode::None;
}

/// Handle a finished segmentation request. Responses tagged with an edit
/// generation older than the store's are stale and dropped.
pub fn handle_segmentation_finished(
    app: &mut SvatApp,
    generation: u64,
    result: Result<SegmentResponse, SvatError>,
) {
    if generation != app.store.generation() {
        log::warn!(
            "Discarding stale segmentation response (generation {} != {})",
            generation,
            app.store.generation()
        );
        return;
    }

    let response = match result {
        Ok(response) => response,
        Err(err) => {
            log::error!("Segmentation failed: {}", err);
            app.set_status(err.to_string());
            return;
        }
    };

    let Some(best) = segment::best_mask(&response.masks) else {
        app.set_status("No mask returned");
        return;
    };
    let Some(vertices) = segment::principal_contour(best) else {
        app.set_status("No mask returned");
        return;
    };

    log::info!(
        "Segmentation produced {} mask(s); best score {:.3}, {} vertices",
        response.masks.len(),
        best.score,
        vertices.len()
    );
    app.pending_label = Some(PendingLabel::Segmented {
        vertices,
        score: best.score,
        generation: app.store.generation(),
    });
}

/// Replace the polygon list from generic JSON contents.
pub fn handle_import_generic(app: &mut SvatApp, contents: &str) {
    match crate::formats::generic::import(contents) {
        Ok(polygons) => {
            let count = polygons.len();
            app.history.snapshot(&app.store, &app.viewport);
            app.store.replace_polygons(polygons);
            app.set_status(format!("Imported {} polygons", count));
        }
        Err(crate::formats::FormatError::MissingField { .. }) => {
            log::error!("Import rejected: no polygons field");
            app.set_status("Invalid file");
        }
        Err(err) => {
            log::error!("Import failed: {}", err);
            app.set_status(format!("Import failed: {}", err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::message::Message;
    use crate::segment::MaskCandidate;

    /// Fresh app with logging captured by the test harness.
    fn new_app() -> SvatApp {
        let _ = env_logger::builder().is_test(true).try_init();
        SvatApp::new()
    }

    fn app_with_session() -> SvatApp {
        let mut app = new_app();
        app.update(Message::SessionStarted(Session {
            session_id: "sess-1".to_string(),
            image_size: (640, 480),
            image_url: None,
            image_name: "test.jpg".to_string(),
        }));
        app
    }

    fn triangle_polygon(app: &mut SvatApp) -> String {
        app.store.add_polygon(
            vec![
                Point::new(0.0, 0.0),
                Point::new(20.0, 0.0),
                Point::new(0.0, 20.0),
            ],
            "thing",
            None,
        )
    }

    #[test]
    fn test_point_mode_adds_point_with_snapshot() {
        let mut app = new_app();
        app.update(Message::SetMode(Mode::Point));
        app.update(Message::PointerDown { x: 10.0, y: 20.0 });

        assert_eq!(app.store.points, vec![Point::new(10.0, 20.0)]);
        assert_eq!(app.history.undo_count(), 1);

        app.update(Message::Undo);
        assert!(app.store.points.is_empty());
    }

    #[test]
    fn test_point_converted_to_image_space() {
        let mut app = new_app();
        app.viewport = Viewport::new(2.0, 10.0, 10.0);
        app.update(Message::SetMode(Mode::Point));
        app.update(Message::PointerDown { x: 30.0, y: 50.0 });
        assert_eq!(app.store.points, vec![Point::new(10.0, 20.0)]);
    }

    #[test]
    fn test_box_mode_degenerate_then_extend() {
        let mut app = new_app();
        app.update(Message::SetMode(Mode::Box));
        app.update(Message::PointerDown { x: 5.0, y: 5.0 });
        assert_eq!(app.store.prompt_box.unwrap().as_xyxy(), [5.0, 5.0, 5.0, 5.0]);

        app.update(Message::PointerDown { x: 15.0, y: 25.0 });
        assert_eq!(app.store.prompt_box.unwrap().as_xyxy(), [5.0, 5.0, 15.0, 25.0]);
        assert_eq!(app.history.undo_count(), 2);
    }

    #[test]
    fn test_pan_drag_updates_viewport() {
        let mut app = new_app();
        app.update(Message::PointerDown { x: 100.0, y: 100.0 });
        app.update(Message::PointerMove { x: 110.0, y: 95.0 });
        app.update(Message::PointerUp);

        assert_eq!(app.viewport.pan_x, 10.0);
        assert_eq!(app.viewport.pan_y, -5.0);

        // No history entry for panning
        assert_eq!(app.history.undo_count(), 0);
    }

    #[test]
    fn test_draw_double_click_finalizes_with_label_prompt() {
        let mut app = new_app();
        app.update(Message::SetMode(Mode::Draw));
        for (x, y) in [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)] {
            app.update(Message::PointerDown { x, y });
        }
        app.update(Message::DoubleClick { x: 0.0, y: 10.0 });

        assert!(matches!(app.pending_label, Some(PendingLabel::Drawn { .. })));
        assert!(app.store.working.is_empty());
        assert_eq!(app.mode, Mode::None);

        app.update(Message::LabelSubmitted(Some("leaf".to_string())));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.polygons[0].label, "leaf");
        assert!(app.store.polygons[0].score.is_none());
    }

    #[test]
    fn test_draw_double_click_needs_three_vertices() {
        let mut app = new_app();
        app.update(Message::SetMode(Mode::Draw));
        app.update(Message::PointerDown { x: 0.0, y: 0.0 });
        app.update(Message::PointerDown { x: 10.0, y: 0.0 });
        app.update(Message::DoubleClick { x: 10.0, y: 0.0 });

        assert!(app.pending_label.is_none());
        assert_eq!(app.mode, Mode::Draw);
        assert_eq!(app.store.working.len(), 2);
    }

    #[test]
    fn test_label_cancel_falls_back_to_default() {
        let mut app = new_app();
        app.update(Message::SetMode(Mode::Draw));
        for (x, y) in [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)] {
            app.update(Message::PointerDown { x, y });
        }
        app.update(Message::DoubleClick { x: 0.0, y: 10.0 });
        app.update(Message::LabelSubmitted(None));

        assert_eq!(app.store.polygons[0].label, "Object");
    }

    #[test]
    fn test_mode_switch_abandons_drawing_one_undo_away() {
        let mut app = new_app();
        app.update(Message::SetMode(Mode::Draw));
        for (x, y) in [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)] {
            app.update(Message::PointerDown { x, y });
        }
        app.update(Message::SetMode(Mode::None));
        assert!(app.store.working.is_empty());

        // One undo brings back the whole ring, not n-1 vertices
        app.update(Message::Undo);
        assert_eq!(app.store.working.len(), 3);
    }

    #[test]
    fn test_edit_mode_select_and_deselect() {
        let mut app = new_app();
        let id = triangle_polygon(&mut app);
        app.update(Message::SetMode(Mode::Edit));

        app.update(Message::PointerDown { x: 5.0, y: 5.0 });
        assert_eq!(app.store.selected, Some(id));

        app.update(Message::PointerDown { x: 500.0, y: 500.0 });
        assert_eq!(app.store.selected, None);
    }

    #[test]
    fn test_vertex_drag_commits_one_history_entry() {
        let mut app = new_app();
        let id = triangle_polygon(&mut app);
        app.store.select(Some(id.clone()));
        app.update(Message::SetMode(Mode::Edit));

        // Grab the vertex at (20, 0) and drag it in two steps
        app.update(Message::PointerDown { x: 20.0, y: 0.0 });
        app.update(Message::PointerMove { x: 25.0, y: 5.0 });
        app.update(Message::PointerMove { x: 30.0, y: 10.0 });
        app.update(Message::PointerUp);

        assert_eq!(app.store.polygon(&id).unwrap().vertices[1], Point::new(30.0, 10.0));
        assert_eq!(app.history.undo_count(), 1);

        app.update(Message::Undo);
        assert_eq!(app.store.polygon(&id).unwrap().vertices[1], Point::new(20.0, 0.0));
    }

    #[test]
    fn test_context_menu_requires_selection() {
        let mut app = new_app();
        triangle_polygon(&mut app);

        app.update(Message::RightClick { x: 5.0, y: 5.0 });
        assert!(app.context_menu.is_none());

        app.update(Message::SetMode(Mode::Edit));
        app.update(Message::PointerDown { x: 5.0, y: 5.0 });
        app.update(Message::RightClick { x: 50.0, y: 60.0 });
        let menu = app.context_menu.as_ref().unwrap();
        assert_eq!((menu.x, menu.y), (50.0, 60.0));
    }

    #[test]
    fn test_left_click_dismisses_context_menu() {
        let mut app = new_app();
        let id = triangle_polygon(&mut app);
        app.store.select(Some(id));
        app.update(Message::RightClick { x: 5.0, y: 5.0 });
        assert!(app.context_menu.is_some());

        // The dismissing click is swallowed: no point is added even in
        // Point mode
        app.update(Message::SetMode(Mode::Point));
        app.update(Message::PointerDown { x: 1.0, y: 1.0 });
        assert!(app.context_menu.is_none());
        assert!(app.store.points.is_empty());
    }

    #[test]
    fn test_context_menu_delete() {
        let mut app = new_app();
        let id = triangle_polygon(&mut app);
        app.store.select(Some(id));
        app.update(Message::RightClick { x: 5.0, y: 5.0 });
        app.update(Message::DeleteSelected);

        assert!(app.store.is_empty());
        assert!(app.context_menu.is_none());

        app.update(Message::Undo);
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn test_context_menu_relabel() {
        let mut app = new_app();
        let id = triangle_polygon(&mut app);
        app.store.select(Some(id.clone()));
        app.update(Message::RightClick { x: 5.0, y: 5.0 });
        app.update(Message::RelabelSelected);
        assert_eq!(app.pending_label, Some(PendingLabel::Relabel { id: id.clone() }));

        app.update(Message::LabelSubmitted(Some("cat".to_string())));
        assert_eq!(app.store.polygon(&id).unwrap().label, "cat");
    }

    #[test]
    fn test_begin_segmentation_without_session() {
        let mut app = new_app();
        app.store.add_point(Point::new(1.0, 1.0));
        let err = app.begin_segmentation().unwrap_err();
        assert!(matches!(err, SvatError::SessionMissing));
        // Store untouched
        assert_eq!(app.store.len(), 0);
        assert_eq!(app.store.points.len(), 1);
    }

    #[test]
    fn test_begin_segmentation_without_prompts() {
        let app = app_with_session();
        assert!(matches!(app.begin_segmentation().unwrap_err(), SvatError::EmptyInput));
    }

    #[test]
    fn test_segmentation_flow_commits_polygon_and_clears_prompts() {
        let mut app = app_with_session();
        app.update(Message::SetMode(Mode::Point));
        app.update(Message::PointerDown { x: 50.0, y: 50.0 });

        let (request, generation) = app.begin_segmentation().unwrap();
        assert_eq!(request.session_id, "sess-1");
        assert_eq!(request.points.as_ref().unwrap().len(), 1);

        let response = SegmentResponse {
            image_size: Some([640, 480]),
            num_masks: Some(1),
            masks: vec![MaskCandidate {
                score: 0.91,
                polygons: vec![vec![[0.0, 0.0], [30.0, 0.0], [30.0, 30.0], [0.0, 30.0]]],
            }],
        };
        app.update(Message::SegmentationFinished {
            generation,
            result: Ok(response),
        });
        assert!(matches!(app.pending_label, Some(PendingLabel::Segmented { .. })));

        app.update(Message::LabelSubmitted(Some("rock".to_string())));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.polygons[0].label, "rock");
        assert_eq!(app.store.polygons[0].score, Some(0.91));
        assert!(app.store.points.is_empty());
        assert!(app.store.prompt_box.is_none());
    }

    #[test]
    fn test_prompts_added_during_label_prompt_survive_commit() {
        let mut app = app_with_session();
        app.update(Message::SetMode(Mode::Point));
        app.update(Message::PointerDown { x: 50.0, y: 50.0 });
        let (_, generation) = app.begin_segmentation().unwrap();

        app.update(Message::SegmentationFinished {
            generation,
            result: Ok(SegmentResponse {
                image_size: None,
                num_masks: None,
                masks: vec![MaskCandidate {
                    score: 0.8,
                    polygons: vec![vec![[0.0, 0.0], [5.0, 0.0], [0.0, 5.0]]],
                }],
            }),
        });

        // New prompt placed while the label prompt is open
        app.update(Message::PointerDown { x: 70.0, y: 70.0 });
        app.update(Message::LabelSubmitted(Some("bush".to_string())));

        // The polygon commits but the newer prompts are kept
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.points, vec![Point::new(50.0, 50.0), Point::new(70.0, 70.0)]);
    }

    #[test]
    fn test_stale_segmentation_response_discarded() {
        let mut app = app_with_session();
        app.update(Message::SetMode(Mode::Point));
        app.update(Message::PointerDown { x: 50.0, y: 50.0 });
        let (_, generation) = app.begin_segmentation().unwrap();

        // The user keeps editing while the request is in flight
        app.update(Message::PointerDown { x: 60.0, y: 60.0 });

        app.update(Message::SegmentationFinished {
            generation,
            result: Ok(SegmentResponse {
                image_size: None,
                num_masks: None,
                masks: vec![MaskCandidate {
                    score: 0.5,
                    polygons: vec![vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]],
                }],
            }),
        });

        // Stale response: no pending label, points kept
        assert!(app.pending_label.is_none());
        assert_eq!(app.store.points.len(), 2);
    }

    #[test]
    fn test_segmentation_error_sets_status() {
        let mut app = app_with_session();
        app.update(Message::SetMode(Mode::Point));
        app.update(Message::PointerDown { x: 50.0, y: 50.0 });
        let (_, generation) = app.begin_segmentation().unwrap();

        app.update(Message::SegmentationFinished {
            generation,
            result: Err(SvatError::backend("SAM prediction failed: boom")),
        });
        assert!(app.status_message.as_ref().unwrap().contains("boom"));
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_import_generic_replaces_after_snapshot() {
        let mut app = new_app();
        triangle_polygon(&mut app);

        let json = r#"{"polygons": [[[0,0],[5,0],[0,5]]], "labels": []}"#;
        app.update(Message::ImportGeneric(json.to_string()));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.polygons[0].label, "Obj_1");

        app.update(Message::Undo);
        assert_eq!(app.store.polygons[0].label, "thing");
    }

    #[test]
    fn test_import_invalid_file() {
        let mut app = new_app();
        app.update(Message::ImportGeneric(r#"{"labels": []}"#.to_string()));
        assert_eq!(app.status_message.as_deref(), Some("Invalid file"));
        assert_eq!(app.history.undo_count(), 0);
    }

    #[test]
    fn test_session_restart_resets_state() {
        let mut app = app_with_session();
        triangle_polygon(&mut app);
        app.update(Message::ZoomIn);

        app.update(Message::SessionStarted(Session {
            session_id: "sess-2".to_string(),
            image_size: (100, 100),
            image_url: None,
            image_name: "next.png".to_string(),
        }));
        assert!(app.store.is_empty());
        assert_eq!(app.history.undo_count(), 0);
        assert_eq!(app.viewport, Viewport::identity());
        assert_eq!(app.session.as_ref().unwrap().session_id, "sess-2");
    }

    #[test]
    fn test_export_requires_session() {
        let app = new_app();
        assert!(matches!(app.export_generic().unwrap_err(), SvatError::SessionMissing));
        assert!(matches!(app.export_coco().unwrap_err(), SvatError::SessionMissing));
    }

    #[test]
    fn test_export_import_roundtrip_through_app() {
        let mut app = app_with_session();
        triangle_polygon(&mut app);
        app.store.polygons[0].score = Some(0.7);

        let json = app.export_generic().unwrap();
        app.update(Message::ImportGeneric(json));

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.polygons[0].label, "thing");
        // Scores are dropped by design on import
        assert!(app.store.polygons[0].score.is_none());
    }
}
