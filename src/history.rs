//! Snapshot-based undo/redo for annotation and viewport state.
//!
//! Maintains two stacks of deep state copies:
//! - `undo_stack`: snapshots that can be restored (most recent at the end)
//! - `redo_stack`: snapshots undone since the last new action
//!
//! `snapshot()` is called *before* every state-mutating user action, so the
//! top of the undo stack is always the state just before the latest action.
//! Pushing a new snapshot clears the redo stack (linear history, no
//! branching). Stacks are unbounded and rapid edits are not coalesced.

use crate::model::AnnotationStore;
use crate::viewport::Viewport;

/// An immutable deep copy of the annotation store and viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub store: AnnotationStore,
    pub viewport: Viewport,
}

impl Snapshot {
    pub fn capture(store: &AnnotationStore, viewport: &Viewport) -> Self {
        Self {
            store: store.clone(),
            viewport: *viewport,
        }
    }
}

/// The undo/redo history.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a snapshot of the current state onto the undo stack.
    /// Clears the redo stack (can't redo after a new action).
    pub fn snapshot(&mut self, store: &AnnotationStore, viewport: &Viewport) {
        self.undo_stack.push(Snapshot::capture(store, viewport));
        self.redo_stack.clear();
        log::debug!("Undo: pushed snapshot ({} entries)", self.undo_stack.len());
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Restore the most recent snapshot, moving the current state onto the
    /// redo stack. Returns false (no-op) if there is nothing to undo.
    pub fn undo(&mut self, store: &mut AnnotationStore, viewport: &mut Viewport) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(Snapshot::capture(store, viewport));
        *store = snapshot.store;
        *viewport = snapshot.viewport;
        log::debug!("Undo ({} left)", self.undo_stack.len());
        true
    }

    /// Mirror of [`History::undo`].
    pub fn redo(&mut self, store: &mut AnnotationStore, viewport: &mut Viewport) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(Snapshot::capture(store, viewport));
        *store = snapshot.store;
        *viewport = snapshot.viewport;
        log::debug!("Redo ({} left)", self.redo_stack.len());
        true
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
