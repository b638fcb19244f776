//! Seam between the editor store and whatever renders the canvas.

use std::sync::Arc;

use parking_lot::Mutex;
use rb_common::{EditorElement, ElementId};

/// Receives the element list whenever the store's elements change.
///
/// Implementations own their renderer objects (and the elements'
/// `render_handle`s from their side); the store only pushes data. The call
/// happens while the store is borrowed, so implementations must not call
/// back into the store.
pub trait SceneSync {
    fn sync(&mut self, elements: &[EditorElement]);
}

/// A scene that only records the id lists it was given.
///
/// Clones share the same log, so a host can attach one clone to the store
/// and inspect another.
#[derive(Clone, Debug, Default)]
pub struct RecordingScene {
    log: Arc<Mutex<Vec<Vec<ElementId>>>>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync_count(&self) -> usize {
        self.log.lock().len()
    }

    /// Ids passed to the most recent sync, in draw order.
    pub fn last_ids(&self) -> Vec<ElementId> {
        self.log.lock().last().cloned().unwrap_or_default()
    }
}

impl SceneSync for RecordingScene {
    fn sync(&mut self, elements: &[EditorElement]) {
        let ids = elements.iter().map(|e| e.id.clone()).collect();
        self.log.lock().push(ids);
        tracing::trace!(elements = elements.len(), "Scene synced");
    }
}
