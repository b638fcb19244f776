//! Thread-shareable handle to an [`EditorStore`].

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use rb_common::{EditorConfig, EditorResult, TimeMs};

use crate::clock::TickOutcome;
use crate::commands::EditorCommand;
use crate::state::EditorStore;

/// An `EditorStore` behind `Arc<Mutex<_>>`, for hosts that tick playback on
/// one thread and feed input from another.
///
/// Every call takes the lock for its whole duration, so operations are
/// applied one at a time in lock order; the last write wins.
#[derive(Clone, Debug)]
pub struct SharedEditor {
    inner: Arc<Mutex<EditorStore>>,
}

impl SharedEditor {
    pub fn new(config: EditorConfig) -> EditorResult<Self> {
        Ok(Self::from_store(EditorStore::new(config)?))
    }

    pub fn from_store(store: EditorStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut EditorStore) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn dispatch(&self, command: EditorCommand) -> EditorResult<bool> {
        self.with(|store| store.dispatch(command))
    }

    pub fn seek_to(&self, time_ms: f64) -> TimeMs {
        self.with(|store| store.seek_to(time_ms))
    }

    pub fn tick(&self, elapsed_ms: f64) -> TickOutcome {
        self.with(|store| store.tick(elapsed_ms))
    }

    pub fn on_frame(&self, now: Instant) -> bool {
        self.with(|store| store.on_frame(now))
    }

    pub fn current_time_ms(&self) -> u64 {
        self.with(|store| store.current_time_ms())
    }

    pub fn is_playing(&self) -> bool {
        self.with(|store| store.is_playing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clones_share_one_store() {
        let editor = SharedEditor::new(EditorConfig::default()).unwrap();
        let other = editor.clone();
        other.seek_to(750.0);
        assert_eq!(editor.current_time_ms(), 750);
    }

    #[test]
    fn ticks_and_seeks_from_threads() {
        let editor = SharedEditor::new(EditorConfig::default()).unwrap();
        editor.dispatch(EditorCommand::Play).unwrap();

        let ticker = editor.clone();
        let handle = thread::spawn(move || {
            for _ in 0..100 {
                ticker.tick(10.0);
            }
        });
        handle.join().unwrap();
        assert_eq!(editor.current_time_ms(), 1000);

        let seeker = editor.clone();
        thread::spawn(move || seeker.seek_to(-5.0)).join().unwrap();
        assert_eq!(editor.current_time_ms(), 0);
        assert!(editor.is_playing());
    }
}
