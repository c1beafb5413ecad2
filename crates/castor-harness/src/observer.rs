//! Observer that records every pushed view.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use castor_core::{RoomObserver, RoomView};

/// Records views pushed by the engine.
///
/// Clones share one buffer: subscribe one clone, inspect through another.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    views: Arc<Mutex<Vec<RoomView>>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxed clone for [`castor_core::RoomEngine::subscribe`].
    pub fn boxed(&self) -> Box<dyn RoomObserver> {
        Box::new(self.clone())
    }

    /// Number of views received.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Most recent view.
    pub fn last(&self) -> Option<RoomView> {
        self.lock().last().cloned()
    }

    /// All views received so far, oldest first.
    pub fn views(&self) -> Vec<RoomView> {
        self.lock().clone()
    }

    /// Forget recorded views.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RoomView>> {
        self.views.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RoomObserver for RecordingObserver {
    fn on_change(&mut self, view: &RoomView) {
        self.lock().push(view.clone());
    }
}
