//! Recording listeners — capture dispatched events for assertions.

use std::sync::{Arc, Mutex};

use lantern_core::error::InvalidEvent;
use lantern_core::event::LogEvent;
use serde_json::Value;

/// Records every validated event it is invoked with.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventListener {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl RecordingEventListener {
    /// Create a new recorder with an empty event list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a listener closure wired to this recorder. Multiple listeners
    /// may share one recorder.
    #[must_use]
    pub fn listener(&self) -> impl Fn(&LogEvent) + Send + Sync + use<> {
        let events = Arc::clone(&self.events);
        move |event: &LogEvent| events.lock().unwrap().push(event.clone())
    }

    /// Returns a snapshot of all recorded events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }
}

/// Records every rejected candidate together with the rendered rejection
/// reason.
#[derive(Debug, Clone, Default)]
pub struct RecordingInvalidEventListener {
    rejections: Arc<Mutex<Vec<(Value, String)>>>,
}

impl RecordingInvalidEventListener {
    /// Create a new recorder with an empty rejection list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a listener closure wired to this recorder.
    #[must_use]
    pub fn listener(&self) -> impl Fn(&Value, &InvalidEvent) + Send + Sync + use<> {
        let rejections = Arc::clone(&self.rejections);
        move |candidate: &Value, error: &InvalidEvent| {
            rejections
                .lock()
                .unwrap()
                .push((candidate.clone(), error.to_string()));
        }
    }

    /// Returns a snapshot of all recorded rejections as
    /// `(original candidate, error message)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn rejections(&self) -> Vec<(Value, String)> {
        self.rejections.lock().unwrap().clone()
    }
}
