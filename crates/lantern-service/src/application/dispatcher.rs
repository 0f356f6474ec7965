//! Event dispatch: counters, listeners, and the `log` entry point.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lantern_core::clock::Clock;
use lantern_core::error::{InvalidEvent, PostValidateError};
use lantern_core::event::LogEvent;
use lantern_core::ids::IdGenerator;
use serde_json::Value;
use tracing::Level;

use crate::domain::validation::validate_event;

/// Listener invoked with each successfully validated event.
pub type EventListener = Box<dyn Fn(&LogEvent) + Send + Sync>;

/// Listener invoked with each rejected candidate and the rejection reason.
pub type InvalidEventListener = Box<dyn Fn(&Value, &InvalidEvent) + Send + Sync>;

/// Hook run after shape validation succeeds. May attach extra fields through
/// [`LogEvent::meta`] or reject the event outright.
pub type PostValidateHook =
    Box<dyn Fn(&mut LogEvent) -> Result<(), PostValidateError> + Send + Sync>;

/// Validates candidate events and dispatches them to listeners.
///
/// Built through [`LogServiceBuilder`](crate::application::config::LogServiceBuilder).
/// Dispatch is synchronous: listeners run on the calling thread, in
/// registration order, and a slow listener stalls the caller. The counters
/// are atomic, so a single instance may be shared across threads.
pub struct LogService {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    event_listeners: Vec<EventListener>,
    invalid_event_listeners: Vec<InvalidEventListener>,
    post_validate: Option<PostValidateHook>,
    verbosity: Level,
    event_count: AtomicU64,
    invalid_event_count: AtomicU64,
}

impl std::fmt::Debug for LogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogService")
            .field("event_listeners", &self.event_listeners.len())
            .field("invalid_event_listeners", &self.invalid_event_listeners.len())
            .field("post_validate", &self.post_validate.is_some())
            .field("verbosity", &self.verbosity)
            .field("event_count", &self.event_count)
            .field("invalid_event_count", &self.invalid_event_count)
            .finish()
    }
}

impl LogService {
    pub(crate) fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        event_listeners: Vec<EventListener>,
        invalid_event_listeners: Vec<InvalidEventListener>,
        post_validate: Option<PostValidateHook>,
        verbosity: Level,
    ) -> Self {
        Self {
            clock,
            ids,
            event_listeners,
            invalid_event_listeners,
            post_validate,
            verbosity,
            event_count: AtomicU64::new(0),
            invalid_event_count: AtomicU64::new(0),
        }
    }

    /// Submits a candidate event.
    ///
    /// On success the event count is incremented and every event listener is
    /// invoked with the normalized event. On any validation or hook failure
    /// the invalid-event count is incremented and every invalid-event
    /// listener is invoked with the original candidate and the error.
    /// Failures never propagate to the caller.
    pub fn log(&self, candidate: &Value) {
        match self.validate(candidate) {
            Ok(event) => {
                self.event_count.fetch_add(1, Ordering::Relaxed);
                if self.verbosity >= Level::TRACE {
                    tracing::trace!(id = %event.id, tags = ?event.tags, "event accepted");
                }
                for listener in &self.event_listeners {
                    listener(&event);
                }
            }
            Err(error) => {
                self.invalid_event_count.fetch_add(1, Ordering::Relaxed);
                if self.verbosity >= Level::DEBUG {
                    tracing::debug!(%error, "event rejected");
                }
                for listener in &self.invalid_event_listeners {
                    listener(candidate, &error);
                }
            }
        }
    }

    /// Runs shape validation followed by the post-validation hook.
    fn validate(&self, candidate: &Value) -> Result<LogEvent, InvalidEvent> {
        let mut event = validate_event(candidate, self.clock.as_ref(), self.ids.as_ref())?;
        if let Some(hook) = &self.post_validate {
            hook(&mut event)?;
        }
        Ok(event)
    }

    /// Number of events dispatched successfully since construction.
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.event_count.load(Ordering::Relaxed)
    }

    /// Number of rejected candidates since construction.
    #[must_use]
    pub fn invalid_event_count(&self) -> u64 {
        self.invalid_event_count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lantern_test_support::{
        FixedClock, FixedIds, RecordingEventListener, RecordingInvalidEventListener,
    };
    use serde_json::json;
    use uuid::Uuid;

    use crate::application::config::LogServiceBuilder;

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_counters_start_at_zero() {
        let service = LogServiceBuilder::new()
            .event_listener(|_| {})
            .invalid_event_listener(|_, _| {})
            .build()
            .unwrap();

        assert_eq!(service.event_count(), 0);
        assert_eq!(service.invalid_event_count(), 0);
    }

    #[test]
    fn test_valid_event_increments_only_event_count() {
        let recorder = RecordingEventListener::new();
        let service = LogServiceBuilder::new()
            .event_listener(recorder.listener())
            .build()
            .unwrap();

        service.log(&json!({ "tags": ["info"], "data": "message" }));

        assert_eq!(service.event_count(), 1);
        assert_eq!(service.invalid_event_count(), 0);
        assert_eq!(recorder.events().len(), 1);
    }

    #[test]
    fn test_invalid_event_increments_only_invalid_count() {
        let rejections = RecordingInvalidEventListener::new();
        let service = LogServiceBuilder::new()
            .invalid_event_listener(rejections.listener())
            .build()
            .unwrap();

        service.log(&json!({}));

        assert_eq!(service.event_count(), 0);
        assert_eq!(service.invalid_event_count(), 1);
        assert_eq!(rejections.rejections().len(), 1);
    }

    #[test]
    fn test_hook_failure_takes_the_invalid_path() {
        let recorder = RecordingEventListener::new();
        let rejections = RecordingInvalidEventListener::new();
        let service = LogServiceBuilder::new()
            .event_listener(recorder.listener())
            .invalid_event_listener(rejections.listener())
            .post_validate(|_| Err(lantern_core::error::PostValidateError::new("quota exceeded")))
            .build()
            .unwrap();

        service.log(&json!({ "tags": ["info"] }));

        assert_eq!(service.event_count(), 0);
        assert_eq!(service.invalid_event_count(), 1);
        assert!(recorder.events().is_empty());
        let (candidate, error) = &rejections.rejections()[0];
        assert_eq!(candidate, &json!({ "tags": ["info"] }));
        assert!(error.contains("quota exceeded"));
    }

    #[test]
    fn test_hook_can_attach_metadata() {
        let recorder = RecordingEventListener::new();
        let service = LogServiceBuilder::new()
            .event_listener(recorder.listener())
            .post_validate(|event| {
                event.meta.insert("host".to_owned(), json!("worker-1"));
                Ok(())
            })
            .clock(fixed_clock())
            .id_generator(FixedIds(Uuid::from_u128(9)))
            .build()
            .unwrap();

        service.log(&json!({ "tags": ["info"] }));

        let events = recorder.events();
        assert_eq!(events[0].meta.get("host"), Some(&json!("worker-1")));
    }
}
