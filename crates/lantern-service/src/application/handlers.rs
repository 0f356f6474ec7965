//! Default console listeners.
//!
//! Accepted events are written as JSON lines to stdout; rejected candidates
//! are wrapped in an [`InvalidEventRecord`] and written to stderr. When a
//! value cannot be serialized or the sink fails, the listener reports the
//! failure through `tracing` and falls back to the `Debug` form. A listener
//! never panics the calling thread.

use std::fmt::Debug;
use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lantern_core::clock::Clock;
use serde::Serialize;
use serde_json::Value;

use crate::application::dispatcher::{EventListener, InvalidEventListener};

/// Diagnostic record emitted for rejected candidates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidEventRecord<'a> {
    /// When the rejection was recorded.
    pub timestamp: DateTime<Utc>,
    /// Record discriminator, always `"invalidEvent"`.
    pub kind: &'static str,
    /// The candidate exactly as submitted.
    pub original_event: &'a Value,
    /// The rendered rejection reason.
    pub error: String,
}

/// Default event listener: one JSON line per event on stdout.
#[must_use]
pub fn stdout_event_listener() -> EventListener {
    Box::new(|event| {
        let stdout = std::io::stdout();
        write_json_line(&mut stdout.lock(), event, "log event");
    })
}

/// Default invalid-event listener: wraps the candidate and error into an
/// [`InvalidEventRecord`] and writes it to stderr.
#[must_use]
pub fn stderr_invalid_event_listener(clock: Arc<dyn Clock>) -> InvalidEventListener {
    Box::new(move |candidate, error| {
        let record = InvalidEventRecord {
            timestamp: clock.now(),
            kind: "invalidEvent",
            original_event: candidate,
            error: error.to_string(),
        };
        let stderr = std::io::stderr();
        write_json_line(&mut stderr.lock(), &record, "invalid-event record");
    })
}

/// Writes `value` to `out` as one JSON line. On a serialization or write
/// failure, reports the error and writes the `Debug` form instead; a failure
/// of the fallback write is swallowed.
pub(crate) fn write_json_line<W, T>(out: &mut W, value: &T, what: &str)
where
    W: Write,
    T: Serialize + Debug,
{
    match serde_json::to_string(value) {
        Ok(line) => {
            if let Err(error) = writeln!(out, "{line}") {
                tracing::error!(%error, "failed to write {what}, falling back to debug form");
                let _ = writeln!(out, "{value:?}");
            }
        }
        Err(error) => {
            tracing::error!(%error, "failed to serialize {what}, falling back to debug form");
            let _ = writeln!(out, "{value:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lantern_core::error::InvalidEvent;
    use lantern_core::event::{EventData, LogEvent};
    use lantern_test_support::FailingWriter;
    use serde::Serializer;
    use serde_json::json;
    use uuid::Uuid;

    use super::{InvalidEventRecord, write_json_line};

    fn sample_event() -> LogEvent {
        LogEvent {
            tags: vec!["info".to_owned()],
            data: Some(EventData::Text("message".to_owned())),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            id: Uuid::from_u128(7),
            meta: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_event_is_written_as_a_json_line() {
        let mut out = Vec::new();
        write_json_line(&mut out, &sample_event(), "log event");

        let line = String::from_utf8(out).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["tags"], json!(["info"]));
        assert_eq!(parsed["data"], json!("message"));
        assert_eq!(parsed["timestamp"], json!("2026-01-15T10:00:00Z"));
    }

    #[test]
    fn test_invalid_event_record_uses_camel_case_fields() {
        let candidate = json!({ "data": "message" });
        let record = InvalidEventRecord {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            kind: "invalidEvent",
            original_event: &candidate,
            error: InvalidEvent::MissingTags.to_string(),
        };

        let mut out = Vec::new();
        write_json_line(&mut out, &record, "invalid-event record");

        let line = String::from_utf8(out).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["kind"], json!("invalidEvent"));
        assert_eq!(parsed["originalEvent"], candidate);
        assert_eq!(parsed["error"], json!("event must contain a tags array"));
    }

    #[test]
    fn test_failing_sink_does_not_panic() {
        write_json_line(&mut FailingWriter, &sample_event(), "log event");
    }

    /// A value whose serialization always fails, for exercising the fallback.
    #[derive(Debug)]
    struct Unserializable;

    impl serde::Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not representable"))
        }
    }

    #[test]
    fn test_serialization_failure_falls_back_to_debug_form() {
        let mut out = Vec::new();
        write_json_line(&mut out, &Unserializable, "log event");

        let line = String::from_utf8(out).unwrap();
        assert_eq!(line.trim_end(), "Unserializable");
    }
}
