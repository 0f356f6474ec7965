//! Log event model.

use chrono::{DateTime, LocalResult, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::InvalidEvent;

/// Payload carried by a log event.
///
/// Serialized untagged so the output shape matches what the caller submitted:
/// a text payload stays a JSON string, a structured payload stays an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventData {
    /// Free-form text.
    Text(String),
    /// Structured key/value payload.
    Structured(serde_json::Map<String, Value>),
}

/// Timestamp forms accepted on an incoming candidate.
///
/// A concrete date arrives in JSON as its RFC 3339 text form, which `Text`
/// covers; `EpochMillis` covers numeric epoch-millisecond input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampInput {
    /// An RFC 3339 (or RFC 2822) date string.
    Text(String),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
}

impl TimestampInput {
    /// Classifies the `timestamp` field of a candidate.
    ///
    /// Returns `None` for values that are neither strings nor integer
    /// numbers; validation rejects those.
    #[must_use]
    pub fn classify(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Number(number) => number.as_i64().map(Self::EpochMillis),
            _ => None,
        }
    }

    /// Resolves the input to a concrete instant.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEvent::InvalidTimestamp`] when the text form parses
    /// as neither RFC 3339 nor RFC 2822, or the millisecond value falls
    /// outside the representable range.
    pub fn resolve(&self) -> Result<DateTime<Utc>, InvalidEvent> {
        match self {
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .or_else(|_| DateTime::parse_from_rfc2822(text))
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|_| InvalidEvent::InvalidTimestamp(text.clone())),
            Self::EpochMillis(millis) => match Utc.timestamp_millis_opt(*millis) {
                LocalResult::Single(instant) => Ok(instant),
                _ => Err(InvalidEvent::InvalidTimestamp(millis.to_string())),
            },
        }
    }
}

/// A validated log event.
///
/// Only validation constructs these: `tags` is non-empty, `timestamp` is
/// concrete, and `id` was freshly assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    /// Tags categorizing the event. Never empty.
    pub tags: Vec<String>,
    /// Optional payload.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<EventData>,
    /// When the event occurred. Defaults to submission time when the caller
    /// supplied none.
    pub timestamp: DateTime<Utc>,
    /// Unique identifier assigned on validation.
    pub id: Uuid,
    /// Extra fields attached by the post-validation hook (host name, pid,
    /// module name), flattened into the serialized form.
    #[serde(flatten)]
    pub meta: serde_json::Map<String, Value>,
}
