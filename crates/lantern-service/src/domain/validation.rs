//! Candidate event validation.
//!
//! A candidate arrives as an arbitrary JSON value. Validation reads the
//! candidate without mutating it; on success it produces a typed
//! [`LogEvent`] with the timestamp coerced and a fresh id assigned.

use lantern_core::clock::Clock;
use lantern_core::error::InvalidEvent;
use lantern_core::event::{EventData, LogEvent, TimestampInput};
use lantern_core::ids::IdGenerator;
use serde_json::Value;

/// Validates a candidate event and normalizes it into a [`LogEvent`].
///
/// Checks run in order: the candidate must be a JSON object; `tags` must be
/// a non-empty array of strings; `data`, when present, must be a string or
/// an object; `timestamp`, when present, must be a date string (RFC 3339 or
/// RFC 2822) or an epoch-millisecond number. An absent (or null) `timestamp`
/// defaults to `clock.now()`; a null `data` counts as absent.
///
/// # Errors
///
/// Returns the first failing check as an [`InvalidEvent`].
pub fn validate_event(
    candidate: &Value,
    clock: &dyn Clock,
    ids: &dyn IdGenerator,
) -> Result<LogEvent, InvalidEvent> {
    let fields = candidate.as_object().ok_or(InvalidEvent::NotAnObject)?;

    let tags = validate_tags(fields.get("tags"))?;
    let data = validate_data(fields.get("data"))?;
    let timestamp = match fields.get("timestamp") {
        None | Some(Value::Null) => clock.now(),
        Some(value) => TimestampInput::classify(value)
            .ok_or_else(|| InvalidEvent::InvalidTimestamp(value.to_string()))?
            .resolve()?,
    };

    Ok(LogEvent {
        tags,
        data,
        timestamp,
        id: ids.next_id(),
        meta: serde_json::Map::new(),
    })
}

fn validate_tags(tags: Option<&Value>) -> Result<Vec<String>, InvalidEvent> {
    let tags = tags.ok_or(InvalidEvent::MissingTags)?;
    let items = tags.as_array().ok_or(InvalidEvent::TagsNotAnArray)?;
    if items.is_empty() {
        return Err(InvalidEvent::EmptyTags);
    }
    items
        .iter()
        .enumerate()
        .map(|(index, tag)| {
            tag.as_str()
                .map(str::to_owned)
                .ok_or(InvalidEvent::NonStringTag(index))
        })
        .collect()
}

fn validate_data(data: Option<&Value>) -> Result<Option<EventData>, InvalidEvent> {
    match data {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(EventData::Text(text.clone()))),
        Some(Value::Object(fields)) => Ok(Some(EventData::Structured(fields.clone()))),
        Some(_) => Err(InvalidEvent::InvalidData),
    }
}
