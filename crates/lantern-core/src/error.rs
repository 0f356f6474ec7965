//! Error taxonomy for the logging service.

use thiserror::Error;

/// Why a candidate event was rejected by validation.
///
/// These errors never escape `log`; they are observable only through the
/// invalid-event listeners and the invalid-event counter.
#[derive(Debug, Error)]
pub enum InvalidEvent {
    /// The candidate is not a JSON object (this includes null).
    #[error("event must be an object")]
    NotAnObject,

    /// The candidate has no `tags` field.
    #[error("event must contain a tags array")]
    MissingTags,

    /// The `tags` field is not an array.
    #[error("event tags must be an array")]
    TagsNotAnArray,

    /// The `tags` array is empty.
    #[error("event tags cannot be empty")]
    EmptyTags,

    /// A `tags` element is not a string.
    #[error("event tag at index {0} is not a string")]
    NonStringTag(usize),

    /// The `data` field is neither a string nor an object.
    #[error("event data must be an object or a string")]
    InvalidData,

    /// The `timestamp` field could not be coerced to a concrete instant.
    #[error("event timestamp is not a valid date: {0}")]
    InvalidTimestamp(String),

    /// The post-validation hook rejected the event.
    #[error("post-validation failed: {0}")]
    PostValidation(#[from] PostValidateError),
}

/// Error returned by a post-validation hook to reject an event.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct PostValidateError(pub String);

impl PostValidateError {
    /// Creates a hook error from any displayable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Construction-time configuration failures.
///
/// Unlike validation failures, which are contained inside `log`, these
/// surface immediately from the builder.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The diagnostic verbosity setting is not a recognized level.
    #[error("unrecognized verbosity level: {0:?}")]
    InvalidVerbosity(String),
}
