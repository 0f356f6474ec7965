//! Lantern — in-process event validation and dispatch.
//!
//! Callers submit candidate events as JSON values. The service validates the
//! shape (non-empty string tags, optional text-or-structured payload,
//! optional parseable timestamp), stamps defaults (timestamp, id), and hands
//! each valid event to the registered event listeners. Rejected candidates
//! are routed, unmodified, to the invalid-event listeners together with the
//! rejection reason; nothing ever propagates back to the submitting caller.

pub mod application;
pub mod domain;

pub use application::config::LogServiceBuilder;
pub use application::dispatcher::{
    EventListener, InvalidEventListener, LogService, PostValidateHook,
};
pub use application::handlers::InvalidEventRecord;
pub use domain::validation::validate_event;
