//! Service construction and configuration.
//!
//! Absent configuration uniformly means "use defaults": console listeners,
//! system clock, random v4 ids, `warn` verbosity. Invalid configuration is
//! rejected when the service is built, before any event can be submitted.

use std::str::FromStr;
use std::sync::Arc;

use lantern_core::clock::{Clock, SystemClock};
use lantern_core::error::{ConfigError, InvalidEvent, PostValidateError};
use lantern_core::event::LogEvent;
use lantern_core::ids::{IdGenerator, UuidGenerator};
use serde_json::Value;
use tracing::Level;

use crate::application::dispatcher::{
    EventListener, InvalidEventListener, LogService, PostValidateHook,
};
use crate::application::handlers::{stderr_invalid_event_listener, stdout_event_listener};

/// Builder for [`LogService`].
///
/// Listeners registered for an outcome are invoked in registration order and
/// replace the default console listener for that outcome only.
#[derive(Default)]
pub struct LogServiceBuilder {
    event_listeners: Vec<EventListener>,
    invalid_event_listeners: Vec<InvalidEventListener>,
    post_validate: Option<PostValidateHook>,
    verbosity: Option<String>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

impl LogServiceBuilder {
    /// Creates a builder with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for validated events.
    #[must_use]
    pub fn event_listener(
        mut self,
        listener: impl Fn(&LogEvent) + Send + Sync + 'static,
    ) -> Self {
        self.event_listeners.push(Box::new(listener));
        self
    }

    /// Registers a listener for rejected candidates.
    #[must_use]
    pub fn invalid_event_listener(
        mut self,
        listener: impl Fn(&Value, &InvalidEvent) + Send + Sync + 'static,
    ) -> Self {
        self.invalid_event_listeners.push(Box::new(listener));
        self
    }

    /// Installs the post-validation hook. The hook runs after shape
    /// validation and may attach metadata or reject the event.
    #[must_use]
    pub fn post_validate(
        mut self,
        hook: impl Fn(&mut LogEvent) -> Result<(), PostValidateError> + Send + Sync + 'static,
    ) -> Self {
        self.post_validate = Some(Box::new(hook));
        self
    }

    /// Sets the diagnostic verbosity for the service's own `tracing` output
    /// (`trace`, `debug`, `info`, `warn`, or `error`; case-insensitive).
    /// Event dispatch itself is unaffected. Defaults to `warn`.
    #[must_use]
    pub fn verbosity(mut self, level: impl Into<String>) -> Self {
        self.verbosity = Some(level.into());
        self
    }

    /// Injects an alternative clock, used for default timestamps and
    /// rejection records.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Injects an alternative id generator.
    #[must_use]
    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Arc::new(ids));
        self
    }

    /// Builds the service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVerbosity`] when the verbosity setting
    /// does not name a `tracing` level.
    pub fn build(self) -> Result<LogService, ConfigError> {
        let verbosity = match &self.verbosity {
            Some(level) => Level::from_str(level)
                .map_err(|_| ConfigError::InvalidVerbosity(level.clone()))?,
            None => Level::WARN,
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids = self.ids.unwrap_or_else(|| Arc::new(UuidGenerator));

        let event_listeners = if self.event_listeners.is_empty() {
            vec![stdout_event_listener()]
        } else {
            self.event_listeners
        };
        let invalid_event_listeners = if self.invalid_event_listeners.is_empty() {
            vec![stderr_invalid_event_listener(Arc::clone(&clock))]
        } else {
            self.invalid_event_listeners
        };

        if verbosity >= Level::DEBUG {
            tracing::debug!(
                event_listeners = event_listeners.len(),
                invalid_event_listeners = invalid_event_listeners.len(),
                post_validate = self.post_validate.is_some(),
                verbosity = %verbosity,
                "log service configured"
            );
        }

        Ok(LogService::new(
            clock,
            ids,
            event_listeners,
            invalid_event_listeners,
            self.post_validate,
            verbosity,
        ))
    }
}
