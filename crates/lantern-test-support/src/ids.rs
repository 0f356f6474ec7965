//! Test id generation — deterministic `IdGenerator` implementations.

use std::sync::Mutex;

use lantern_core::ids::IdGenerator;
use uuid::Uuid;

/// A generator that always returns the same id. Suitable for tests that do
/// not depend on id uniqueness.
#[derive(Debug, Clone, Copy)]
pub struct FixedIds(pub Uuid);

impl IdGenerator for FixedIds {
    fn next_id(&self) -> Uuid {
        self.0
    }
}

/// A generator that returns ids from a predetermined sequence. Panics if the
/// sequence is exhausted. Used in tests that assert on specific assigned ids.
#[derive(Debug)]
pub struct SequenceIds {
    values: Mutex<Vec<Uuid>>,
}

impl SequenceIds {
    /// Create a new `SequenceIds` with the given values.
    #[must_use]
    pub fn new(values: Vec<Uuid>) -> Self {
        Self {
            values: Mutex::new(values),
        }
    }
}

impl IdGenerator for SequenceIds {
    fn next_id(&self) -> Uuid {
        let mut values = self.values.lock().unwrap();
        assert!(!values.is_empty(), "SequenceIds exhausted");
        values.remove(0)
    }
}
