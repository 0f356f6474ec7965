//! Test writers — failing `Write` implementations for fallback paths.

use std::io::{Error, Result, Write};

/// A writer whose every write fails. Useful for testing that the default
/// console listeners survive a broken sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> Result<usize> {
        Err(Error::other("sink failed"))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
