//! Byte sink abstraction for composed documents.
//!
//! The composer is agnostic about where document bytes go: an HTTP
//! response, a file, or an in-memory collector. Callers must treat the
//! byte sequence as complete only once [`DocumentSink::end`] has returned.

use crate::errors::Result;
use std::io::Write;

/// Destination for composed document bytes.
pub trait DocumentSink {
    /// Writes one chunk of the document.
    ///
    /// # Errors
    /// Propagates the underlying sink failure.
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<()>;

    /// Signals that the document is complete. No further chunks follow.
    ///
    /// # Errors
    /// Propagates the underlying sink failure.
    fn end(&mut self) -> Result<()>;
}

/// In-memory sink collecting the full document.
#[derive(Debug, Default)]
pub struct BufferSink {
    bytes: Vec<u8>,
    ended: bool,
}

impl BufferSink {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `end()` has been called.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Consumes the sink, returning the collected bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl DocumentSink for BufferSink {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.ended = true;
        Ok(())
    }
}

/// Adapter exposing any [`std::io::Write`] as a document sink.
#[derive(Debug)]
pub struct WriteSink<W: Write> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Unwraps the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> DocumentSink for WriteSink<W> {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.inner.write_all(chunk)?;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_collects() {
        let mut sink = BufferSink::new();
        sink.write_chunk(b"%PDF").unwrap();
        sink.write_chunk(b"-1.3").unwrap();
        assert!(!sink.is_ended());
        sink.end().unwrap();
        assert!(sink.is_ended());
        assert_eq!(sink.into_bytes(), b"%PDF-1.3");
    }

    #[test]
    fn test_write_sink_flushes() {
        let mut sink = WriteSink::new(Vec::new());
        sink.write_chunk(b"abc").unwrap();
        sink.end().unwrap();
        assert_eq!(sink.into_inner(), b"abc");
    }
}
