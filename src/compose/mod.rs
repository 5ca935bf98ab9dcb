//! Document composition - renders programme data into paginated PDFs.
//!
//! Three document types are produced: the note-order request, the
//! claim-bill receipt, and certificates driven by declarative templates.
//! Composition never validates business rules beyond its own required
//! inputs; it renders whatever values are present. Documents are fully
//! composed in memory and only then streamed to a sink, so a failed
//! composition never leaks partial output.

/// Certificate rendering from declarative templates
pub mod certificate;
/// Claim-bill receipt document
pub mod claim_receipt;
/// Page and table drawing primitives
pub mod layout;
/// Note-order request document
pub mod note_order;
/// Byte sink abstraction
pub mod sink;

use crate::errors::{Error, Result};

pub use certificate::certificate;
pub use claim_receipt::claim_receipt;
pub use note_order::note_order;
pub use sink::{BufferSink, DocumentSink, WriteSink};

/// Wraps a PDF backend failure into the crate error type.
pub(crate) fn pdf_error(source: impl std::fmt::Display) -> Error {
    Error::Pdf {
        message: source.to_string(),
    }
}

/// Chunk size used when streaming a composed document to a sink.
const STREAM_CHUNK: usize = 8 * 1024;

/// A finished document: its bytes and the MIME type to serve it as.
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    /// Complete document bytes
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `application/pdf`
    pub media_type: String,
}

impl ComposedDocument {
    /// Streams the document to a sink in chunks, then signals completion.
    ///
    /// # Errors
    /// Propagates sink write failures; `end()` is only called after every
    /// chunk was accepted.
    pub fn stream_to(&self, sink: &mut dyn DocumentSink) -> Result<()> {
        for chunk in self.bytes.chunks(STREAM_CHUNK) {
            sink.write_chunk(chunk)?;
        }
        sink.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_to_chunks_and_ends() {
        let document = ComposedDocument {
            bytes: vec![7u8; STREAM_CHUNK * 2 + 100],
            media_type: "application/pdf".to_string(),
        };
        let mut sink = BufferSink::new();
        document.stream_to(&mut sink).unwrap();
        assert!(sink.is_ended());
        assert_eq!(sink.into_bytes(), document.bytes);
    }
}
