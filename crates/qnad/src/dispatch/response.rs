//! Response framing for the dispatch loop.

use std::io::Write;

use qna_wire::Envelope;

use super::errors::DispatchError;

/// Writer that frames envelopes onto a connection.
///
/// A connection carries at most one response, so the writer is used once and
/// dropped along with the stream.
pub(crate) struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub(crate) const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Encodes `envelope` and writes the frame in full.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub(crate) fn write_envelope(&mut self, envelope: &Envelope) -> Result<(), DispatchError> {
        let frame = qna_wire::encode(envelope)?;
        self.writer.write_all(&frame)?;
        self.writer.flush()?;
        Ok(())
    }
}
