use bytes::Bytes;

use super::writer::OutputStream;
use crate::pdu::PduError;

/// Prepend-based message builder.
///
/// Each [`IoStack::write`] records a chunk that becomes the new front of the
/// message, so a message is assembled innermost layer first and each outer
/// layer can size itself from what is already on the stack.
///
/// # Examples
/// ```
/// use acnpdu_core::io::IoStack;
///
/// let mut stack = IoStack::new();
/// stack.write(&[0xAA, 0xBB])?;
/// stack.write(&[0x01])?;
/// assert_eq!(&stack.flatten()[..], &[0x01, 0xAA, 0xBB]);
/// # Ok::<(), acnpdu_core::PduError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct IoStack {
    /// Chunks in write order; the last one is the front of the message.
    chunks: Vec<Vec<u8>>,
    size: usize,
}

impl IoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `data` in front of everything written so far.
    ///
    /// Fails with [`PduError::AllocationFailed`] without touching the stack
    /// when memory cannot be reserved.
    pub fn write(&mut self, data: &[u8]) -> Result<(), PduError> {
        if data.is_empty() {
            return Ok(());
        }
        let failed = || PduError::AllocationFailed {
            requested: data.len(),
        };
        self.chunks.try_reserve(1).map_err(|_| failed())?;
        let mut chunk = Vec::new();
        chunk.try_reserve_exact(data.len()).map_err(|_| failed())?;
        chunk.extend_from_slice(data);
        self.chunks.push(chunk);
        self.size += data.len();
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Materialise the message, outermost layer first. Does not consume
    /// the stack.
    pub fn flatten(&self) -> Bytes {
        let mut out = Vec::with_capacity(self.size);
        for chunk in self.chunks.iter().rev() {
            out.extend_from_slice(chunk);
        }
        Bytes::from(out)
    }

    /// Stream the message, outermost layer first, into `out`.
    pub fn write_to(&self, out: &mut dyn OutputStream) -> Result<(), PduError> {
        for chunk in self.chunks.iter().rev() {
            out.write(chunk)?;
        }
        Ok(())
    }
}
