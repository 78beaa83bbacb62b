use bytes::Bytes;

use crate::pdu::PduError;

/// Open-ended byte sink used by streaming packers.
pub trait OutputStream {
    /// Append `data` in full, or fail without recording any of it.
    fn write(&mut self, data: &[u8]) -> Result<(), PduError>;

    /// Number of bytes written so far.
    fn size(&self) -> usize;
}

/// Growable output region. Knows nothing about protocol structure.
///
/// # Examples
/// ```
/// use acnpdu_core::io::{OutputBuffer, OutputStream};
///
/// let mut out = OutputBuffer::new();
/// out.write(&[0x70, 0x4F])?;
/// assert_eq!(out.size(), 2);
/// # Ok::<(), acnpdu_core::PduError>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn freeze(self) -> Bytes {
        Bytes::from(self.data)
    }
}

impl OutputStream for OutputBuffer {
    fn write(&mut self, data: &[u8]) -> Result<(), PduError> {
        self.data
            .try_reserve(data.len())
            .map_err(|_| PduError::AllocationFailed {
                requested: data.len(),
            })?;
        self.data.extend_from_slice(data);
        Ok(())
    }

    fn size(&self) -> usize {
        self.data.len()
    }
}
