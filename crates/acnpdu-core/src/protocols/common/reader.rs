use std::ops::Range;

use crate::pdu::PduError;

/// Range-based reads over a fixed-layout field group.
pub(crate) struct FieldReader<'a> {
    bytes: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub(crate) fn require_len(&self, needed: usize) -> Result<(), PduError> {
        if self.bytes.len() < needed {
            return Err(PduError::TruncatedInput {
                needed,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn read_u16_be(&self, range: Range<usize>) -> Result<u16, PduError> {
        let bytes = self.read_array::<2>(range)?;
        Ok(u16::from_be_bytes(bytes))
    }

    pub(crate) fn read_u32_be(&self, range: Range<usize>) -> Result<u32, PduError> {
        let bytes = self.read_array::<4>(range)?;
        Ok(u32::from_be_bytes(bytes))
    }

    pub(crate) fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], PduError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| PduError::TruncatedInput {
            needed: N,
            actual: bytes.len(),
        })
    }

    pub(crate) fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], PduError> {
        self.bytes.get(range.clone()).ok_or(PduError::TruncatedInput {
            needed: range.end,
            actual: self.bytes.len(),
        })
    }

    /// Text up to the first NUL (or the whole field), decoded lossily.
    pub(crate) fn read_nul_terminated(&self, range: Range<usize>) -> Result<String, PduError> {
        let bytes = self.read_slice(range)?;
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }
}

/// Copy `src` into `dst`, truncating to `dst.len()` and zero-filling the rest.
pub(crate) fn copy_to_fixed_length(dst: &mut [u8], src: &[u8]) {
    let len = src.len().min(dst.len());
    dst[..len].copy_from_slice(&src[..len]);
    dst[len..].fill(0);
}
