use super::layout;
use crate::pdu::PduError;
use crate::protocols::common::reader::{FieldReader, copy_to_fixed_length};

/// E1.33 framing header: source name, sequence number and endpoint.
///
/// The source name is stored as given. Packing copies at most
/// [`layout::SOURCE_NAME_SIZE`] bytes of it and zero-fills the rest;
/// unpacking stops at the first NUL.
///
/// # Examples
/// ```
/// use acnpdu_core::protocols::e133::E133Header;
///
/// let header = E133Header::new("test", 5, 2);
/// let bytes = header.to_bytes();
/// assert_eq!(&bytes[64..70], &[0, 0, 0, 5, 0, 2]);
/// assert_eq!(E133Header::unpack(&bytes)?, header);
/// # Ok::<(), acnpdu_core::PduError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct E133Header {
    source: String,
    sequence: u32,
    endpoint: u16,
}

impl E133Header {
    pub const SIZE: usize = layout::HEADER_SIZE;

    pub fn new(source: impl Into<String>, sequence: u32, endpoint: u16) -> Self {
        Self {
            source: source.into(),
            sequence,
            endpoint,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn endpoint(&self) -> u16 {
        self.endpoint
    }

    pub fn pack(&self, buf: &mut [u8]) -> Result<usize, PduError> {
        if buf.len() < Self::SIZE {
            return Err(PduError::BufferTooSmall {
                required: Self::SIZE,
                actual: buf.len(),
            });
        }
        self.fill(&mut buf[..Self::SIZE]);
        Ok(Self::SIZE)
    }

    pub fn to_bytes(&self) -> [u8; layout::HEADER_SIZE] {
        let mut bytes = [0u8; layout::HEADER_SIZE];
        self.fill(&mut bytes);
        bytes
    }

    /// `buf` is exactly `SIZE` bytes.
    fn fill(&self, buf: &mut [u8]) {
        copy_to_fixed_length(&mut buf[layout::SOURCE_NAME_RANGE], self.source.as_bytes());
        buf[layout::SEQUENCE_RANGE].copy_from_slice(&self.sequence.to_be_bytes());
        buf[layout::ENDPOINT_RANGE].copy_from_slice(&self.endpoint.to_be_bytes());
        buf[layout::RESERVED_OFFSET] = 0;
    }

    /// Decode a header; the reserved byte is ignored.
    pub fn unpack(bytes: &[u8]) -> Result<Self, PduError> {
        let reader = FieldReader::new(bytes);
        reader.require_len(Self::SIZE)?;
        Ok(Self {
            source: reader.read_nul_terminated(layout::SOURCE_NAME_RANGE)?,
            sequence: reader.read_u32_be(layout::SEQUENCE_RANGE)?,
            endpoint: reader.read_u16_be(layout::ENDPOINT_RANGE)?,
        })
    }
}
