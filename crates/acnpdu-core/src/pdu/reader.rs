use super::envelope::Layer;
use super::error::PduError;
use super::flags::PduFlags;
use super::layout;

/// Last stage a [`PduReader`] completed for the envelope it is reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    Start,
    LengthRead,
    VectorRead,
    HeaderRead,
    BodyDelivered,
}

/// Bounds-checked cursor over an immutable PDU block.
///
/// Every read is checked against the bytes actually present; the offset
/// never moves past the end of the input and nothing is copied.
pub struct PduReader<'a> {
    data: &'a [u8],
    offset: usize,
    stage: ParseStage,
}

impl<'a> PduReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            stage: ParseStage::Start,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn stage(&self) -> ParseStage {
        self.stage
    }

    pub fn require_len(&self, needed: usize) -> Result<(), PduError> {
        if self.remaining() < needed {
            return Err(PduError::TruncatedInput {
                needed,
                actual: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read the flags+length field that opens an envelope.
    ///
    /// The claimed length is checked against the layer's minimum envelope
    /// size for the announced flags and against the bytes remaining, before
    /// anything inside the envelope is looked at.
    pub fn read_flags_and_length<L: Layer>(&mut self) -> Result<(PduFlags, usize), PduError> {
        self.stage = ParseStage::Start;
        self.require_len(1)?;
        let flags = PduFlags::from_field_byte(self.data[self.offset]);
        let field_size = flags.length_field_size();
        self.require_len(field_size)?;

        let field = &self.data[self.offset..self.offset + field_size];
        let high = (field[0] & layout::LENGTH_HIGH_MASK) as usize;
        let length = if field_size == layout::EXTENDED_FLAGS_LENGTH_SIZE {
            (high << 16) | ((field[1] as usize) << 8) | field[2] as usize
        } else {
            (high << 8) | field[1] as usize
        };

        let min = minimum_length::<L>(flags);
        let available = self.remaining();
        if length < min || length > available {
            return Err(PduError::MalformedLength {
                length,
                min,
                available,
            });
        }

        self.offset += field_size;
        self.stage = ParseStage::LengthRead;
        Ok((flags, length))
    }

    pub fn read_vector<L: Layer>(&mut self) -> Result<u32, PduError> {
        let bytes = self.read_slice(L::VECTOR_SIZE)?;
        let vector = bytes
            .iter()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte));
        self.stage = ParseStage::VectorRead;
        Ok(vector)
    }

    pub fn read_header<L: Layer>(&mut self) -> Result<L::Header, PduError> {
        let bytes = self.read_slice(L::HEADER_SIZE)?;
        let header = L::unpack_header(bytes)?;
        self.stage = ParseStage::HeaderRead;
        Ok(header)
    }

    /// Hand out the rest of the current envelope, ending at absolute offset
    /// `end` (already validated by [`PduReader::read_flags_and_length`]).
    pub fn sub_slice(&mut self, end: usize) -> Result<&'a [u8], PduError> {
        if end < self.offset || end > self.data.len() {
            return Err(PduError::TruncatedInput {
                needed: end.saturating_sub(self.offset),
                actual: self.remaining(),
            });
        }
        let body = &self.data[self.offset..end];
        self.offset = end;
        self.stage = ParseStage::BodyDelivered;
        Ok(body)
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8], PduError> {
        self.require_len(len)?;
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }
}

/// Smallest length a PDU of layer `L` with `flags` may claim.
pub fn minimum_length<L: Layer>(flags: PduFlags) -> usize {
    let mut min = flags.length_field_size();
    if flags.contains(PduFlags::VECTOR) {
        min += L::VECTOR_SIZE;
    }
    if flags.contains(PduFlags::HEADER) {
        min += L::HEADER_SIZE;
    }
    min
}
