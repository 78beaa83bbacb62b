use bitflags::bitflags;

use super::error::PduError;
use super::layout;

bitflags! {
    /// Flag nibble carried in the high bits of the flags+length field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PduFlags: u8 {
        /// The length field is three bytes wide.
        const LENGTH = layout::FLAG_LENGTH;
        /// The vector is present (otherwise inherited).
        const VECTOR = layout::FLAG_VECTOR;
        /// The header is present (otherwise inherited).
        const HEADER = layout::FLAG_HEADER;
        /// The data is present (otherwise inherited).
        const DATA = layout::FLAG_DATA;
    }
}

impl PduFlags {
    /// Flags written by every encoder in this crate.
    pub const ALL_PRESENT: Self = Self::VECTOR.union(Self::HEADER).union(Self::DATA);

    pub fn from_field_byte(byte: u8) -> Self {
        Self::from_bits_truncate(byte & layout::FLAGS_MASK)
    }

    pub fn length_field_size(self) -> usize {
        if self.contains(Self::LENGTH) {
            layout::EXTENDED_FLAGS_LENGTH_SIZE
        } else {
            layout::FLAGS_LENGTH_SIZE
        }
    }
}

/// Width of the flags+length field for an envelope whose vector, header
/// and data occupy `content_len` bytes.
///
/// # Examples
/// ```
/// use acnpdu_core::pdu::flags_length_size;
///
/// assert_eq!(flags_length_size(77), 2);
/// assert_eq!(flags_length_size(0x0FFE), 3);
/// ```
pub fn flags_length_size(content_len: usize) -> usize {
    if content_len.saturating_add(layout::FLAGS_LENGTH_SIZE) <= layout::MAX_TWO_BYTE_LENGTH {
        layout::FLAGS_LENGTH_SIZE
    } else {
        layout::EXTENDED_FLAGS_LENGTH_SIZE
    }
}

/// Total envelope length (flags+length field included) for `content_len`
/// bytes of vector, header and data.
pub fn envelope_length(content_len: usize) -> Result<usize, PduError> {
    let length = content_len
        .checked_add(flags_length_size(content_len))
        .ok_or(PduError::LengthOverflow {
            length: content_len,
            max: layout::MAX_THREE_BYTE_LENGTH,
        })?;
    if length > layout::MAX_THREE_BYTE_LENGTH {
        return Err(PduError::LengthOverflow {
            length,
            max: layout::MAX_THREE_BYTE_LENGTH,
        });
    }
    Ok(length)
}

/// Encode the flags+length field for an envelope of `length` total bytes.
///
/// Returns the field bytes and how many of them are significant. The
/// `LENGTH` flag is derived from `length` and overrides whatever the caller
/// passed.
pub fn encode_flags_and_length(
    flags: PduFlags,
    length: usize,
) -> Result<([u8; layout::EXTENDED_FLAGS_LENGTH_SIZE], usize), PduError> {
    if length > layout::MAX_THREE_BYTE_LENGTH {
        return Err(PduError::LengthOverflow {
            length,
            max: layout::MAX_THREE_BYTE_LENGTH,
        });
    }
    let flags = flags.difference(PduFlags::LENGTH);
    if length <= layout::MAX_TWO_BYTE_LENGTH {
        let field = [
            flags.bits() | ((length >> 8) as u8 & layout::LENGTH_HIGH_MASK),
            length as u8,
            0,
        ];
        Ok((field, layout::FLAGS_LENGTH_SIZE))
    } else {
        let flags = flags | PduFlags::LENGTH;
        let field = [
            flags.bits() | ((length >> 16) as u8 & layout::LENGTH_HIGH_MASK),
            (length >> 8) as u8,
            length as u8,
        ];
        Ok((field, layout::EXTENDED_FLAGS_LENGTH_SIZE))
    }
}
