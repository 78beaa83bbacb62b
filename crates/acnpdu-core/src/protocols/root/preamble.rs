use tracing::debug;

use super::layout;
use crate::io::{IoStack, OutputStream};
use crate::pdu::PduError;
use crate::protocols::common::reader::FieldReader;

fn preamble_bytes() -> [u8; layout::PREAMBLE_LEN] {
    let mut bytes = [0u8; layout::PREAMBLE_LEN];
    bytes[layout::PREAMBLE_SIZE_RANGE].copy_from_slice(&layout::PREAMBLE_SIZE.to_be_bytes());
    bytes[layout::POSTAMBLE_SIZE_RANGE].copy_from_slice(&layout::POSTAMBLE_SIZE.to_be_bytes());
    bytes[layout::ACN_PID_RANGE].copy_from_slice(layout::ACN_PID);
    bytes
}

/// Write the UDP preamble to the front of `buf`.
pub fn pack_preamble(buf: &mut [u8]) -> Result<usize, PduError> {
    if buf.len() < layout::PREAMBLE_LEN {
        return Err(PduError::BufferTooSmall {
            required: layout::PREAMBLE_LEN,
            actual: buf.len(),
        });
    }
    buf[..layout::PREAMBLE_LEN].copy_from_slice(&preamble_bytes());
    Ok(layout::PREAMBLE_LEN)
}

pub fn write_preamble(out: &mut dyn OutputStream) -> Result<(), PduError> {
    out.write(&preamble_bytes())
}

/// Prepend the UDP preamble in front of a finished root block.
pub fn prepend_preamble(stack: &mut IoStack) -> Result<(), PduError> {
    stack.write(&preamble_bytes())
}

/// Validate the UDP preamble and return the root PDU block behind it.
///
/// # Examples
/// ```
/// use acnpdu_core::protocols::root::{PREAMBLE_LEN, pack_preamble, parse_preamble};
///
/// let mut frame = vec![0u8; PREAMBLE_LEN + 2];
/// pack_preamble(&mut frame)?;
/// assert_eq!(parse_preamble(&frame)?.len(), 2);
/// # Ok::<(), acnpdu_core::PduError>(())
/// ```
pub fn parse_preamble(frame: &[u8]) -> Result<&[u8], PduError> {
    let reader = FieldReader::new(frame);
    reader.require_len(layout::PREAMBLE_LEN)?;

    let preamble = reader.read_u16_be(layout::PREAMBLE_SIZE_RANGE)?;
    let postamble = reader.read_u16_be(layout::POSTAMBLE_SIZE_RANGE)?;
    let acn_pid = reader.read_slice(layout::ACN_PID_RANGE)?;
    if preamble != layout::PREAMBLE_SIZE
        || postamble != layout::POSTAMBLE_SIZE
        || acn_pid != layout::ACN_PID
    {
        debug!(preamble, postamble, "UDP preamble rejected");
        return Err(PduError::InvalidPreamble);
    }

    Ok(&frame[layout::PREAMBLE_LEN..])
}

#[cfg(test)]
mod tests {
    use super::{pack_preamble, parse_preamble, prepend_preamble, write_preamble};
    use crate::io::{IoStack, OutputBuffer};
    use crate::pdu::PduError;

    const EXPECTED: [u8; 16] = [
        0x00, 0x10, 0x00, 0x00, b'A', b'S', b'C', b'-', b'E', b'1', b'.', b'1', b'7', 0, 0, 0,
    ];

    #[test]
    fn all_writers_agree() {
        let mut buf = [0u8; 16];
        assert_eq!(pack_preamble(&mut buf).unwrap(), 16);
        assert_eq!(buf, EXPECTED);

        let mut out = OutputBuffer::new();
        write_preamble(&mut out).unwrap();
        assert_eq!(out.as_slice(), &EXPECTED);

        let mut stack = IoStack::new();
        stack.write(&[0x70, 0x02]).unwrap();
        prepend_preamble(&mut stack).unwrap();
        assert_eq!(&stack.flatten()[..16], &EXPECTED);
    }

    #[test]
    fn pack_reports_required_size() {
        let err = pack_preamble(&mut [0u8; 15]).unwrap_err();
        assert_eq!(err, PduError::BufferTooSmall { required: 16, actual: 15 });
    }

    #[test]
    fn parse_returns_root_block() {
        let mut frame = EXPECTED.to_vec();
        frame.extend_from_slice(&[1, 2, 3]);
        assert_eq!(parse_preamble(&frame).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn parse_rejects_bad_identifier() {
        let mut frame = EXPECTED.to_vec();
        frame[4] = b'X';
        assert_eq!(parse_preamble(&frame).unwrap_err(), PduError::InvalidPreamble);
        let mut frame = EXPECTED.to_vec();
        frame[1] = 0x26;
        assert_eq!(parse_preamble(&frame).unwrap_err(), PduError::InvalidPreamble);
    }

    #[test]
    fn parse_rejects_short_frame() {
        let err = parse_preamble(&EXPECTED[..10]).unwrap_err();
        assert_eq!(err, PduError::TruncatedInput { needed: 16, actual: 10 });
    }
}
