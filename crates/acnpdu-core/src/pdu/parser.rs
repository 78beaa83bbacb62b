use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::envelope::Layer;
use super::error::PduError;
use super::flags::PduFlags;
use super::reader::PduReader;

/// One decoded envelope, borrowing its data from the input block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPdu<'a, H> {
    /// Flags as found on the wire (inherited fields have their flag clear).
    pub flags: PduFlags,
    /// Total envelope length, flags+length field included.
    pub length: usize,
    pub vector: u32,
    pub header: H,
    /// Body bytes, bounded by the validated length.
    pub data: &'a [u8],
}

impl<H> ParsedPdu<'_, H> {
    /// Interpret the raw vector as a layer's typed vector.
    ///
    /// Unknown values come back as [`PduError::UnknownVector`]; the caller
    /// decides whether to skip the PDU or abort.
    pub fn typed_vector<V>(&self) -> Result<V, PduError>
    where
        V: TryFrom<u32, Error = PduError>,
    {
        V::try_from(self.vector)
    }
}

/// Parse the single envelope at the front of `data`.
///
/// Every field must be present; bytes after the envelope are left alone.
///
/// # Examples
/// ```
/// use acnpdu_core::pdu::parse_pdu;
/// use acnpdu_core::protocols::rdm::RdmLayer;
///
/// let pdu = parse_pdu::<RdmLayer>(&[0x70, 0x05, 0xCC, 0x01, 0x02])?;
/// assert_eq!(pdu.vector, 0xCC);
/// assert_eq!(pdu.data, &[0x01, 0x02]);
/// # Ok::<(), acnpdu_core::PduError>(())
/// ```
pub fn parse_pdu<L: Layer>(data: &[u8]) -> Result<ParsedPdu<'_, L::Header>, PduError> {
    let mut reader = PduReader::new(data);
    parse_next::<L>(&mut reader, None)
}

/// Parse every sibling envelope in `data`, resolving inherited fields.
pub fn parse_block<L: Layer>(data: &[u8]) -> Result<Vec<ParsedPdu<'_, L::Header>>, PduError> {
    PduBlock::<L>::new(data).collect()
}

/// Iterator over the sibling envelopes of one PDU block.
///
/// A PDU with a cleared `V`, `H` or `D` flag takes that field from the
/// previous PDU of the block. Iteration ends after the first error.
pub struct PduBlock<'a, L: Layer> {
    reader: PduReader<'a>,
    previous: Option<ParsedPdu<'a, L::Header>>,
    failed: bool,
}

impl<'a, L: Layer> PduBlock<'a, L> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: PduReader::new(data),
            previous: None,
            failed: false,
        }
    }
}

impl<'a, L: Layer> Iterator for PduBlock<'a, L> {
    type Item = Result<ParsedPdu<'a, L::Header>, PduError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        match parse_next::<L>(&mut self.reader, self.previous.as_ref()) {
            Ok(pdu) => {
                self.previous = Some(pdu.clone());
                Some(Ok(pdu))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl<L: Layer> FusedIterator for PduBlock<'_, L> {}

fn parse_next<'a, L: Layer>(
    reader: &mut PduReader<'a>,
    previous: Option<&ParsedPdu<'a, L::Header>>,
) -> Result<ParsedPdu<'a, L::Header>, PduError> {
    let start = reader.offset();
    read_envelope::<L>(reader, previous).inspect_err(|err| {
        debug!(
            layer = L::NAME,
            stage = ?reader.stage(),
            offset = start,
            error = %err,
            "PDU rejected"
        );
    })
}

fn read_envelope<'a, L: Layer>(
    reader: &mut PduReader<'a>,
    previous: Option<&ParsedPdu<'a, L::Header>>,
) -> Result<ParsedPdu<'a, L::Header>, PduError> {
    let start = reader.offset();
    let (flags, length) = reader.read_flags_and_length::<L>()?;
    let end = start + length;

    let vector = if flags.contains(PduFlags::VECTOR) {
        reader.read_vector::<L>()?
    } else {
        inherited(previous, "vector")?.vector
    };

    let header = if flags.contains(PduFlags::HEADER) {
        reader.read_header::<L>()?
    } else {
        inherited(previous, "header")?.header.clone()
    };

    let body = reader.sub_slice(end)?;
    let data = if flags.contains(PduFlags::DATA) {
        body
    } else {
        if !body.is_empty() {
            return Err(PduError::MalformedLength {
                length,
                min: length - body.len(),
                available: length - body.len(),
            });
        }
        inherited(previous, "data")?.data
    };

    trace!(layer = L::NAME, vector, length, "parsed PDU");
    Ok(ParsedPdu {
        flags,
        length,
        vector,
        header,
        data,
    })
}

fn inherited<'p, 'a, H>(
    previous: Option<&'p ParsedPdu<'a, H>>,
    field: &'static str,
) -> Result<&'p ParsedPdu<'a, H>, PduError> {
    previous.ok_or(PduError::NothingToInherit { field })
}
