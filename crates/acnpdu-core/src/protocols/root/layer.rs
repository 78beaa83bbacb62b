use super::cid::Cid;
use super::layout;
use crate::pdu::{Layer, Pdu, PduError};
use crate::protocols::common::reader::FieldReader;

/// ACN root layer: 4-byte vector, CID header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootLayer;

pub type RootPdu = Pdu<RootLayer>;

impl Layer for RootLayer {
    const NAME: &'static str = "root";
    const VECTOR_SIZE: usize = layout::VECTOR_SIZE;
    const HEADER_SIZE: usize = layout::HEADER_SIZE;

    type Vector = u32;
    type Header = Cid;

    fn pack_header(header: &Cid, buf: &mut [u8]) -> Result<usize, PduError> {
        if buf.len() < layout::CID_SIZE {
            return Err(PduError::BufferTooSmall {
                required: layout::CID_SIZE,
                actual: buf.len(),
            });
        }
        buf[..layout::CID_SIZE].copy_from_slice(header.as_bytes());
        Ok(layout::CID_SIZE)
    }

    fn unpack_header(bytes: &[u8]) -> Result<Cid, PduError> {
        let reader = FieldReader::new(bytes);
        let cid = reader.read_array::<{ layout::CID_SIZE }>(0..layout::CID_SIZE)?;
        Ok(Cid::from_bytes(cid))
    }
}

/// Root vectors this crate knows how to descend into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootVector {
    E131Data,
    E133Data,
}

impl RootVector {
    pub fn name(self) -> &'static str {
        match self {
            RootVector::E131Data => "E131_DATA",
            RootVector::E133Data => "E133_DATA",
        }
    }
}

impl From<RootVector> for u32 {
    fn from(value: RootVector) -> Self {
        match value {
            RootVector::E131Data => layout::VECTOR_ROOT_E131,
            RootVector::E133Data => layout::VECTOR_ROOT_E133,
        }
    }
}

impl TryFrom<u32> for RootVector {
    type Error = PduError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            layout::VECTOR_ROOT_E131 => Ok(RootVector::E131Data),
            layout::VECTOR_ROOT_E133 => Ok(RootVector::E133Data),
            vector => Err(PduError::UnknownVector { vector }),
        }
    }
}
