use super::layout;
use crate::pdu::{Layer, Pdu, PduError};

/// RDM layer: 1-byte vector, no header. Data is the RDM command without
/// its start code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RdmLayer;

pub type RdmPdu = Pdu<RdmLayer>;

impl Layer for RdmLayer {
    const NAME: &'static str = "rdm";
    const VECTOR_SIZE: usize = layout::VECTOR_SIZE;
    const HEADER_SIZE: usize = layout::HEADER_SIZE;

    type Vector = u8;
    type Header = ();

    fn pack_header(_header: &(), _buf: &mut [u8]) -> Result<usize, PduError> {
        Ok(0)
    }

    fn unpack_header(_bytes: &[u8]) -> Result<(), PduError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdmVector {
    RdmnetData,
}

impl RdmVector {
    pub fn name(self) -> &'static str {
        match self {
            RdmVector::RdmnetData => "RDMNET_DATA",
        }
    }
}

impl From<RdmVector> for u32 {
    fn from(value: RdmVector) -> Self {
        match value {
            RdmVector::RdmnetData => u32::from(layout::VECTOR_RDMNET_DATA),
        }
    }
}

impl TryFrom<u32> for RdmVector {
    type Error = PduError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == u32::from(layout::VECTOR_RDMNET_DATA) {
            Ok(RdmVector::RdmnetData)
        } else {
            Err(PduError::UnknownVector { vector: value })
        }
    }
}
