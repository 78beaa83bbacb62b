use super::header::E133Header;
use super::layout;
use crate::io::IoStack;
use crate::pdu::{Layer, Pdu, PduError};

/// E1.33 framing layer: 4-byte vector, [`E133Header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct E133Layer;

pub type E133Pdu = Pdu<E133Layer>;

impl Layer for E133Layer {
    const NAME: &'static str = "e133";
    const VECTOR_SIZE: usize = layout::VECTOR_SIZE;
    const HEADER_SIZE: usize = layout::HEADER_SIZE;

    type Vector = u32;
    type Header = E133Header;

    fn pack_header(header: &E133Header, buf: &mut [u8]) -> Result<usize, PduError> {
        header.pack(buf)
    }

    fn unpack_header(bytes: &[u8]) -> Result<E133Header, PduError> {
        E133Header::unpack(bytes)
    }
}

/// Prepend one E1.33 envelope around everything already on `stack`.
///
/// # Examples
/// ```
/// use acnpdu_core::io::IoStack;
/// use acnpdu_core::protocols::e133::prepend_e133_pdu;
///
/// let mut stack = IoStack::new();
/// stack.write(&[0xAA, 0xBB])?;
/// prepend_e133_pdu(&mut stack, 1, "test", 5, 2)?;
/// assert_eq!(&stack.flatten()[..2], &[0x70, 0x4F]);
/// # Ok::<(), acnpdu_core::PduError>(())
/// ```
pub fn prepend_e133_pdu(
    stack: &mut IoStack,
    vector: u32,
    source: &str,
    sequence: u32,
    endpoint: u16,
) -> Result<(), PduError> {
    let header = E133Header::new(source, sequence, endpoint);
    E133Pdu::prepend(stack, vector, &header)
}

/// E1.33 vectors this crate knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum E133Vector {
    Rdmnet,
    Status,
    Controller,
}

impl E133Vector {
    pub fn name(self) -> &'static str {
        match self {
            E133Vector::Rdmnet => "RDMNET",
            E133Vector::Status => "STATUS",
            E133Vector::Controller => "CONTROLLER",
        }
    }
}

impl From<E133Vector> for u32 {
    fn from(value: E133Vector) -> Self {
        match value {
            E133Vector::Rdmnet => layout::VECTOR_FRAMING_RDMNET,
            E133Vector::Status => layout::VECTOR_FRAMING_STATUS,
            E133Vector::Controller => layout::VECTOR_FRAMING_CONTROLLER,
        }
    }
}

impl TryFrom<u32> for E133Vector {
    type Error = PduError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            layout::VECTOR_FRAMING_RDMNET => Ok(E133Vector::Rdmnet),
            layout::VECTOR_FRAMING_STATUS => Ok(E133Vector::Status),
            layout::VECTOR_FRAMING_CONTROLLER => Ok(E133Vector::Controller),
            vector => Err(PduError::UnknownVector { vector }),
        }
    }
}
