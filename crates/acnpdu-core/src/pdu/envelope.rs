use std::fmt;

use bytes::Bytes;
use tracing::{trace, warn};

use super::error::PduError;
use super::flags::{PduFlags, encode_flags_and_length, envelope_length, flags_length_size};
use super::layout;
use crate::io::{IoStack, OutputBuffer, OutputStream};

/// A protocol layer carried by the generic envelope.
///
/// A layer fixes the width of its vector, the width and codec of its
/// header, and nothing else; lengths, flags and nesting are handled by
/// [`Pdu`] and the parser.
pub trait Layer {
    /// Short name used in logs and reports.
    const NAME: &'static str;
    /// Width of the vector field in bytes (1..=4).
    const VECTOR_SIZE: usize;
    /// Width of the header in bytes; constant for every PDU of the layer.
    const HEADER_SIZE: usize;

    type Vector: Copy + Into<u32> + fmt::Debug + Send + Sync;
    type Header: Clone + fmt::Debug + PartialEq + Send + Sync;

    /// Write exactly `HEADER_SIZE` bytes to the front of `buf`.
    fn pack_header(header: &Self::Header, buf: &mut [u8]) -> Result<usize, PduError>;

    /// Decode a header from the first `HEADER_SIZE` bytes of `bytes`.
    fn unpack_header(bytes: &[u8]) -> Result<Self::Header, PduError>;
}

/// Anything that knows its own encoded size.
pub trait Sizeable {
    /// Total encoded size in bytes, flags+length field included.
    fn size(&self) -> usize;
}

/// Anything that can be written as one complete envelope.
pub trait Packable: Sizeable + fmt::Debug + Send + Sync {
    /// Pack into `buf`, returning the number of bytes written.
    ///
    /// Fails with [`PduError::BufferTooSmall`] carrying the exact required
    /// size when `buf` cannot hold the whole envelope; nothing written in
    /// that case is meaningful.
    fn pack(&self, buf: &mut [u8]) -> Result<usize, PduError>;

    /// Stream the same bytes as [`Packable::pack`] into an open-ended sink.
    fn write(&self, out: &mut dyn OutputStream) -> Result<(), PduError>;

    /// Prepend this envelope (and everything it wraps) onto `stack`.
    fn prepend_to(&self, stack: &mut IoStack) -> Result<(), PduError>;

    fn pack_to_bytes(&self) -> Result<Bytes, PduError> {
        let mut out = OutputBuffer::with_capacity(self.size());
        self.write(&mut out)?;
        Ok(out.freeze())
    }
}

/// Body of an envelope: nothing, opaque bytes, or exactly one child.
#[derive(Debug)]
pub enum PduBody {
    Empty,
    Raw(Bytes),
    Nested(Box<dyn Packable>),
}

impl PduBody {
    pub fn size(&self) -> usize {
        match self {
            PduBody::Empty => 0,
            PduBody::Raw(data) => data.len(),
            PduBody::Nested(child) => child.size(),
        }
    }

    fn pack(&self, buf: &mut [u8]) -> Result<usize, PduError> {
        match self {
            PduBody::Empty => Ok(0),
            PduBody::Raw(data) => {
                if buf.len() < data.len() {
                    return Err(PduError::BufferTooSmall {
                        required: data.len(),
                        actual: buf.len(),
                    });
                }
                buf[..data.len()].copy_from_slice(data);
                Ok(data.len())
            }
            PduBody::Nested(child) => child.pack(buf),
        }
    }

    fn write(&self, out: &mut dyn OutputStream) -> Result<(), PduError> {
        match self {
            PduBody::Empty => Ok(()),
            PduBody::Raw(data) => out.write(data),
            PduBody::Nested(child) => child.write(out),
        }
    }

    fn prepend_to(&self, stack: &mut IoStack) -> Result<(), PduError> {
        match self {
            PduBody::Empty => Ok(()),
            PduBody::Raw(data) => stack.write(data),
            PduBody::Nested(child) => child.prepend_to(stack),
        }
    }
}

/// One envelope of layer `L`: vector, header and body.
///
/// Ownership is a strict tree: a PDU owns at most one child, which owns at
/// most one child of its own.
///
/// # Examples
/// ```
/// use acnpdu_core::pdu::{Packable, Pdu, Sizeable};
/// use acnpdu_core::protocols::e133::{E133Header, E133Layer};
///
/// let pdu = Pdu::<E133Layer>::leaf(1, E133Header::new("test", 5, 2), vec![0xAA, 0xBB]);
/// let mut buf = vec![0u8; pdu.size()];
/// assert_eq!(pdu.pack(&mut buf)?, 79);
/// # Ok::<(), acnpdu_core::PduError>(())
/// ```
#[derive(Debug)]
pub struct Pdu<L: Layer> {
    vector: L::Vector,
    header: L::Header,
    body: PduBody,
}

impl<L: Layer> Pdu<L> {
    pub fn new(vector: L::Vector, header: L::Header, body: PduBody) -> Self {
        Self {
            vector,
            header,
            body,
        }
    }

    pub fn empty(vector: L::Vector, header: L::Header) -> Self {
        Self::new(vector, header, PduBody::Empty)
    }

    pub fn leaf(vector: L::Vector, header: L::Header, data: impl Into<Bytes>) -> Self {
        Self::new(vector, header, PduBody::Raw(data.into()))
    }

    pub fn wrap(vector: L::Vector, header: L::Header, child: impl Packable + 'static) -> Self {
        Self::new(vector, header, PduBody::Nested(Box::new(child)))
    }

    pub fn vector(&self) -> L::Vector {
        self.vector
    }

    pub fn header(&self) -> &L::Header {
        &self.header
    }

    pub fn body(&self) -> &PduBody {
        &self.body
    }

    pub fn header_size(&self) -> usize {
        L::HEADER_SIZE
    }

    /// Encoded size of the body: 0 for an empty leaf, the payload length for
    /// a raw leaf, the child's total size for a wrapper.
    pub fn data_size(&self) -> usize {
        self.body.size()
    }

    fn content_size(&self) -> usize {
        L::VECTOR_SIZE + L::HEADER_SIZE + self.data_size()
    }

    /// Prepend one envelope of this layer around everything already on
    /// `stack`, which is taken to be the body.
    pub fn prepend(
        stack: &mut IoStack,
        vector: L::Vector,
        header: &L::Header,
    ) -> Result<(), PduError> {
        let body_len = stack.size();
        Self::prepend_envelope(stack, body_len, vector, header)
    }

    /// Write flags+length, vector and header as a single chunk in front of
    /// the `body_len` bytes at the top of `stack`.
    fn prepend_envelope(
        stack: &mut IoStack,
        body_len: usize,
        vector: L::Vector,
        header: &L::Header,
    ) -> Result<(), PduError> {
        let length = envelope_length(body_len + L::VECTOR_SIZE + L::HEADER_SIZE)?;
        let (field, field_len) = encode_flags_and_length(PduFlags::ALL_PRESENT, length)?;

        let mut front = vec![0u8; field_len + L::VECTOR_SIZE + L::HEADER_SIZE];
        front[..field_len].copy_from_slice(&field[..field_len]);
        let header_start = field_len + L::VECTOR_SIZE;
        let vector = vector_bytes::<L>(vector);
        front[field_len..header_start].copy_from_slice(vector_field::<L>(&vector));
        L::pack_header(header, &mut front[header_start..])?;
        stack.write(&front)
    }
}

impl<L: Layer> Sizeable for Pdu<L> {
    fn size(&self) -> usize {
        let content = self.content_size();
        content + flags_length_size(content)
    }
}

impl<L> Packable for Pdu<L>
where
    L: Layer + fmt::Debug + Send + Sync,
{
    fn pack(&self, buf: &mut [u8]) -> Result<usize, PduError> {
        let length = envelope_length(self.content_size())?;
        if buf.len() < length {
            warn!(
                layer = L::NAME,
                required = length,
                actual = buf.len(),
                "PDU pack buffer too small"
            );
            return Err(PduError::BufferTooSmall {
                required: length,
                actual: buf.len(),
            });
        }

        let buf = &mut buf[..length];
        let (field, field_len) = encode_flags_and_length(PduFlags::ALL_PRESENT, length)?;
        buf[..field_len].copy_from_slice(&field[..field_len]);
        let mut offset = field_len;

        let vector = vector_bytes::<L>(self.vector);
        buf[offset..offset + L::VECTOR_SIZE].copy_from_slice(vector_field::<L>(&vector));
        offset += L::VECTOR_SIZE;

        offset += L::pack_header(&self.header, &mut buf[offset..offset + L::HEADER_SIZE])?;
        offset += self.body.pack(&mut buf[offset..])?;
        debug_assert_eq!(offset, length);

        trace!(layer = L::NAME, length, "packed PDU");
        Ok(length)
    }

    fn write(&self, out: &mut dyn OutputStream) -> Result<(), PduError> {
        let length = envelope_length(self.content_size())?;
        let (field, field_len) = encode_flags_and_length(PduFlags::ALL_PRESENT, length)?;
        out.write(&field[..field_len])?;
        out.write(vector_field::<L>(&vector_bytes::<L>(self.vector)))?;

        let mut header = vec![0u8; L::HEADER_SIZE];
        L::pack_header(&self.header, &mut header)?;
        out.write(&header)?;

        self.body.write(out)
    }

    fn prepend_to(&self, stack: &mut IoStack) -> Result<(), PduError> {
        let before = stack.size();
        self.body.prepend_to(stack)?;
        let body_len = stack.size() - before;
        Self::prepend_envelope(stack, body_len, self.vector, &self.header)
    }
}

/// Prepend a flags+length field sized to cover everything on `stack`.
pub fn prepend_flags_and_length(stack: &mut IoStack, flags: PduFlags) -> Result<(), PduError> {
    let length = envelope_length(stack.size())?;
    let (field, field_len) = encode_flags_and_length(flags, length)?;
    stack.write(&field[..field_len])
}

fn vector_bytes<L: Layer>(vector: L::Vector) -> [u8; layout::MAX_VECTOR_SIZE] {
    let value: u32 = vector.into();
    value.to_be_bytes()
}

fn vector_field<L: Layer>(bytes: &[u8; layout::MAX_VECTOR_SIZE]) -> &[u8] {
    &bytes[layout::MAX_VECTOR_SIZE - L::VECTOR_SIZE..]
}
