use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::io::IoStack;
use crate::pdu::{Packable, PduError, Sizeable};
use crate::protocols::e133::{E133Header, E133Pdu, VECTOR_FRAMING_RDMNET, prepend_e133_pdu};
use crate::protocols::rdm::{RdmPdu, VECTOR_RDMNET_DATA};
use crate::protocols::root::{
    Cid, PREAMBLE_LEN, RootPdu, VECTOR_ROOT_E133, pack_preamble, prepend_preamble,
};

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("invalid CID {value:?}: {source}")]
    InvalidCid {
        value: String,
        #[source]
        source: uuid::Error,
    },
    #[error("invalid hex in {field}: {source}")]
    InvalidHex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },
    #[error(transparent)]
    Pdu(#[from] PduError),
}

/// Description of one E1.33 frame, as read from a message file.
///
/// # Examples
/// ```
/// use acnpdu_core::{MessageBody, MessageSpec};
///
/// let spec: MessageSpec = serde_json::from_str(
///     r#"{
///         "cid": "000102030405060708090a0b0c0d0e0f",
///         "source": "console",
///         "sequence": 1,
///         "endpoint": 0,
///         "body": { "kind": "rdm", "command": "0102" }
///     }"#,
/// )?;
/// assert_eq!(spec.vector, 1);
/// assert!(matches!(spec.body, MessageBody::Rdm { .. }));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageSpec {
    /// Component identifier, simple or hyphenated UUID text.
    pub cid: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub sequence: u32,
    #[serde(default)]
    pub endpoint: u16,
    /// E1.33 framing vector.
    #[serde(default = "default_vector")]
    pub vector: u32,
    #[serde(default)]
    pub body: MessageBody,
}

/// Contents of the E1.33 PDU.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageBody {
    /// One RDM PDU carrying `command` (hex, start code excluded).
    Rdm { command: String },
    /// Opaque bytes (hex) placed directly in the E1.33 PDU.
    Raw { data: String },
    #[default]
    Empty,
}

fn default_vector() -> u32 {
    VECTOR_FRAMING_RDMNET
}

/// Build the nested PDU tree for `spec` and pack it behind the UDP preamble.
///
/// # Examples
/// ```
/// use acnpdu_core::{MessageBody, MessageSpec, encode_message, encode_message_stacked};
///
/// let spec = MessageSpec {
///     cid: "000102030405060708090a0b0c0d0e0f".to_string(),
///     source: "test".to_string(),
///     sequence: 5,
///     endpoint: 2,
///     vector: 1,
///     body: MessageBody::Raw { data: "aabb".to_string() },
/// };
/// let frame = encode_message(&spec)?;
/// assert_eq!(frame.len(), 16 + 2 + 4 + 16 + 79);
/// assert_eq!(frame, encode_message_stacked(&spec)?);
/// # Ok::<(), acnpdu_core::MessageError>(())
/// ```
pub fn encode_message(spec: &MessageSpec) -> Result<Bytes, MessageError> {
    let cid = parse_cid(&spec.cid)?;
    let header = E133Header::new(spec.source.as_str(), spec.sequence, spec.endpoint);
    let e133 = match &spec.body {
        MessageBody::Rdm { command } => {
            let rdm = RdmPdu::leaf(VECTOR_RDMNET_DATA, (), decode_hex("command", command)?);
            E133Pdu::wrap(spec.vector, header, rdm)
        }
        MessageBody::Raw { data } => E133Pdu::leaf(spec.vector, header, decode_hex("data", data)?),
        MessageBody::Empty => E133Pdu::empty(spec.vector, header),
    };
    let root = RootPdu::wrap(VECTOR_ROOT_E133, cid, e133);

    let mut frame = vec![0u8; PREAMBLE_LEN + root.size()];
    let offset = pack_preamble(&mut frame)?;
    let written = root.pack(&mut frame[offset..])?;
    trace!(bytes = offset + written, "encoded message");
    Ok(Bytes::from(frame))
}

/// Same bytes as [`encode_message`], built innermost layer first on an
/// [`IoStack`].
pub fn encode_message_stacked(spec: &MessageSpec) -> Result<Bytes, MessageError> {
    let cid = parse_cid(&spec.cid)?;
    let mut stack = IoStack::new();
    match &spec.body {
        MessageBody::Rdm { command } => {
            stack.write(&decode_hex("command", command)?)?;
            RdmPdu::prepend(&mut stack, VECTOR_RDMNET_DATA, &())?;
        }
        MessageBody::Raw { data } => stack.write(&decode_hex("data", data)?)?,
        MessageBody::Empty => {}
    }
    prepend_e133_pdu(
        &mut stack,
        spec.vector,
        &spec.source,
        spec.sequence,
        spec.endpoint,
    )?;
    RootPdu::prepend(&mut stack, VECTOR_ROOT_E133, &cid)?;
    prepend_preamble(&mut stack)?;
    Ok(stack.flatten())
}

fn parse_cid(value: &str) -> Result<Cid, MessageError> {
    value.parse().map_err(|source| MessageError::InvalidCid {
        value: value.to_string(),
        source,
    })
}

fn decode_hex(field: &'static str, text: &str) -> Result<Vec<u8>, MessageError> {
    let compact: String = text.split_whitespace().collect();
    hex::decode(compact).map_err(|source| MessageError::InvalidHex { field, source })
}
