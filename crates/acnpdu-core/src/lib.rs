//! acnpdu core library: nested ACN PDU encoding and decoding.
//!
//! The crate is a synchronous, allocation-light codec. The `pdu` engine
//! handles the generic envelope (flags+length, vector, header, data), the
//! `protocols` modules plug concrete layers into it (root, E1.33, RDM and
//! the UDP preamble), and `io` provides the buffers packing writes into.
//! On top of that sit a message builder driven by [`MessageSpec`] and a
//! frame decoder producing a deterministic [`FrameReport`].
//!
//! Invariants:
//! - A PDU's length counts every byte of its envelope and is computed from
//!   the finished body, never guessed.
//! - Tree packing and stack prepending produce identical bytes.
//! - Every claimed length is checked against the bytes present before any
//!   field inside it is read; rejected parses return no partial results.
//!
//! # Examples
//! ```
//! use acnpdu_core::{MessageBody, MessageSpec, decode_frame, encode_message};
//!
//! let spec = MessageSpec {
//!     cid: "5e1d0f3a-9b7c-4d2e-8f10-a1b2c3d4e5f6".to_string(),
//!     source: "console".to_string(),
//!     sequence: 1,
//!     endpoint: 0,
//!     vector: 1,
//!     body: MessageBody::Raw { data: "aabb".to_string() },
//! };
//! let frame = encode_message(&spec)?;
//! let report = decode_frame(&frame)?;
//! assert_eq!(report.layers.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod decode;
pub mod io;
mod message;
pub mod pdu;
pub mod protocols;

pub use decode::{DecodeError, decode_frame};
pub use message::{MessageBody, MessageError, MessageSpec, encode_message, encode_message_stacked};
pub use pdu::PduError;

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decoded view of one frame, layers in wire order.
///
/// # Examples
/// ```
/// use acnpdu_core::make_frame_report;
///
/// let report = make_frame_report(117);
/// assert_eq!(report.report_version, acnpdu_core::REPORT_VERSION);
/// assert!(report.layers.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input file metadata, when the frame came from a file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputInfo>,
    /// Size of the decoded frame in bytes.
    pub frame_bytes: u64,
    /// Number of PDUs whose vector is not known to the decoder.
    pub unknown_vectors: u64,
    /// Root PDUs in wire order.
    pub layers: Vec<LayerReport>,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use acnpdu_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "acnpdu".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "acnpdu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "acnpdu").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input file metadata embedded in reports.
///
/// # Examples
/// ```
/// use acnpdu_core::InputInfo;
///
/// let input = InputInfo {
///     path: "frame.bin".to_string(),
///     bytes: 117,
/// };
/// assert_eq!(input.bytes, 117);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// One decoded PDU and the PDUs nested in it.
///
/// # Examples
/// ```
/// use acnpdu_core::LayerReport;
///
/// let layer = LayerReport {
///     layer: "rdm".to_string(),
///     vector: 0xCC,
///     vector_name: Some("RDMNET_DATA".to_string()),
///     length: 5,
///     header: None,
///     children: Vec::new(),
///     payload_hex: Some("0118".to_string()),
/// };
/// assert_eq!(layer.vector, 0xCC);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerReport {
    /// Layer name ("root", "e133", "rdm").
    pub layer: String,
    pub vector: u32,
    /// Symbolic vector name; `null` when the vector is unknown.
    pub vector_name: Option<String>,
    /// Envelope length, flags+length field included.
    pub length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderReport>,
    /// Nested PDUs in wire order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayerReport>,
    /// Undecoded data as lowercase hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_hex: Option<String>,
}

/// Decoded header of a layer that has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeaderReport {
    Root {
        /// CID as 32 lowercase hex digits.
        cid: String,
    },
    E133 {
        source: String,
        sequence: u32,
        endpoint: u16,
    },
}

/// Build an empty report for a frame of `frame_bytes` bytes.
pub fn make_frame_report(frame_bytes: u64) -> FrameReport {
    FrameReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "acnpdu".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: None,
        frame_bytes,
        unknown_vectors: 0,
        layers: vec![],
    }
}
