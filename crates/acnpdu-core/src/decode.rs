use thiserror::Error;
use tracing::debug;

use crate::pdu::{Layer, ParsedPdu, PduBlock, PduError};
use crate::protocols::e133::{E133Header, E133Layer, E133Vector};
use crate::protocols::rdm::{RdmLayer, RdmVector};
use crate::protocols::root::{Cid, RootLayer, RootVector, parse_preamble};
use crate::{FrameReport, HeaderReport, LayerReport, make_frame_report};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("UDP preamble: {0}")]
    Preamble(#[source] PduError),
    #[error("{layer} layer: {source}")]
    Pdu {
        layer: &'static str,
        #[source]
        source: PduError,
    },
}

impl DecodeError {
    /// The underlying PDU error.
    pub fn pdu_error(&self) -> &PduError {
        match self {
            DecodeError::Preamble(source) | DecodeError::Pdu { source, .. } => source,
        }
    }
}

/// Decode one UDP payload into a layered report.
///
/// Any structural failure aborts the decode; vectors this crate does not
/// know are reported without a name and counted, not guessed at.
///
/// # Examples
/// ```
/// use acnpdu_core::{MessageBody, MessageSpec, decode_frame, encode_message};
///
/// let spec = MessageSpec {
///     cid: "000102030405060708090a0b0c0d0e0f".to_string(),
///     source: "test".to_string(),
///     sequence: 5,
///     endpoint: 2,
///     vector: 1,
///     body: MessageBody::Rdm { command: "0118".to_string() },
/// };
/// let report = decode_frame(&encode_message(&spec)?)?;
/// assert_eq!(report.unknown_vectors, 0);
/// assert_eq!(report.layers[0].children[0].children[0].layer, "rdm");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_frame(frame: &[u8]) -> Result<FrameReport, DecodeError> {
    let root_block = parse_preamble(frame).map_err(DecodeError::Preamble)?;
    let mut report = make_frame_report(frame.len() as u64);
    let mut unknown = 0u64;

    for pdu in PduBlock::<RootLayer>::new(root_block) {
        let pdu = pdu.map_err(layer_error::<RootLayer>)?;
        report.layers.push(decode_root_pdu(&pdu, &mut unknown)?);
    }

    report.unknown_vectors = unknown;
    Ok(report)
}

fn decode_root_pdu(pdu: &ParsedPdu<'_, Cid>, unknown: &mut u64) -> Result<LayerReport, DecodeError> {
    let header = HeaderReport::Root {
        cid: pdu.header.to_string(),
    };
    let vector = pdu.typed_vector::<RootVector>().ok();
    let mut layer = layer_report::<RootLayer, _>(pdu, vector.map(RootVector::name), header);
    match vector {
        Some(RootVector::E133Data) => {
            for child in PduBlock::<E133Layer>::new(pdu.data) {
                let child = child.map_err(layer_error::<E133Layer>)?;
                layer.children.push(decode_e133_pdu(&child, unknown)?);
            }
        }
        Some(RootVector::E131Data) => layer.payload_hex = Some(hex::encode(pdu.data)),
        None => unknown_vector::<RootLayer, _>(pdu, &mut layer, unknown),
    }
    Ok(layer)
}

fn decode_e133_pdu(
    pdu: &ParsedPdu<'_, E133Header>,
    unknown: &mut u64,
) -> Result<LayerReport, DecodeError> {
    let header = HeaderReport::E133 {
        source: pdu.header.source().to_string(),
        sequence: pdu.header.sequence(),
        endpoint: pdu.header.endpoint(),
    };
    let vector = pdu.typed_vector::<E133Vector>().ok();
    let mut layer = layer_report::<E133Layer, _>(pdu, vector.map(E133Vector::name), header);
    match vector {
        Some(E133Vector::Rdmnet) => {
            for child in PduBlock::<RdmLayer>::new(pdu.data) {
                let child = child.map_err(layer_error::<RdmLayer>)?;
                let vector = child.typed_vector::<RdmVector>().ok();
                let mut rdm = LayerReport {
                    layer: RdmLayer::NAME.to_string(),
                    vector: child.vector,
                    vector_name: vector.map(|v| v.name().to_string()),
                    length: child.length,
                    header: None,
                    children: Vec::new(),
                    payload_hex: Some(hex::encode(child.data)),
                };
                if vector.is_none() {
                    unknown_vector::<RdmLayer, _>(&child, &mut rdm, unknown);
                }
                layer.children.push(rdm);
            }
        }
        Some(E133Vector::Status | E133Vector::Controller) => {
            layer.payload_hex = Some(hex::encode(pdu.data));
        }
        None => unknown_vector::<E133Layer, _>(pdu, &mut layer, unknown),
    }
    Ok(layer)
}

fn layer_report<L: Layer, H>(
    pdu: &ParsedPdu<'_, H>,
    vector_name: Option<&'static str>,
    header: HeaderReport,
) -> LayerReport {
    LayerReport {
        layer: L::NAME.to_string(),
        vector: pdu.vector,
        vector_name: vector_name.map(str::to_string),
        length: pdu.length,
        header: Some(header),
        children: Vec::new(),
        payload_hex: None,
    }
}

fn unknown_vector<L: Layer, H>(pdu: &ParsedPdu<'_, H>, layer: &mut LayerReport, unknown: &mut u64) {
    debug!(layer = L::NAME, vector = pdu.vector, "unknown vector");
    layer.payload_hex = Some(hex::encode(pdu.data));
    *unknown += 1;
}

fn layer_error<L: Layer>(source: PduError) -> DecodeError {
    DecodeError::Pdu {
        layer: L::NAME,
        source,
    }
}
