//! Generic PDU envelope engine.
//!
//! Every envelope on the wire is `[flags+length][vector][header][data]`,
//! with the length counting the whole envelope. Layers plug in through
//! [`Layer`], which fixes vector and header widths and the header codec.
//!
//! Module layout:
//! - `layout`: field widths and flag bits (source of truth)
//! - `flags`: flags+length field encoding
//! - `envelope`: in-memory PDU trees, packing and stack prepending
//! - `reader`: bounds-checked cursor used by the parser
//! - `parser`: single PDUs and PDU blocks with field inheritance
//! - `error`: the shared error taxonomy

mod envelope;
mod error;
mod flags;
pub(crate) mod layout;
mod parser;
mod reader;

pub use envelope::{Layer, Packable, Pdu, PduBody, Sizeable, prepend_flags_and_length};
pub use error::PduError;
pub use flags::{PduFlags, encode_flags_and_length, envelope_length, flags_length_size};
pub use parser::{ParsedPdu, PduBlock, parse_block, parse_pdu};
pub use reader::{ParseStage, PduReader, minimum_length};
