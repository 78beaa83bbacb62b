//! Protocol layers carried by the PDU engine.
//!
//! Each layer follows the same structure:
//! - `layout`: byte offsets, widths and vector values (source of truth)
//! - `layer`: the [`Layer`](crate::pdu::Layer) descriptor and typed vectors
//! - header codecs where the layer has a non-trivial header
//!
//! Layers are pure and contain no I/O. Nesting is root → E1.33 → RDM, with
//! the UDP preamble in front of the root block.

pub(crate) mod common;
pub mod e133;
pub mod rdm;
pub mod root;
