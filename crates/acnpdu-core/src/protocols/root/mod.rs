//! ACN root layer and the UDP preamble.
//!
//! A UDP datagram carries a 16-byte preamble followed by a block of root
//! PDUs. Each root PDU names the sending component (CID) and its vector
//! selects the protocol of the nested block.

mod cid;
mod layer;
pub mod layout;
mod preamble;

pub use cid::Cid;
pub use layer::{RootLayer, RootPdu, RootVector};
pub use layout::{PREAMBLE_LEN, VECTOR_ROOT_E131, VECTOR_ROOT_E133};
pub use preamble::{pack_preamble, parse_preamble, prepend_preamble, write_preamble};
