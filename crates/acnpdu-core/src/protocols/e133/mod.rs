//! E1.33 framing layer.
//!
//! Carries the sender's source name, a sequence number and the target
//! endpoint. The vector selects the nested protocol; RDMNET PDUs carry a
//! block of RDM PDUs.

mod header;
mod layer;
pub mod layout;

pub use header::E133Header;
pub use layer::{E133Layer, E133Pdu, E133Vector, prepend_e133_pdu};
pub use layout::{
    E133_PORT, VECTOR_FRAMING_CONTROLLER, VECTOR_FRAMING_RDMNET, VECTOR_FRAMING_STATUS,
};
