//! Output buffers for packing.
//!
//! `writer` appends bytes to a growable region for streaming packers;
//! `stack` records chunks front-to-back so messages can be built innermost
//! layer first. Neither knows about PDU structure.

mod stack;
mod writer;

pub use stack::IoStack;
pub use writer::{OutputBuffer, OutputStream};
