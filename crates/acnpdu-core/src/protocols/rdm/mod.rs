//! RDM layer nested in E1.33 RDMNET PDUs.

mod layer;
pub mod layout;

pub use layer::{RdmLayer, RdmPdu, RdmVector};
pub use layout::VECTOR_RDMNET_DATA;
