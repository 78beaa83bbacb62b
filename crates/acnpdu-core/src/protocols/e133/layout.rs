use std::ops::Range;

pub const VECTOR_SIZE: usize = 4;

pub const SOURCE_NAME_SIZE: usize = 64;
pub const SOURCE_NAME_RANGE: Range<usize> = 0..64;
pub const SEQUENCE_RANGE: Range<usize> = 64..68;
pub const ENDPOINT_RANGE: Range<usize> = 68..70;
pub const RESERVED_OFFSET: usize = 70;
pub const HEADER_SIZE: usize = 71;

pub const VECTOR_FRAMING_RDMNET: u32 = 0x0000_0001;
pub const VECTOR_FRAMING_STATUS: u32 = 0x0000_0002;
pub const VECTOR_FRAMING_CONTROLLER: u32 = 0x0000_0003;

/// Registered UDP port for E1.33 traffic.
pub const E133_PORT: u16 = 5569;
