use std::ops::Range;

pub const VECTOR_SIZE: usize = 4;
pub const CID_SIZE: usize = 16;
pub const HEADER_SIZE: usize = CID_SIZE;

pub const VECTOR_ROOT_E131: u32 = 0x0000_0004;
pub const VECTOR_ROOT_E133: u32 = 0x0000_0005;

pub const PREAMBLE_SIZE_RANGE: Range<usize> = 0..2;
pub const POSTAMBLE_SIZE_RANGE: Range<usize> = 2..4;
pub const ACN_PID_RANGE: Range<usize> = 4..16;
pub const PREAMBLE_LEN: usize = 16;

pub const ACN_PID: &[u8; 12] = b"ASC-E1.17\0\0\0";
pub const PREAMBLE_SIZE: u16 = 0x0010;
pub const POSTAMBLE_SIZE: u16 = 0x0000;
