pub const VECTOR_SIZE: usize = 1;
pub const HEADER_SIZE: usize = 0;

pub const VECTOR_RDMNET_DATA: u8 = 0xCC;
