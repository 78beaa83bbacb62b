pub const FLAGS_LENGTH_SIZE: usize = 2;
pub const EXTENDED_FLAGS_LENGTH_SIZE: usize = 3;

pub const MAX_TWO_BYTE_LENGTH: usize = 0x0FFF;
pub const MAX_THREE_BYTE_LENGTH: usize = 0x0F_FFFF;

pub const FLAGS_MASK: u8 = 0xF0;
pub const LENGTH_HIGH_MASK: u8 = 0x0F;

pub const FLAG_LENGTH: u8 = 0x80;
pub const FLAG_VECTOR: u8 = 0x40;
pub const FLAG_HEADER: u8 = 0x20;
pub const FLAG_DATA: u8 = 0x10;

pub const MAX_VECTOR_SIZE: usize = 4;
