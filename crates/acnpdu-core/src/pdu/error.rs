use thiserror::Error;

/// Errors returned by PDU packing and parsing.
///
/// Capacity errors carry the exact size the caller must provide; parse
/// errors describe which bound was violated. No variant ever accompanies
/// partially written or partially decoded output.
///
/// # Examples
/// ```
/// use acnpdu_core::PduError;
///
/// let err = PduError::BufferTooSmall { required: 79, actual: 78 };
/// assert!(err.to_string().contains("buffer too small"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PduError {
    #[error("buffer too small: need {required} bytes, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },
    #[error("truncated input: need {needed} bytes, got {actual}")]
    TruncatedInput { needed: usize, actual: usize },
    #[error("malformed PDU length {length}: expected {min}..={available}")]
    MalformedLength {
        length: usize,
        min: usize,
        available: usize,
    },
    #[error("unknown vector: {vector:#x}")]
    UnknownVector { vector: u32 },
    #[error("PDU length {length} exceeds the {max} byte limit")]
    LengthOverflow { length: usize, max: usize },
    #[error("{field} is inherited but no previous PDU exists in the block")]
    NothingToInherit { field: &'static str },
    #[error("invalid ACN preamble")]
    InvalidPreamble,
    #[error("allocation of {requested} bytes failed")]
    AllocationFailed { requested: usize },
}
