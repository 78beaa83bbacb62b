use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::layout;

/// Component identifier carried in the root layer header.
///
/// Displayed as 32 lowercase hex digits; parsed from either the simple or
/// the hyphenated UUID form.
///
/// # Examples
/// ```
/// use acnpdu_core::protocols::root::Cid;
///
/// let cid: Cid = "5e1d0f3a-9b7c-4d2e-8f10-a1b2c3d4e5f6".parse()?;
/// assert_eq!(cid.to_string(), "5e1d0f3a9b7c4d2e8f10a1b2c3d4e5f6");
/// # Ok::<(), uuid::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cid(Uuid);

impl Cid {
    pub const fn from_bytes(bytes: [u8; layout::CID_SIZE]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; layout::CID_SIZE] {
        self.0.as_bytes()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for Cid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for Cid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}
