use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error types for Graphid construction
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphidError {
    #[error("Local ID {0} is out of range (max: 2^48 - 1)")]
    LocidOutOfRange(u64),
}

/// Graphid: 64-bit identifier shared by vertices and edges
///
/// Layout: `[16-bit label ID][48-bit local ID]`. The label ID is assigned by
/// the store's label registry, the local ID by a per-label counter, so two
/// entities never share an id even across labels.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graphid(u64);

impl Graphid {
    /// Maximum value for local ID (2^48 - 1)
    pub const MAX_LOCID: u64 = 0x0000_FFFF_FFFF_FFFF;

    /// Build an id from a label ID and a local ID
    pub fn new(labid: u16, locid: u64) -> Result<Self, GraphidError> {
        if locid > Self::MAX_LOCID {
            return Err(GraphidError::LocidOutOfRange(locid));
        }
        Ok(Self(((labid as u64) << 48) | locid))
    }

    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Label ID (high 16 bits)
    pub fn labid(&self) -> u16 {
        (self.0 >> 48) as u16
    }

    /// Local ID (low 48 bits)
    pub fn locid(&self) -> u64 {
        self.0 & Self::MAX_LOCID
    }
}

impl fmt::Display for Graphid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.labid(), self.locid())
    }
}

impl From<Graphid> for u64 {
    fn from(id: Graphid) -> u64 {
        id.0
    }
}
