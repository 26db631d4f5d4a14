//! Strongly-typed identifiers for lovethyeyes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a dispatched notification.
///
/// Desktop notification servers hand back a `u32`; mock dispatchers use a
/// counter. Either way the value is opaque to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchId(u32);

impl DispatchId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DispatchId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
