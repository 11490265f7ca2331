//! Claim records

use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;

/// A persisted claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
}

impl Claim {
    pub fn new(id: ClaimId) -> Self {
        Self { id }
    }
}

impl From<ClaimId> for Claim {
    fn from(id: ClaimId) -> Self {
        Self::new(id)
    }
}
