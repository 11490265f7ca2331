//! Customer/policy join entity

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{CustomerId, PolicyNumber};

/// One row of the `customer_policies` join table
///
/// The pair (`customer_id`, `policy_number`) is the composite primary key,
/// so a given customer appears at most once per policy. Both fields are
/// required foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerPolicy {
    pub customer_id: CustomerId,
    pub policy_number: PolicyNumber,
}

impl CustomerPolicy {
    /// Creates a link between a customer and a policy
    pub fn new(customer_id: CustomerId, policy_number: PolicyNumber) -> Self {
        Self {
            customer_id,
            policy_number,
        }
    }

    /// Returns the composite key as a tuple
    pub fn key(&self) -> (CustomerId, PolicyNumber) {
        (self.customer_id, self.policy_number)
    }
}

impl From<(CustomerId, PolicyNumber)> for CustomerPolicy {
    fn from((customer_id, policy_number): (CustomerId, PolicyNumber)) -> Self {
        Self::new(customer_id, policy_number)
    }
}

impl fmt::Display for CustomerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.customer_id, self.policy_number)
    }
}
