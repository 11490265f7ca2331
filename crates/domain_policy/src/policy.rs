//! Policy records

use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, PolicyNumber};

use crate::customer_policy::CustomerPolicy;
use crate::error::PolicyError;

/// A persisted policy
///
/// The policy number is the only column. `customers` is the navigation side
/// of the relationship and is only populated when the policy is loaded with
/// its customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub number: PolicyNumber,
    #[serde(default)]
    pub customers: Vec<CustomerId>,
}

impl Policy {
    /// Creates a policy with no linked customers
    pub fn new(number: PolicyNumber) -> Self {
        Self {
            number,
            customers: Vec::new(),
        }
    }

    /// Checks whether a customer is linked to this policy
    pub fn covers(&self, customer: CustomerId) -> bool {
        self.customers.contains(&customer)
    }

    /// Returns the join entities for every linked customer
    pub fn links(&self) -> Vec<CustomerPolicy> {
        self.customers
            .iter()
            .map(|customer| CustomerPolicy::new(*customer, self.number))
            .collect()
    }

    /// Adds the customer side of a join entity to the navigation collection
    ///
    /// # Errors
    ///
    /// - `PolicyError::PolicyMismatch` if the link belongs to another policy
    /// - `PolicyError::DuplicateLink` if the customer is already linked
    pub fn attach(&mut self, link: &CustomerPolicy) -> Result<(), PolicyError> {
        if link.policy_number != self.number {
            return Err(PolicyError::PolicyMismatch {
                policy: self.number.to_string(),
                link_policy: link.policy_number.to_string(),
            });
        }
        if self.covers(link.customer_id) {
            return Err(PolicyError::DuplicateLink {
                customer: link.customer_id.to_string(),
                policy: self.number.to_string(),
            });
        }
        self.customers.push(link.customer_id);
        Ok(())
    }

    /// Removes a customer from the navigation collection
    ///
    /// Returns `true` if the customer was linked.
    pub fn detach(&mut self, customer: CustomerId) -> bool {
        let before = self.customers.len();
        self.customers.retain(|c| *c != customer);
        self.customers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_rejects_other_policy() {
        let mut policy = Policy::new(PolicyNumber::new(1));
        let link = CustomerPolicy::new(CustomerId::new(1), PolicyNumber::new(2));

        assert!(matches!(
            policy.attach(&link),
            Err(PolicyError::PolicyMismatch { .. })
        ));
        assert!(policy.customers.is_empty());
    }

    #[test]
    fn test_links_rebuild_join_entities() {
        let mut policy = Policy::new(PolicyNumber::new(5));
        policy.attach(&CustomerPolicy::new(CustomerId::new(1), PolicyNumber::new(5))).unwrap();
        policy.attach(&CustomerPolicy::new(CustomerId::new(2), PolicyNumber::new(5))).unwrap();

        let links = policy.links();
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.policy_number == PolicyNumber::new(5)));
    }
}
