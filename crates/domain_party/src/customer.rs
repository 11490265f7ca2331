//! Customer records
//!
//! A customer is stored as one row of the `customers` table. Everything
//! except the date of birth is optional; the key is generated by the
//! database on insert, which is why the details live in their own struct
//! and can exist before a `CustomerId` does.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CustomerId, PolicyNumber};

use crate::error::PartyError;

/// Descriptive fields of a customer
///
/// These are the columns a caller supplies when creating or updating a
/// customer. Field-level constraints are declared here and checked by
/// [`crate::CustomerValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CustomerDetails {
    #[validate(length(max = 256))]
    pub first_name: Option<String>,
    #[validate(length(max = 256))]
    pub last_name: Option<String>,
    /// Stored as a timestamp without time zone
    pub date_of_birth: NaiveDateTime,
    #[validate(length(max = 512))]
    pub address: Option<String>,
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
    #[validate(email, length(max = 256))]
    pub email: Option<String>,
    /// Reference to the customer's photo
    #[validate(url, length(max = 2048))]
    pub customer_photo_url: Option<String>,
}

impl CustomerDetails {
    /// Creates details with only the required date of birth set
    pub fn new(date_of_birth: NaiveDateTime) -> Self {
        Self {
            first_name: None,
            last_name: None,
            date_of_birth,
            address: None,
            phone_number: None,
            email: None,
            customer_photo_url: None,
        }
    }

    /// Returns the first and last name joined by a space, skipping blanks
    ///
    /// Returns `None` when neither part is present.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// A persisted customer
///
/// `policies` is the navigation side of the customer/policy relationship.
/// It is filled by a query-time join when the customer is loaded with its
/// policies and is empty otherwise; it is never written back as a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(flatten)]
    pub details: CustomerDetails,
    #[serde(default)]
    pub policies: Vec<PolicyNumber>,
}

impl Customer {
    /// Creates a customer from its key and details, with no linked policies
    pub fn new(id: CustomerId, details: CustomerDetails) -> Self {
        Self {
            id,
            details,
            policies: Vec::new(),
        }
    }

    /// Returns the customer's display name, if any name part is present
    pub fn full_name(&self) -> Option<String> {
        self.details.full_name()
    }

    /// Checks whether the customer is linked to the given policy
    pub fn has_policy(&self, policy: PolicyNumber) -> bool {
        self.policies.contains(&policy)
    }

    /// Adds a policy to the customer's navigation collection
    ///
    /// # Errors
    ///
    /// Returns `PartyError::DuplicatePolicyLink` if the policy is already
    /// linked, mirroring the unique (customer, policy) key of the join table.
    pub fn link_policy(&mut self, policy: PolicyNumber) -> Result<(), PartyError> {
        if self.has_policy(policy) {
            return Err(PartyError::DuplicatePolicyLink {
                customer: self.id.to_string(),
                policy: policy.to_string(),
            });
        }
        self.policies.push(policy);
        Ok(())
    }

    /// Removes a policy from the navigation collection
    ///
    /// Returns `true` if the policy was linked.
    pub fn unlink_policy(&mut self, policy: PolicyNumber) -> bool {
        let before = self.policies.len();
        self.policies.retain(|p| *p != policy);
        self.policies.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dob() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1990, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_full_name_skips_missing_parts() {
        let mut details = CustomerDetails::new(dob());
        assert_eq!(details.full_name(), None);

        details.last_name = Some("Nakamura".to_string());
        assert_eq!(details.full_name().as_deref(), Some("Nakamura"));

        details.first_name = Some("  Aiko ".to_string());
        assert_eq!(details.full_name().as_deref(), Some("Aiko Nakamura"));
    }

    #[test]
    fn test_link_policy_rejects_duplicate() {
        let mut customer = Customer::new(CustomerId::new(1), CustomerDetails::new(dob()));
        customer.link_policy(PolicyNumber::new(10)).unwrap();

        let err = customer.link_policy(PolicyNumber::new(10)).unwrap_err();
        assert!(matches!(err, PartyError::DuplicatePolicyLink { .. }));
        assert_eq!(customer.policies.len(), 1);
    }

    #[test]
    fn test_unlink_policy() {
        let mut customer = Customer::new(CustomerId::new(1), CustomerDetails::new(dob()));
        customer.link_policy(PolicyNumber::new(10)).unwrap();

        assert!(customer.unlink_policy(PolicyNumber::new(10)));
        assert!(!customer.unlink_policy(PolicyNumber::new(10)));
        assert!(!customer.has_policy(PolicyNumber::new(10)));
    }
}
