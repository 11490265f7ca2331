//! Policy domain errors

use thiserror::Error;

/// Errors that can occur in the policy domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The customer is already linked to the policy
    #[error("Customer {customer} is already linked to policy {policy}")]
    DuplicateLink { customer: String, policy: String },

    /// A join entity was applied to the wrong policy
    #[error("Link for policy {link_policy} cannot be attached to policy {policy}")]
    PolicyMismatch { policy: String, link_policy: String },
}
