//! Customer domain errors

use thiserror::Error;

/// Errors that can occur in the customer domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartyError {
    /// Customer validation failed
    #[error("Customer validation failed: {0}")]
    ValidationFailed(String),

    /// The customer is already linked to the policy
    #[error("Customer {customer} is already linked to policy {policy}")]
    DuplicatePolicyLink { customer: String, policy: String },
}

impl PartyError {
    /// Creates a ValidationFailed error from validation errors
    pub fn validation_failed(errors: Vec<String>) -> Self {
        PartyError::ValidationFailed(errors.join("; "))
    }
}
