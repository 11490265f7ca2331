//! Customer Domain
//!
//! This crate holds the customer record of the insurance manager: the
//! descriptive details captured for a policyholder, the persisted
//! `Customer` with its key, and the validation applied before a customer
//! is written to the database.
//!
//! A customer can hold any number of policies. The link itself is the
//! `CustomerPolicy` join entity in `domain_policy`; on this side the
//! relationship is navigated through [`Customer::policies`], the policy
//! numbers currently linked to the customer.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_party::{CustomerDetails, CustomerValidator};
//!
//! let mut details = CustomerDetails::new(
//!     NaiveDate::from_ymd_opt(1985, 6, 15).unwrap().and_hms_opt(0, 0, 0).unwrap(),
//! );
//! details.first_name = Some("Jane".to_string());
//! details.email = Some("jane.doe@example.com".to_string());
//!
//! assert!(CustomerValidator::validate(&details).is_valid);
//! ```

pub mod customer;
pub mod error;
pub mod validation;

pub use customer::{Customer, CustomerDetails};
pub use error::PartyError;
pub use validation::{CustomerValidator, ValidationResult};
