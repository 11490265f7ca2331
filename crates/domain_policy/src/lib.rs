//! Policy Domain
//!
//! This crate models policies and their many-to-many relationship with
//! customers.
//!
//! # Relationship Model
//!
//! ```text
//! customers 1 ──< customer_policies >── 1 policies
//!               (customer_id, policy_number)
//! ```
//!
//! - **Policy**: keyed by a database-generated `PolicyNumber`
//! - **CustomerPolicy**: the join entity; its composite key is the pair
//!   (customer, policy) and each side cascades on delete
//!
//! Both ends of the relationship expose navigation collections made of keys
//! (`Policy::customers` here, `Customer::policies` in `domain_party`),
//! filled from the join table at query time.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::{CustomerId, PolicyNumber};
//! use domain_policy::{CustomerPolicy, Policy};
//!
//! let mut policy = Policy::new(PolicyNumber::new(1001));
//! let link = CustomerPolicy::new(CustomerId::new(7), policy.number);
//!
//! policy.attach(&link).unwrap();
//! assert!(policy.covers(CustomerId::new(7)));
//! ```

pub mod policy;
pub mod customer_policy;
pub mod error;

pub use policy::Policy;
pub use customer_policy::CustomerPolicy;
pub use error::PolicyError;
