//! Claims Domain
//!
//! A claim is currently identified by its key alone; the `claims` table
//! holds a single identity column.

pub mod claim;

pub use claim::Claim;
