//! Custom Test Assertions
//!
//! Assertion helpers for data-layer results.

use std::fmt::Debug;

use domain_party::{Customer, CustomerDetails};
use infra_db::DatabaseError;

/// Asserts that a stored customer carries exactly the given details
///
/// # Panics
///
/// Panics with both values when they differ
pub fn assert_customer_matches(actual: &Customer, expected: &CustomerDetails) {
    assert_eq!(
        &actual.details, expected,
        "customer {} does not match the details it was stored with",
        actual.id
    );
}

/// Asserts that a result failed with `DatabaseError::ForeignKeyViolation`
pub fn assert_foreign_key_violation<T: Debug>(result: Result<T, DatabaseError>) {
    match result {
        Err(DatabaseError::ForeignKeyViolation(_)) => {}
        other => panic!("expected ForeignKeyViolation, got {:?}", other),
    }
}

/// Asserts that a result failed with `DatabaseError::DuplicateEntry`
pub fn assert_duplicate_entry<T: Debug>(result: Result<T, DatabaseError>) {
    match result {
        Err(DatabaseError::DuplicateEntry(_)) => {}
        other => panic!("expected DuplicateEntry, got {:?}", other),
    }
}

/// Asserts that a result failed with `DatabaseError::NotFound`
pub fn assert_not_found<T: Debug>(result: Result<T, DatabaseError>) {
    match result {
        Err(e) if e.is_not_found() => {}
        other => panic!("expected NotFound, got {:?}", other),
    }
}

/// Asserts that a result failed with `DatabaseError::InvalidData`
pub fn assert_invalid_data<T: Debug>(result: Result<T, DatabaseError>) {
    match result {
        Err(DatabaseError::InvalidData(_)) => {}
        other => panic!("expected InvalidData, got {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_not_found_accepts_not_found() {
        assert_not_found::<()>(Err(DatabaseError::not_found("Customer", 7)));
    }

    #[test]
    #[should_panic(expected = "expected DuplicateEntry")]
    fn test_assert_duplicate_entry_rejects_ok() {
        assert_duplicate_entry(Ok(1));
    }
}
