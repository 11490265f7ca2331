//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::PolicyNumber;

#[test]
fn test_invalid_identifier_display_names_kind_and_input() {
    let error = CoreError::invalid_identifier("PolicyNumber", "POL-x", "invalid digit found in string");
    assert_eq!(
        error.to_string(),
        "'POL-x' is not a valid PolicyNumber: invalid digit found in string"
    );
}

#[test]
fn test_parse_failure_keeps_original_input() {
    let error = " POL-abc".parse::<PolicyNumber>().unwrap_err();

    match error {
        CoreError::InvalidIdentifier { kind, input, .. } => {
            assert_eq!(kind, "PolicyNumber");
            assert_eq!(input, " POL-abc");
        }
    }
}
