//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion, ordering and serialization
//! of every key type.

use core_kernel::{ClaimId, CoreError, CustomerId, PolicyNumber};
use proptest::prelude::*;

mod customer_id_tests {
    use super::*;

    #[test]
    fn test_prefix() {
        assert_eq!(CustomerId::prefix(), "CUS");
    }

    #[test]
    fn test_value_round_trip() {
        assert_eq!(CustomerId::new(12).value(), 12);
    }

    #[test]
    fn test_parse_without_prefix() {
        let parsed: CustomerId = "31".parse().unwrap();
        assert_eq!(parsed, CustomerId::new(31));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed: CustomerId = "  CUS-5 ".parse().unwrap();
        assert_eq!(parsed, CustomerId::new(5));
    }

    #[test]
    fn test_parse_rejects_foreign_prefix() {
        let result = "POL-5".parse::<CustomerId>();
        assert!(matches!(result, Err(CoreError::InvalidIdentifier { kind: "CustomerId", .. })));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "customer".parse::<CustomerId>().unwrap_err();
        assert!(err.to_string().contains("CustomerId"));
    }
}

mod policy_number_tests {
    use super::*;

    #[test]
    fn test_display_format() {
        assert_eq!(PolicyNumber::new(1001).to_string(), "POL-1001");
    }

    #[test]
    fn test_ordering_follows_value() {
        let mut numbers = vec![PolicyNumber::new(3), PolicyNumber::new(1), PolicyNumber::new(2)];
        numbers.sort();
        assert_eq!(numbers, vec![PolicyNumber::new(1), PolicyNumber::new(2), PolicyNumber::new(3)]);
    }

    #[test]
    fn test_parse_overflow_is_rejected() {
        assert!("POL-99999999999".parse::<PolicyNumber>().is_err());
    }
}

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&ClaimId::new(9)).unwrap();
        assert_eq!(json, "9");

        let back: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ClaimId::new(9));
    }
}

proptest! {
    #[test]
    fn prop_display_parses_back(raw in any::<i32>()) {
        let id = CustomerId::new(raw);
        let parsed: CustomerId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    #[test]
    fn prop_bare_integer_parses(raw in any::<i32>()) {
        let parsed: PolicyNumber = raw.to_string().parse().unwrap();
        prop_assert_eq!(parsed.value(), raw);
    }
}
