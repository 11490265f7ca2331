//! Strongly-typed identifiers for persisted entities
//!
//! Every table in the schema is keyed by a database-generated `INTEGER`
//! identity column. Wrapping those integers in newtypes keeps a customer key
//! from being passed where a policy number is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_key {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wraps a raw key value
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Returns the raw key value as stored in the database
            pub const fn value(&self) -> i32 {
                self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.trim();
                let raw = raw.strip_prefix(concat!($prefix, "-")).unwrap_or(raw);
                raw.parse::<i32>()
                    .map(Self)
                    .map_err(|e| CoreError::invalid_identifier(stringify!($name), s, e))
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> i32 {
                id.0
            }
        }
    };
}

define_key!(CustomerId, "CUS");
define_key!(PolicyNumber, "POL");
define_key!(ClaimId, "CLM");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_id_display() {
        assert_eq!(CustomerId::new(42).to_string(), "CUS-42");
    }

    #[test]
    fn test_id_parsing() {
        let original = PolicyNumber::new(7);
        let parsed: PolicyNumber = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_i32_conversion() {
        let claim_id = ClaimId::from(15);
        let back: i32 = claim_id.into();
        assert_eq!(back, 15);
    }
}
