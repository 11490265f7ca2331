//! Test Data Generators
//!
//! Fake-data helpers for realistic customers, and proptest strategies for
//! property-based testing.

use chrono::{Days, NaiveDateTime};
use fake::faker::address::en::{BuildingNumber, CityName, StreetName};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;

use domain_party::CustomerDetails;

use crate::fixtures::date;

/// Generates a realistic customer that passes validation
pub fn fake_customer_details() -> CustomerDetails {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    let building: String = BuildingNumber().fake();
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let subscriber: u32 = (2_000_000u32..9_999_999).fake();
    let days_old: u64 = (18u64 * 365..90 * 365).fake();

    CustomerDetails {
        first_name: Some(first),
        last_name: Some(last),
        date_of_birth: born_days_before(date(2024, 1, 1), days_old),
        address: Some(format!("{} {}, {}", building, street, city)),
        phone_number: Some(format!("+1 555 {}", subscriber)),
        email: Some(SafeEmail().fake()),
        customer_photo_url: None,
    }
}

/// Generates `count` fake customers
pub fn fake_customers(count: usize) -> Vec<CustomerDetails> {
    (0..count).map(|_| fake_customer_details()).collect()
}

fn born_days_before(base: NaiveDateTime, days: u64) -> NaiveDateTime {
    base.checked_sub_days(Days::new(days)).unwrap_or(base)
}

/// Strategy for dates of birth between roughly 1920 and 2000
pub fn date_of_birth_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0u64..29_000).prop_map(|days| born_days_before(date(2000, 1, 1), days))
}

/// Strategy for customer details that pass validation
pub fn valid_customer_details_strategy() -> impl Strategy<Value = CustomerDetails> {
    (
        proptest::option::of("[A-Z][a-z]{1,20}"),
        proptest::option::of("[A-Z][a-z]{1,30}"),
        date_of_birth_strategy(),
        proptest::option::of("[1-9][0-9]{0,3} [A-Z][a-z]{2,15} (Street|Road|Avenue)"),
        proptest::option::of("\\+[0-9]{7,14}"),
        proptest::option::of("[a-z]{1,12}@example\\.(com|org)"),
    )
        .prop_map(
            |(first_name, last_name, date_of_birth, address, phone_number, email)| CustomerDetails {
                first_name,
                last_name,
                date_of_birth,
                address,
                phone_number,
                email,
                customer_photo_url: None,
            },
        )
}

/// Strategy for phone numbers with too few digits to be accepted
pub fn short_phone_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,6}"
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_party::CustomerValidator;

    #[test]
    fn test_fake_customers_are_valid() {
        for details in fake_customers(25) {
            let result = CustomerValidator::validate(&details);
            assert!(result.is_valid, "{:?}: {:?}", details, result.errors);
        }
    }

    proptest! {
        #[test]
        fn prop_generated_details_are_valid(details in valid_customer_details_strategy()) {
            let result = CustomerValidator::validate(&details);
            prop_assert!(result.is_valid, "{:?}", result.errors);
        }

        #[test]
        fn prop_short_phone_numbers_are_rejected(phone in short_phone_strategy()) {
            let details = CustomerDetails {
                phone_number: Some(phone),
                ..CustomerDetails::new(date(1980, 5, 5))
            };
            prop_assert!(!CustomerValidator::validate(&details).is_valid);
        }
    }
}
