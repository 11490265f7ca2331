//! Test Fixtures
//!
//! Pre-built test data for consistent testing across the suite.

use chrono::{NaiveDate, NaiveDateTime};

use domain_party::CustomerDetails;

/// Creates a midnight timestamp for the given calendar date
///
/// # Panics
///
/// Panics if the date is invalid
pub fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid fixture date")
}

/// Customer fixtures
pub struct CustomerFixtures;

impl CustomerFixtures {
    /// Date of birth shared by the standard fixtures
    pub fn date_of_birth() -> NaiveDateTime {
        date(1985, 6, 15)
    }

    /// A customer with every optional field filled in
    pub fn complete() -> CustomerDetails {
        CustomerDetails {
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            date_of_birth: Self::date_of_birth(),
            address: Some("12 Harbour Road, Portsmouth".to_string()),
            phone_number: Some("+44 23 9200 1234".to_string()),
            email: Some("jane.doe@example.com".to_string()),
            customer_photo_url: Some("https://images.example.com/customers/jane.png".to_string()),
        }
    }

    /// A customer with only the required date of birth
    pub fn minimal() -> CustomerDetails {
        CustomerDetails::new(date(1990, 1, 1))
    }

    /// A second complete customer, distinct from [`CustomerFixtures::complete`]
    pub fn other() -> CustomerDetails {
        CustomerDetails {
            first_name: Some("Sam".to_string()),
            last_name: Some("Okafor".to_string()),
            date_of_birth: date(1972, 11, 3),
            address: Some("4 Mill Lane, Leeds".to_string()),
            phone_number: Some("0113 496 0000".to_string()),
            email: Some("sam.okafor@example.org".to_string()),
            customer_photo_url: None,
        }
    }

    /// A customer whose email fails validation
    pub fn invalid_email() -> CustomerDetails {
        CustomerDetails {
            email: Some("not-an-email".to_string()),
            ..Self::complete()
        }
    }
}
