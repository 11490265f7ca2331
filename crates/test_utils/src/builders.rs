//! Test Data Builders
//!
//! Builder pattern for constructing customer details with sensible defaults.

use chrono::NaiveDateTime;

use domain_party::CustomerDetails;

use crate::fixtures::CustomerFixtures;

/// Builder for creating test customer details
///
/// Starts from [`CustomerFixtures::complete`]; each `with_`/`without_` call
/// overrides one column.
#[derive(Debug, Clone)]
pub struct CustomerDetailsBuilder {
    details: CustomerDetails,
}

impl Default for CustomerDetailsBuilder {
    fn default() -> Self {
        Self {
            details: CustomerFixtures::complete(),
        }
    }
}

impl CustomerDetailsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.details.first_name = Some(name.into());
        self
    }

    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.details.last_name = Some(name.into());
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDateTime) -> Self {
        self.details.date_of_birth = date_of_birth;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.details.address = Some(address.into());
        self
    }

    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.details.phone_number = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.details.email = Some(email.into());
        self
    }

    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.details.customer_photo_url = Some(url.into());
        self
    }

    /// Clears every optional column
    pub fn without_optional_fields(mut self) -> Self {
        self.details = CustomerDetails::new(self.details.date_of_birth);
        self
    }

    pub fn build(self) -> CustomerDetails {
        self.details
    }
}
