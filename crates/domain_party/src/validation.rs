//! Customer validation rules
//!
//! Validation runs before a customer is inserted or updated, so anything
//! accepted here is stored and read back unchanged.
//!
//! # Validation Rules
//!
//! - Text fields respect their length caps (see [`CustomerDetails`]) and
//!   contain no NUL characters
//! - Email, when present, must be a valid address
//! - Photo reference, when present, must be a valid URL
//! - Phone number, when present, may contain only digits, spaces and
//!   `+ - ( ) .`, and must carry at least 7 digits
//! - Date of birth lies between 0001-01-01 and now, with at most
//!   microsecond precision
//! - Blank names are accepted but reported as warnings

use chrono::{NaiveDate, NaiveDateTime, Timelike, Utc};
use validator::Validate;

use crate::customer::CustomerDetails;
use crate::error::PartyError;

/// Minimum number of digits in a phone number
const MIN_PHONE_DIGITS: usize = 7;

/// Earliest accepted year of birth
const MIN_BIRTH_YEAR: i32 = 1;

/// Result of customer validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the customer is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Converts the result into a `Result`, discarding warnings
    pub fn into_result(self) -> Result<(), PartyError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(PartyError::validation_failed(self.errors))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for customer details
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use domain_party::{CustomerDetails, CustomerValidator};
///
/// let mut details = CustomerDetails::new(
///     NaiveDate::from_ymd_opt(1970, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
/// );
/// details.email = Some("not-an-email".to_string());
///
/// let result = CustomerValidator::validate(&details);
/// assert!(!result.is_valid);
/// ```
pub struct CustomerValidator;

impl CustomerValidator {
    /// Validates customer details against the current time
    pub fn validate(details: &CustomerDetails) -> ValidationResult {
        Self::validate_at(details, Utc::now().naive_utc())
    }

    /// Validates customer details against a fixed reference time
    ///
    /// # Arguments
    ///
    /// * `details` - The details to validate
    /// * `now` - The instant the date of birth is compared against
    pub fn validate_at(details: &CustomerDetails, now: NaiveDateTime) -> ValidationResult {
        let mut result = ValidationResult::ok();

        Self::validate_fields(details, &mut result);
        Self::validate_text_encoding(details, &mut result);
        Self::validate_phone_number(details, &mut result);
        Self::validate_date_of_birth(details, now, &mut result);
        Self::check_names(details, &mut result);

        result
    }

    /// Validates details and returns an error listing every failed rule
    ///
    /// # Errors
    ///
    /// Returns `PartyError::ValidationFailed` if any rule fails
    pub fn ensure_valid(details: &CustomerDetails) -> Result<(), PartyError> {
        Self::validate(details).into_result()
    }

    /// Runs the declarative field rules (lengths, email, URL)
    fn validate_fields(details: &CustomerDetails, result: &mut ValidationResult) {
        if let Err(errors) = details.validate() {
            let mut messages: Vec<String> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, field_errors)| {
                    field_errors
                        .iter()
                        .map(move |error| format!("{}: failed '{}' check", field, error.code))
                })
                .collect();
            messages.sort();
            for message in messages {
                result.add_error(message);
            }
        }
    }

    fn validate_phone_number(details: &CustomerDetails, result: &mut ValidationResult) {
        let Some(phone) = details.phone_number.as_deref() else {
            return;
        };

        if let Some(bad) = phone
            .chars()
            .find(|c| !(c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.')))
        {
            result.add_error(format!("phone_number: unexpected character '{}'", bad));
            return;
        }

        let digits = phone.chars().filter(char::is_ascii_digit).count();
        if digits < MIN_PHONE_DIGITS {
            result.add_error(format!(
                "phone_number: expected at least {} digits, found {}",
                MIN_PHONE_DIGITS, digits
            ));
        }
    }

    fn validate_text_encoding(details: &CustomerDetails, result: &mut ValidationResult) {
        for (field, value) in [
            ("first_name", &details.first_name),
            ("last_name", &details.last_name),
            ("address", &details.address),
            ("phone_number", &details.phone_number),
            ("email", &details.email),
            ("customer_photo_url", &details.customer_photo_url),
        ] {
            if matches!(value.as_deref(), Some(v) if v.contains('\0')) {
                result.add_error(format!("{}: contains a NUL character", field));
            }
        }
    }

    fn validate_date_of_birth(
        details: &CustomerDetails,
        now: NaiveDateTime,
        result: &mut ValidationResult,
    ) {
        let dob = details.date_of_birth;
        if dob > now {
            result.add_error("date_of_birth: cannot be in the future");
        }
        if NaiveDate::from_ymd_opt(MIN_BIRTH_YEAR, 1, 1).is_some_and(|min| dob.date() < min) {
            result.add_error(format!(
                "date_of_birth: cannot be before year {}",
                MIN_BIRTH_YEAR
            ));
        }
        // TIMESTAMP columns keep microseconds
        if dob.nanosecond() % 1_000 != 0 {
            result.add_error("date_of_birth: precision finer than a microsecond");
        }
    }

    fn check_names(details: &CustomerDetails, result: &mut ValidationResult) {
        for (field, value) in [
            ("first_name", &details.first_name),
            ("last_name", &details.last_name),
        ] {
            if matches!(value.as_deref(), Some(v) if v.trim().is_empty()) {
                result.add_warning(format!("{} is present but blank", field));
            }
        }
    }
}
