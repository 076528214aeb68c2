/// Field-level validation for lead records.
///
/// Checks run in a fixed order and the first violation wins:
/// 1. Each required field is present and non-blank
/// 2. Email matches a basic `local@domain.tld` shape
/// 3. Phone is exactly ten digits
/// 4. Consent was given
use crate::errors::ValidationError;
use crate::models::{LeadRecord, RequiredField, PHONE_DIGITS};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Validates a lead record, returning the first rule it breaks.
pub fn validate(record: &LeadRecord) -> Result<(), ValidationError> {
    for field in RequiredField::ALL {
        if record.field(field).trim().is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }

    if !is_valid_email(&record.email) {
        tracing::debug!("❌ Invalid email format: {}", record.email);
        return Err(ValidationError::InvalidEmail);
    }

    if !is_valid_phone(&record.phone) {
        tracing::debug!("❌ Invalid phone: {}", record.phone);
        return Err(ValidationError::InvalidPhone);
    }

    if !record.consent {
        return Err(ValidationError::ConsentRequired);
    }

    Ok(())
}

/// Basic address check: no whitespace, a single `@`, and a dot in the domain.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Exactly ten ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> LeadRecord {
        LeadRecord {
            full_name: "Priya Sharma".to_string(),
            email: "priya@example.com".to_string(),
            phone: "9876543210".to_string(),
            state: "Maharashtra".to_string(),
            course: "MBA".to_string(),
            intake: "2025".to_string(),
            consent: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert_eq!(validate(&valid_record()), Ok(()));
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut record = valid_record();
        record.state = "   ".to_string();
        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField(RequiredField::State))
        );
    }

    #[test]
    fn test_missing_field_reported_before_bad_email() {
        let mut record = valid_record();
        record.email = "not-an-email".to_string();
        record.intake.clear();
        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField(RequiredField::Intake))
        );
    }

    #[test]
    fn test_bad_email_reported_before_bad_phone() {
        let mut record = valid_record();
        record.email = "priya@example".to_string();
        record.phone = "123".to_string();
        assert_eq!(validate(&record), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_phone_must_be_ten_digits() {
        let mut record = valid_record();
        record.phone = "98765432101".to_string();
        assert_eq!(validate(&record), Err(ValidationError::InvalidPhone));

        record.phone = "98765-4321".to_string();
        assert_eq!(validate(&record), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_consent_checked_last() {
        let mut record = valid_record();
        record.consent = false;
        assert_eq!(validate(&record), Err(ValidationError::ConsentRequired));
    }
}
