/// Unit tests for lead validation
/// Tests required-field ordering, email and phone rules, and consent decoding
use lead_intake_api::errors::ValidationError;
use lead_intake_api::models::{LeadRecord, RequiredField};
use lead_intake_api::validation::{is_valid_email, is_valid_phone, validate};
use serde_json::json;

fn complete_lead() -> LeadRecord {
    serde_json::from_value(json!({
        "fullName": "Rohan Mehta",
        "email": "rohan.mehta@example.in",
        "phone": "9123456780",
        "state": "Karnataka",
        "course": "B.Tech Computer Science",
        "intake": "Fall 2025",
        "consent": "on"
    }))
    .unwrap()
}

#[cfg(test)]
mod required_field_tests {
    use super::*;

    #[test]
    fn test_complete_lead_is_valid() {
        assert_eq!(validate(&complete_lead()), Ok(()));
    }

    #[test]
    fn test_each_missing_field_is_named() {
        for field in RequiredField::ALL {
            let mut payload = serde_json::to_value(complete_lead()).unwrap();
            payload.as_object_mut().unwrap().remove(field.key());
            let record: LeadRecord = serde_json::from_value(payload).unwrap();

            let err = validate(&record).unwrap_err();
            assert_eq!(err, ValidationError::MissingField(field));
            assert_eq!(err.field(), field.key());
            assert!(
                err.to_string().contains(&field.label()),
                "message for {} should name it: {}",
                field.key(),
                err
            );
        }
    }

    #[test]
    fn test_first_missing_field_wins() {
        let mut record = complete_lead();
        record.course.clear();
        record.phone.clear();
        record.intake.clear();

        assert_eq!(
            validate(&record),
            Err(ValidationError::MissingField(RequiredField::Phone))
        );
    }

    #[test]
    fn test_empty_payload_reports_full_name() {
        let record: LeadRecord = serde_json::from_value(json!({})).unwrap();
        let err = validate(&record).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in the full name field.");
    }
}

#[cfg(test)]
mod email_validation_tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.in"));
        assert!(is_valid_email("a@b.c"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@examplecom"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user @example.com"));
        assert!(!is_valid_email("user@exam ple.com"));
        assert!(!is_valid_email("user@@example.com"));
    }

    #[test]
    fn test_malformed_email_fails_with_email_error() {
        let mut record = complete_lead();
        record.email = "rohan.mehta.example.in".to_string();

        let err = validate(&record).unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
        assert_eq!(err.to_string(), "Please enter a valid email address.");
    }
}

#[cfg(test)]
mod phone_validation_tests {
    use super::*;

    #[test]
    fn test_phone_rule() {
        assert!(is_valid_phone("9876543210"));
        assert!(!is_valid_phone("987654321"));
        assert!(!is_valid_phone("98765432100"));
        assert!(!is_valid_phone("98765 4321"));
        assert!(!is_valid_phone("+919876543"));
    }

    #[test]
    fn test_sanitized_formatted_phone_passes() {
        let mut record = complete_lead();
        record.phone = "+91 (912) 345-6780".to_string();
        record.sanitize_phone();

        // country code digits are kept; the first ten digits survive
        assert_eq!(record.phone, "9191234567");
        assert_eq!(validate(&record), Ok(()));
    }

    #[test]
    fn test_short_phone_rejected_after_sanitizing() {
        let mut record = complete_lead();
        record.phone = "912-345".to_string();
        record.sanitize_phone();
        assert_eq!(validate(&record), Err(ValidationError::InvalidPhone));
    }
}

#[cfg(test)]
mod consent_tests {
    use super::*;

    #[test]
    fn test_missing_consent_rejected() {
        let mut payload = serde_json::to_value(complete_lead()).unwrap();
        payload.as_object_mut().unwrap().remove("consent");
        let record: LeadRecord = serde_json::from_value(payload).unwrap();

        let err = validate(&record).unwrap_err();
        assert_eq!(err, ValidationError::ConsentRequired);
        assert_eq!(err.field(), "consent");
    }

    #[test]
    fn test_consent_checked_after_phone() {
        let mut record = complete_lead();
        record.consent = false;
        record.phone = "123".to_string();
        assert_eq!(validate(&record), Err(ValidationError::InvalidPhone));
    }
}
