use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::SubmissionError;

/// Default `source` stamped on leads coming from the landing pages.
pub const LANDING_PAGE_SOURCE: &str = "University Landing Page";

/// Maximum number of digits kept by [`LeadRecord::sanitize_phone`].
pub const PHONE_DIGITS: usize = 10;

/// A prospective-student contact record captured by the lead form.
///
/// Required fields default to an empty string when absent so that the
/// validator can report them by name instead of failing deserialization.
/// Any extra form fields are carried in `extra` and forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub intake: String,

    /// Acceptance checkbox. Accepts `true`, `"on"`, `"yes"`, `"1"`, ...
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub consent: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    /// Stamped server-side; client values that are not RFC 3339 are dropped.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LeadRecord {
    /// Strips non-digits and keeps at most the first ten digits, mirroring
    /// what the form's phone input does while the user types.
    pub fn sanitize_phone(&mut self) {
        self.phone = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(PHONE_DIGITS)
            .collect();
    }

    /// Returns the value of a required field by its wire key.
    pub fn field(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::FullName => &self.full_name,
            RequiredField::Email => &self.email,
            RequiredField::Phone => &self.phone,
            RequiredField::State => &self.state,
            RequiredField::Course => &self.course,
            RequiredField::Intake => &self.intake,
        }
    }
}

/// Form fields that must be present and non-blank, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    FullName,
    Email,
    Phone,
    State,
    Course,
    Intake,
}

impl RequiredField {
    pub const ALL: [RequiredField; 6] = [
        RequiredField::FullName,
        RequiredField::Email,
        RequiredField::Phone,
        RequiredField::State,
        RequiredField::Course,
        RequiredField::Intake,
    ];

    /// The camelCase key used by the form and the outbound payload.
    pub fn key(self) -> &'static str {
        match self {
            RequiredField::FullName => "fullName",
            RequiredField::Email => "email",
            RequiredField::Phone => "phone",
            RequiredField::State => "state",
            RequiredField::Course => "course",
            RequiredField::Intake => "intake",
        }
    }

    /// Human label derived from the key: `fullName` becomes `full name`.
    pub fn label(self) -> String {
        let key = self.key();
        let mut label = String::with_capacity(key.len() + 2);
        for c in key.chars() {
            if c.is_ascii_uppercase() {
                label.push(' ');
                label.push(c.to_ascii_lowercase());
            } else {
                label.push(c);
            }
        }
        label
    }
}

/// Normalized result of a submission call chain.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Upstream accepted the lead; carries the decoded response body.
    Success(Value),
    /// Terminal failure; carries the last error observed.
    Failure(SubmissionError),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }
}

fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(is_truthy).unwrap_or(false))
}

fn deserialize_lenient_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map(|parsed| parsed.with_timezone(&Utc)))
}

/// Interprets a checkbox-like form value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty()
                || s.eq_ignore_ascii_case("false")
                || s.eq_ignore_ascii_case("off")
                || s.eq_ignore_ascii_case("no")
                || s == "0")
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}
