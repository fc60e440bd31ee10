//! Rule lists and the runner that applies them.
//!
//! A form is a list of fields; each field has filters and an ordered list of
//! rules. The runner visits every field, so one pass yields every field's
//! messages. Within a field, `Required` on an empty value and `Optional` on an
//! empty value end the chain; any other failing rule adds its message and the
//! chain goes on.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use validator::{ValidateEmail, ValidateLength};

use common::{AppError, FieldErrors};

/// Raw submission: field name to submitted text.
pub type RawForm = HashMap<String, String>;

/// Accepted date input format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const EMAIL_MESSAGE: &str = "Invalid email address.";
pub const DATE_MESSAGE: &str = "Not a valid date value.";
pub const FLOAT_MESSAGE: &str = "Not a valid float value.";

/// Input transformation applied before any rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Lowercase,
}

impl Filter {
    fn apply(self, value: String) -> String {
        match self {
            Filter::Lowercase => value.to_lowercase(),
        }
    }
}

/// A single constraint check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Value must be present and not blank; stops the chain otherwise
    Required,
    /// Blank value skips the remaining rules
    Optional,
    /// Length bounds in characters
    Length { min: Option<u64>, max: Option<u64> },
    Email,
    Date,
    Float,
}

impl Rule {
    pub const fn max(max: u64) -> Self {
        Rule::Length {
            min: None,
            max: Some(max),
        }
    }

    pub const fn between(min: u64, max: u64) -> Self {
        Rule::Length {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Field declaration inside a form.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub filters: &'static [Filter],
    pub rules: &'static [Rule],
}

impl Field {
    pub const fn new(name: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            name,
            filters: &[],
            rules,
        }
    }

    pub const fn filtered(name: &'static str, filters: &'static [Filter], rules: &'static [Rule]) -> Self {
        Self {
            name,
            filters,
            rules,
        }
    }
}

/// Named set of field declarations.
#[derive(Debug, Clone, Copy)]
pub struct FormSpec {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl FormSpec {
    /// Filter and check every field of `raw`.
    pub fn run(&self, raw: &RawForm) -> Submission {
        let mut submission = Submission::default();

        for field in self.fields {
            let value = raw.get(field.name).cloned().unwrap_or_default();
            let value = field.filters.iter().fold(value, |v, f| f.apply(v));

            for message in check_field(field.rules, &value) {
                submission.errors.add(field.name, message);
            }
            if !value.trim().is_empty() {
                submission.values.insert(field.name, value);
            }
        }

        if !submission.errors.is_empty() {
            tracing::debug!(
                form = self.name,
                fields = ?submission.errors.fields(),
                "Form validation failed"
            );
        }

        submission
    }
}

fn check_field(rules: &[Rule], value: &str) -> Vec<String> {
    let blank = value.trim().is_empty();
    let mut messages = Vec::new();

    for rule in rules {
        match *rule {
            Rule::Required if blank => {
                messages.push(REQUIRED_MESSAGE.to_string());
                break;
            }
            Rule::Optional if blank => break,
            Rule::Required | Rule::Optional => {}
            Rule::Length { min, max } => {
                if !value.to_string().validate_length(min, max, None) {
                    messages.push(length_message(min, max));
                }
            }
            Rule::Email => {
                if !value.to_string().validate_email() {
                    messages.push(EMAIL_MESSAGE.to_string());
                }
            }
            Rule::Date => {
                if NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).is_err() {
                    messages.push(DATE_MESSAGE.to_string());
                }
            }
            Rule::Float => {
                if value.trim().parse::<f64>().is_err() {
                    messages.push(FLOAT_MESSAGE.to_string());
                }
            }
        }
    }

    messages
}

fn length_message(min: Option<u64>, max: Option<u64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("Field must be between {} and {} characters long.", min, max),
        (Some(min), None) => format!("Field must be at least {} characters long.", min),
        (None, Some(max)) => format!("Field cannot be longer than {} characters.", max),
        (None, None) => String::new(),
    }
}

/// Messages collected for a submission, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages for one field, empty if it passed.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of the failing fields in sorted order.
    pub fn fields(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn into_inner(self) -> FieldErrors {
        self.0
    }
}

impl From<FormErrors> for AppError {
    fn from(errors: FormErrors) -> Self {
        AppError::InvalidForm(errors.into_inner())
    }
}

/// Result of running a form: filtered values plus any messages.
#[derive(Debug, Default)]
pub struct Submission {
    values: BTreeMap<&'static str, String>,
    errors: FormErrors,
}

impl Submission {
    /// Filtered value of a field, `None` when blank or missing.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut FormErrors {
        &mut self.errors
    }

    /// Hand back the values when every field passed.
    pub fn finish(self) -> Result<Cleaned, FormErrors> {
        if self.errors.is_empty() {
            Ok(Cleaned {
                values: self.values,
            })
        } else {
            Err(self.errors)
        }
    }
}

/// Values of a submission that passed every rule.
#[derive(Debug)]
pub struct Cleaned {
    values: BTreeMap<&'static str, String>,
}

impl Cleaned {
    pub fn text(&self, field: &str) -> Option<String> {
        self.values.get(field).cloned()
    }

    /// Value of a `Required` field.
    pub fn required_text(&self, field: &str) -> Result<String, FormErrors> {
        self.text(field)
            .ok_or_else(|| FormErrors::single(field, REQUIRED_MESSAGE))
    }

    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        self.values
            .get(field)
            .and_then(|v| NaiveDate::parse_from_str(v.trim(), DATE_FORMAT).ok())
    }

    pub fn float(&self, field: &str) -> Option<f64> {
        self.values.get(field).and_then(|v| v.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_FORM: FormSpec = FormSpec {
        name: "test",
        fields: &[
            Field::new("name", &[Rule::Required, Rule::max(5)]),
            Field::filtered("email", &[Filter::Lowercase], &[Rule::Optional, Rule::between(5, 25), Rule::Email]),
            Field::new("when", &[Rule::Optional, Rule::Date]),
        ],
    };

    fn raw(pairs: &[(&str, &str)]) -> RawForm {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_required_stops_chain() {
        let submission = TEST_FORM.run(&raw(&[]));
        assert_eq!(submission.errors().get("name"), [REQUIRED_MESSAGE.to_string()]);
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let submission = TEST_FORM.run(&raw(&[("name", "   ")]));
        assert_eq!(submission.errors().get("name"), [REQUIRED_MESSAGE.to_string()]);
    }

    #[test]
    fn test_every_field_is_checked() {
        let submission = TEST_FORM.run(&raw(&[("name", "toolong"), ("when", "yesterday")]));
        assert_eq!(submission.errors().fields(), vec!["name", "when"]);
    }

    #[test]
    fn test_non_stopping_rules_accumulate() {
        let submission = TEST_FORM.run(&raw(&[("name", "ok"), ("email", "abc")]));
        assert_eq!(
            submission.errors().get("email"),
            [
                "Field must be between 5 and 25 characters long.".to_string(),
                EMAIL_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn test_filter_runs_before_rules() {
        let submission = TEST_FORM.run(&raw(&[("name", "ok"), ("email", "A@Example.COM")]));
        assert!(submission.errors().is_empty());
        assert_eq!(submission.value("email"), Some("a@example.com"));
    }

    #[test]
    fn test_finish_exposes_typed_values() {
        let cleaned = TEST_FORM
            .run(&raw(&[("name", "ok"), ("when", "2020-02-29")]))
            .finish()
            .unwrap();
        assert_eq!(cleaned.date("when"), NaiveDate::from_ymd_opt(2020, 2, 29));
        assert_eq!(cleaned.text("email"), None);
    }

    #[test]
    fn test_form_errors_serialize_as_map() {
        let errors = FormErrors::single("name", REQUIRED_MESSAGE);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["name"][0], REQUIRED_MESSAGE);
    }

    #[test]
    fn test_form_errors_into_app_error() {
        let err: AppError = FormErrors::single("name", REQUIRED_MESSAGE).into();
        assert_eq!(err.code(), "INVALID_FORM");
    }
}
