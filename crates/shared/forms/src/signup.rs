//! Sign-up form with the confirm-password rule.

use crate::rules::{Field, Filter, FormErrors, FormSpec, RawForm, Rule};

pub const SIGNUP_NAME_MAX_LEN: u64 = 15;
pub const SIGNUP_PASSWORD_MIN_LEN: u64 = 6;
pub const SIGNUP_PASSWORD_MAX_LEN: u64 = 200;

pub const PASSWORDS_DO_NOT_MATCH: &str = "passwords do not match";

pub const SIGNUP_FORM: FormSpec = FormSpec {
    name: "signup",
    fields: &[
        Field::new("first_name", &[Rule::Required, Rule::max(SIGNUP_NAME_MAX_LEN)]),
        Field::new("last_name", &[Rule::Required, Rule::max(SIGNUP_NAME_MAX_LEN)]),
        Field::filtered("email", &[Filter::Lowercase], &[Rule::Required, Rule::Email]),
        Field::new(
            "password",
            &[Rule::Required, Rule::between(SIGNUP_PASSWORD_MIN_LEN, SIGNUP_PASSWORD_MAX_LEN)],
        ),
        Field::new("confirm", &[Rule::Required]),
    ],
};

/// Validated registration payload. `confirm` is checked and dropped.
#[derive(Clone)]
pub struct SignUpData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignUpData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpData")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl SignUpData {
    pub fn validate(raw: &RawForm) -> Result<Self, FormErrors> {
        let mut submission = SIGNUP_FORM.run(raw);

        // Runs once confirm passed its own rules, whatever the other fields did
        let mismatch = !submission.errors().has("confirm")
            && match (submission.value("password"), submission.value("confirm")) {
                (Some(password), Some(confirm)) => password != confirm,
                _ => false,
            };
        if mismatch {
            submission.errors_mut().add("confirm", PASSWORDS_DO_NOT_MATCH);
        }

        let cleaned = submission.finish()?;
        Ok(Self {
            first_name: cleaned.required_text("first_name")?,
            last_name: cleaned.required_text("last_name")?,
            email: cleaned.required_text("email")?,
            password: cleaned.required_text("password")?,
        })
    }
}
