//! Login form.

use crate::rules::{Field, Filter, FormErrors, FormSpec, RawForm, Rule};

pub const LOGIN_PASSWORD_MIN_LEN: u64 = 4;
pub const LOGIN_PASSWORD_MAX_LEN: u64 = 200;

pub const LOGIN_FORM: FormSpec = FormSpec {
    name: "login",
    fields: &[
        Field::filtered("email", &[Filter::Lowercase], &[Rule::Required, Rule::Email]),
        Field::new(
            "password",
            &[Rule::Required, Rule::between(LOGIN_PASSWORD_MIN_LEN, LOGIN_PASSWORD_MAX_LEN)],
        ),
    ],
};

/// Validated login credentials. `email` is lowercased.
#[derive(Clone)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginData")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl LoginData {
    pub fn validate(raw: &RawForm) -> Result<Self, FormErrors> {
        let cleaned = LOGIN_FORM.run(raw).finish()?;
        Ok(Self {
            email: cleaned.required_text("email")?,
            password: cleaned.required_text("password")?,
        })
    }
}
