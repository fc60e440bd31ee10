//! Child intake form.

use chrono::NaiveDate;
use serde::Serialize;

use crate::rules::{Field, Filter, FormErrors, FormSpec, RawForm, Rule, REQUIRED_MESSAGE};

pub const INTAKE_NAME_MAX_LEN: u64 = 15;
pub const INTAKE_GUARDIAN_TYPE_MAX_LEN: u64 = 15;
pub const INTAKE_RELATIVE_NAME_MAX_LEN: u64 = 25;
pub const INTAKE_GODPARENT_EMAIL_MIN_LEN: u64 = 5;
pub const INTAKE_GODPARENT_EMAIL_MAX_LEN: u64 = 25;

const RELATIVE_NAME: &[Rule] = &[Rule::Optional, Rule::max(INTAKE_RELATIVE_NAME_MAX_LEN)];
const OPTIONAL_DATE: &[Rule] = &[Rule::Optional, Rule::Date];
const OPTIONAL_FLOAT: &[Rule] = &[Rule::Optional, Rule::Float];

pub const CHILD_FORM: FormSpec = FormSpec {
    name: "child_intake",
    fields: &[
        Field::new("first_name", &[Rule::Required, Rule::max(INTAKE_NAME_MAX_LEN)]),
        Field::new("last_name", &[Rule::Required, Rule::max(INTAKE_NAME_MAX_LEN)]),
        Field::new("birth_date", &[Rule::Required, Rule::Date]),
        Field::new("guardian_type", &[Rule::Optional, Rule::max(INTAKE_GUARDIAN_TYPE_MAX_LEN)]),
        Field::new("guardian_fname", RELATIVE_NAME),
        Field::new("guardian_lname", RELATIVE_NAME),
        Field::new("godparent_prefix", RELATIVE_NAME),
        Field::new("godparent_fname", RELATIVE_NAME),
        Field::new("godparent_lname", RELATIVE_NAME),
        Field::filtered(
            "godparent_email",
            &[Filter::Lowercase],
            &[
                Rule::Optional,
                Rule::between(INTAKE_GODPARENT_EMAIL_MIN_LEN, INTAKE_GODPARENT_EMAIL_MAX_LEN),
                Rule::Email,
            ],
        ),
        Field::new("medical_condition", &[]),
        Field::new("doctor_appt", OPTIONAL_DATE),
        Field::new("situation", &[]),
        Field::new("home_visit", OPTIONAL_DATE),
        Field::new("latitude", OPTIONAL_FLOAT),
        Field::new("longitude", OPTIONAL_FLOAT),
    ],
};

/// Validated child intake. Blank optional fields come back as `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildIntake {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub guardian_type: Option<String>,
    pub guardian_fname: Option<String>,
    pub guardian_lname: Option<String>,
    pub godparent_prefix: Option<String>,
    pub godparent_fname: Option<String>,
    pub godparent_lname: Option<String>,
    pub godparent_email: Option<String>,
    pub medical_condition: Option<String>,
    pub doctor_appt: Option<NaiveDate>,
    pub situation: Option<String>,
    pub home_visit: Option<NaiveDate>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ChildIntake {
    pub fn validate(raw: &RawForm) -> Result<Self, FormErrors> {
        let cleaned = CHILD_FORM.run(raw).finish()?;

        Ok(Self {
            first_name: cleaned.required_text("first_name")?,
            last_name: cleaned.required_text("last_name")?,
            birth_date: cleaned
                .date("birth_date")
                .ok_or_else(|| FormErrors::single("birth_date", REQUIRED_MESSAGE))?,
            guardian_type: cleaned.text("guardian_type"),
            guardian_fname: cleaned.text("guardian_fname"),
            guardian_lname: cleaned.text("guardian_lname"),
            godparent_prefix: cleaned.text("godparent_prefix"),
            godparent_fname: cleaned.text("godparent_fname"),
            godparent_lname: cleaned.text("godparent_lname"),
            godparent_email: cleaned.text("godparent_email"),
            medical_condition: cleaned.text("medical_condition"),
            doctor_appt: cleaned.date("doctor_appt"),
            situation: cleaned.text("situation"),
            home_visit: cleaned.date("home_visit"),
            latitude: cleaned.float("latitude"),
            longitude: cleaned.float("longitude"),
        })
    }

    /// True when any guardian column was submitted.
    pub fn has_guardian(&self) -> bool {
        self.guardian_type.is_some() || self.guardian_fname.is_some() || self.guardian_lname.is_some()
    }

    /// True when any godparent column was submitted.
    pub fn has_godparent(&self) -> bool {
        self.godparent_prefix.is_some()
            || self.godparent_fname.is_some()
            || self.godparent_lname.is_some()
            || self.godparent_email.is_some()
    }
}
