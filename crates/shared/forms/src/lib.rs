//! Input validation for Kid-O forms.
//!
//! Each form is a static rule list run over a raw `field -> text` map. A
//! passing submission becomes a typed payload; a failing one becomes
//! [`FormErrors`] with every field's messages.

pub mod child;
pub mod login;
pub mod rules;
pub mod signup;

pub use child::{ChildIntake, CHILD_FORM};
pub use login::{LoginData, LOGIN_FORM};
pub use rules::{Cleaned, Field, Filter, FormErrors, FormSpec, RawForm, Rule, Submission};
pub use signup::{SignUpData, PASSWORDS_DO_NOT_MATCH, SIGNUP_FORM};
