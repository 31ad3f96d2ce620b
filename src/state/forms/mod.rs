//! Form domain layer
//!
//! Type-safe form handling for the login, registration and profile views.
//! Each form owns its fields; the `Form` trait carries the orchestration
//! (live per-field validation, full validation on submit).

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{
    Form, FormState, LoginForm, ProfileForm, RegisterForm, SubmitOutcome, PHONE_DIGITS,
};
