//! Form state management and form structs

use super::field::FormField;
use crate::auth::Account;
use crate::validation::{Rule, ValidationResult, Verdict};

/// Username length accepted at registration and on the profile
pub const USERNAME_LENGTH: (usize, usize) = (3, 12);
/// Password length accepted at registration
pub const PASSWORD_LENGTH: (usize, usize) = (6, 16);
/// Phone numbers are exactly this many digits
pub const PHONE_DIGITS: usize = 11;

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed; the caller may send the form
    Accepted,
    /// At least one field failed; nothing may be sent
    Blocked { invalid: Vec<&'static str> },
}

/// Trait for common form operations
pub trait Form {
    fn fields(&self) -> Vec<&FormField>;
    fn fields_mut(&mut self) -> Vec<&mut FormField>;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);

    fn field_count(&self) -> usize {
        self.fields().len()
    }
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields().into_iter().nth(index)
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        let index = self.active_field();
        self.fields_mut().into_iter().nth(index)
    }
    fn field_by_name(&self, name: &str) -> Option<&FormField> {
        self.fields().into_iter().find(|f| f.name == name)
    }
    fn field_by_name_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields_mut().into_iter().find(|f| f.name == name)
    }

    /// Fields whose rules read `name`, e.g. a confirmation for its password
    fn dependents(&self, name: &str) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|f| f.rules.iter().any(|r| r.depends_on() == Some(name)))
            .map(|f| f.name)
            .collect()
    }

    /// Validate one field and update its error indicator
    fn validate_field(&mut self, name: &str) -> Option<Verdict> {
        let other = self
            .field_by_name(name)?
            .rules
            .iter()
            .find_map(Rule::depends_on)
            .and_then(|other| self.field_by_name(other))
            .map(|f| f.value.clone());
        self.field_by_name_mut(name)
            .map(|f| f.apply_rules(other.as_deref()))
    }

    /// Live validation after `name` was edited
    fn on_input(&mut self, name: &str) {
        self.validate_field(name);
        for dependent in self.dependents(name) {
            self.validate_field(dependent);
        }
    }

    /// Validate every field without stopping at the first failure
    fn validate_all(&mut self) -> ValidationResult {
        let names: Vec<&'static str> = self.fields().iter().map(|f| f.name).collect();
        let mut result = ValidationResult::new();
        for name in names {
            if let Some(verdict) = self.validate_field(name) {
                result.record(name, verdict);
            }
        }
        result
    }

    fn submit(&mut self) -> SubmitOutcome {
        let result = self.validate_all();
        if result.is_valid() {
            return SubmitOutcome::Accepted;
        }
        let failed = result.invalid_fields();
        let invalid = self
            .fields()
            .into_iter()
            .map(|f| f.name)
            .filter(|name| failed.contains(name))
            .collect();
        SubmitOutcome::Blocked { invalid }
    }

    /// Type into the active field
    fn input_char(&mut self, c: char) {
        let name = match self.get_active_field_mut() {
            Some(field) => {
                field.push_char(c);
                field.name
            }
            None => return,
        };
        self.on_input(name);
    }

    /// Delete the last character of the active field
    fn backspace(&mut self) {
        let name = match self.get_active_field_mut() {
            Some(field) => {
                field.pop_char();
                field.name
            }
            None => return,
        };
        self.on_input(name);
    }

    /// Toggle masking of the active field if it is a secret field
    fn toggle_active_visibility(&mut self) {
        if let Some(field) = self.get_active_field_mut() {
            field.toggle_visibility();
        }
    }
}

/// Enum representing all possible form states
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Login(LoginForm),
    Register(RegisterForm),
    Profile(ProfileForm),
}

impl FormState {
    pub fn as_form(&self) -> Option<&dyn Form> {
        match self {
            FormState::None => None,
            FormState::Login(f) => Some(f),
            FormState::Register(f) => Some(f),
            FormState::Profile(f) => Some(f),
        }
    }

    pub fn as_form_mut(&mut self) -> Option<&mut dyn Form> {
        match self {
            FormState::None => None,
            FormState::Login(f) => Some(f),
            FormState::Register(f) => Some(f),
            FormState::Profile(f) => Some(f),
        }
    }

    pub fn next_field(&mut self) {
        if let Some(form) = self.as_form_mut() {
            form.next_field();
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(form) = self.as_form_mut() {
            form.prev_field();
        }
    }

    pub fn is_active_field_secret(&self) -> bool {
        self.as_form()
            .and_then(|f| f.get_field(f.active_field()))
            .is_some_and(|f| f.is_secret())
    }
}

// Login Form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: FormField,
    pub password: FormField,
    pub active_field_index: usize,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: FormField::text("username", "Username", vec![Rule::NonEmpty]),
            password: FormField::password("password", "Password", vec![Rule::NonEmpty]),
            active_field_index: 0,
        }
    }

    /// Login form with the username filled in and focus on the password
    pub fn with_username(username: &str) -> Self {
        let mut form = Self::new();
        if !username.is_empty() {
            form.username.set_text(username.to_string());
            form.active_field_index = 1;
        }
        form
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for LoginForm {
    fn fields(&self) -> Vec<&FormField> {
        vec![&self.username, &self.password]
    }
    fn fields_mut(&mut self) -> Vec<&mut FormField> {
        vec![&mut self.username, &mut self.password]
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
}

// Register Form
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: FormField,
    pub email: FormField,
    pub password1: FormField,
    pub password2: FormField,
    pub active_field_index: usize,
}

impl RegisterForm {
    pub fn new() -> Self {
        let (user_min, user_max) = USERNAME_LENGTH;
        let (pass_min, pass_max) = PASSWORD_LENGTH;
        Self {
            username: FormField::text(
                "username",
                "Username",
                vec![Rule::LengthRange {
                    min: user_min,
                    max: user_max,
                }],
            ),
            email: FormField::text("email", "Email", vec![Rule::Email]),
            password1: FormField::password(
                "password1",
                "Password",
                vec![Rule::LengthRange {
                    min: pass_min,
                    max: pass_max,
                }],
            ),
            password2: FormField::password(
                "password2",
                "Confirm Password",
                vec![Rule::EqualsField("password1")],
            ),
            active_field_index: 0,
        }
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for RegisterForm {
    fn fields(&self) -> Vec<&FormField> {
        vec![&self.username, &self.email, &self.password1, &self.password2]
    }
    fn fields_mut(&mut self) -> Vec<&mut FormField> {
        vec![
            &mut self.username,
            &mut self.email,
            &mut self.password1,
            &mut self.password2,
        ]
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(3);
    }
}

// Profile Form
#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub username: FormField,
    pub email: FormField,
    pub phone: FormField,
    pub active_field_index: usize,
}

impl ProfileForm {
    pub fn from_account(account: &Account) -> Self {
        let (user_min, user_max) = USERNAME_LENGTH;
        Self {
            username: FormField::text_with_value(
                "username",
                "Username",
                account.username.clone(),
                vec![Rule::LengthRange {
                    min: user_min,
                    max: user_max,
                }],
            ),
            email: FormField::text_with_value(
                "email",
                "Email",
                account.email.clone(),
                vec![Rule::Email],
            ),
            phone: FormField::text_with_value(
                "phone",
                "Phone (optional)",
                account.phone.clone().unwrap_or_default(),
                vec![Rule::OptionalDigits { len: PHONE_DIGITS }],
            ),
            active_field_index: 0,
        }
    }
}

impl Form for ProfileForm {
    fn fields(&self) -> Vec<&FormField> {
        vec![&self.username, &self.email, &self.phone]
    }
    fn fields_mut(&mut self) -> Vec<&mut FormField> {
        vec![&mut self.username, &mut self.email, &mut self.phone]
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(2);
    }
}
