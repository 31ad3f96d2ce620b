//! Form field value objects

use crate::validation::{Rule, Verdict};

/// Character used to mask secret values
const MASK_CHAR: char = '•';

/// Visibility of a secret field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Masked,
    Revealed,
}

impl Visibility {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Masked => Self::Revealed,
            Self::Revealed => Self::Masked,
        };
    }

    /// Label for the toggle icon: what pressing it will do
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Masked => "show",
            Self::Revealed => "hide",
        }
    }
}

/// Error display bound to a single field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorIndicator {
    pub visible: bool,
    pub message: String,
}

/// Represents a single form field with its rules, value and error state
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: String,
    pub value: String,
    pub rules: Vec<Rule>,
    pub error: ErrorIndicator,
    /// `Some` for secret inputs (passwords)
    pub visibility: Option<Visibility>,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &'static str, label: &str, rules: Vec<Rule>) -> Self {
        Self {
            name,
            label: label.to_string(),
            value: String::new(),
            rules,
            error: ErrorIndicator::default(),
            visibility: None,
        }
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &'static str, label: &str, value: String, rules: Vec<Rule>) -> Self {
        Self {
            value,
            ..Self::text(name, label, rules)
        }
    }

    /// Create a new masked password field
    pub fn password(name: &'static str, label: &str, rules: Vec<Rule>) -> Self {
        Self {
            visibility: Some(Visibility::Masked),
            ..Self::text(name, label, rules)
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, value: String) {
        self.value = value;
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn is_secret(&self) -> bool {
        self.visibility.is_some()
    }

    pub fn is_masked(&self) -> bool {
        self.visibility == Some(Visibility::Masked)
    }

    /// Flip masked/revealed. No-op on non-secret fields.
    pub fn toggle_visibility(&mut self) {
        if let Some(visibility) = self.visibility.as_mut() {
            visibility.toggle();
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        if self.is_masked() {
            MASK_CHAR.to_string().repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    pub fn show_error(&mut self, message: String) {
        self.error.visible = true;
        self.error.message = message;
    }

    pub fn hide_error(&mut self) {
        self.error.visible = false;
        self.error.message.clear();
    }

    pub fn has_error(&self) -> bool {
        self.error.visible
    }

    /// Run the field's rules in order and update the error indicator.
    ///
    /// The first rule that does not pass decides the verdict. `other` is the
    /// current value of the field named by an `EqualsField` rule.
    pub fn apply_rules(&mut self, other: Option<&str>) -> Verdict {
        let mut outcome = Verdict::Pass;
        let mut message = None;
        for rule in &self.rules {
            let verdict = rule.check(&self.value, other);
            if verdict != Verdict::Pass {
                outcome = verdict;
                message = Some(rule.message(&self.label));
                break;
            }
        }

        match outcome {
            Verdict::Pass => self.hide_error(),
            Verdict::Fail => self.show_error(message.unwrap_or_default()),
            Verdict::Unresolved => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod visibility {
        use super::*;

        #[test]
        fn test_password_starts_masked() {
            let field = FormField::password("password", "Password", vec![]);
            assert!(field.is_secret());
            assert!(field.is_masked());
        }

        #[test]
        fn test_toggle_twice_restores_masked() {
            let mut field = FormField::password("password", "Password", vec![]);
            field.toggle_visibility();
            assert!(!field.is_masked());
            assert_eq!(field.visibility.map(|v| v.icon()), Some("hide"));
            field.toggle_visibility();
            assert!(field.is_masked());
            assert_eq!(field.visibility.map(|v| v.icon()), Some("show"));
        }

        #[test]
        fn test_toggle_on_text_field_is_noop() {
            let mut field = FormField::text("username", "Username", vec![]);
            field.toggle_visibility();
            assert!(!field.is_secret());
            assert!(field.visibility.is_none());
        }
    }

    mod display {
        use super::*;

        #[test]
        fn test_masked_value_hides_characters() {
            let mut field = FormField::password("password", "Password", vec![]);
            field.set_text("pässwd".to_string());
            assert_eq!(field.display_value(), "••••••");
        }

        #[test]
        fn test_revealed_value_is_plain() {
            let mut field = FormField::password("password", "Password", vec![]);
            field.set_text("secret".to_string());
            field.toggle_visibility();
            assert_eq!(field.display_value(), "secret");
        }

        #[test]
        fn test_push_and_pop_char() {
            let mut field = FormField::text("username", "Username", vec![]);
            field.push_char('a');
            field.push_char('b');
            field.pop_char();
            assert_eq!(field.as_text(), "a");
        }
    }

    mod rules {
        use super::*;

        #[test]
        fn test_failure_shows_first_message() {
            let mut field = FormField::text(
                "username",
                "Username",
                vec![Rule::NonEmpty, Rule::LengthRange { min: 3, max: 12 }],
            );
            field.set_text("ab".to_string());
            assert_eq!(field.apply_rules(None), Verdict::Fail);
            assert!(field.has_error());
            assert_eq!(field.error.message, "Username must be 3-12 characters");
        }

        #[test]
        fn test_pass_clears_error() {
            let mut field = FormField::text("username", "Username", vec![Rule::NonEmpty]);
            field.apply_rules(None);
            assert!(field.has_error());
            field.set_text("bob".to_string());
            assert_eq!(field.apply_rules(None), Verdict::Pass);
            assert!(!field.has_error());
            assert!(field.error.message.is_empty());
        }

        #[test]
        fn test_unresolved_leaves_indicator_alone() {
            let mut field =
                FormField::password("password2", "Confirm", vec![Rule::EqualsField("password1")]);
            field.show_error("Passwords do not match".to_string());
            assert_eq!(field.apply_rules(Some("")), Verdict::Unresolved);
            assert!(field.has_error());

            field.hide_error();
            assert_eq!(field.apply_rules(Some("")), Verdict::Unresolved);
            assert!(!field.has_error());
        }
    }
}
