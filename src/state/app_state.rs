//! Application state definitions

use super::forms::FormState;
use super::shake_state::ShakeState;
use crate::auth::Account;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    Dashboard,
    Profile,
}

impl View {
    /// Views that edit a form
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::Login | View::Register | View::Profile)
    }

    /// Views only reachable while signed out
    pub fn is_guest_view(&self) -> bool {
        matches!(self, View::Login | View::Register)
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Sign In",
            View::Register => "Create Account",
            View::Dashboard => "Dashboard",
            View::Profile => "Edit Profile",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Session
    pub session: Option<Account>,

    // Form state
    pub form: FormState,
    pub shake: Option<ShakeState>,

    // Feedback
    pub errors: VecDeque<String>,
}

impl AppState {
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown, oldest first
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn clear_form(&mut self) {
        self.form = FormState::None;
        self.shake = None;
    }
}
