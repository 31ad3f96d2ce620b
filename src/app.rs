//! Application state and core logic

use crate::auth::{AccountStore, AuthBackendTrait, ProfileUpdate, Registration};
use crate::config::TuiConfig;
use crate::state::{
    AppState, Form, FormState, LoginForm, ProfileForm, RegisterForm, ShakeState, SubmitOutcome,
    View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Account backend
    pub auth: Box<dyn AuthBackendTrait>,
    /// Loaded user configuration
    pub config: TuiConfig,
    /// Flash message shown in the status bar until the next key press
    pub status_message: Option<String>,
    /// Whether config changes are written back to disk
    persist_config: bool,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance using the local account store
    pub async fn new() -> Result<Self> {
        let config = TuiConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {e}");
            TuiConfig::default()
        });

        let auth: Box<dyn AuthBackendTrait> =
            match AccountStore::resolve_path(config.accounts_file.as_deref()) {
                Some(path) => match AccountStore::open(&path) {
                    Ok(store) => {
                        if store.is_empty() {
                            tracing::info!("No accounts in {} yet", path.display());
                        } else {
                            tracing::info!("Loaded {} account(s)", store.len());
                        }
                        Box::new(store)
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Failed to open account store {}: {e}; accounts will not be saved",
                            path.display()
                        );
                        Box::new(AccountStore::in_memory())
                    }
                },
                None => Box::new(AccountStore::in_memory()),
            };

        let mut app = Self::with_backend(auth, config);
        app.persist_config = true;
        Ok(app)
    }

    /// Create an App around an existing backend; config is never saved
    pub fn with_backend(auth: Box<dyn AuthBackendTrait>, config: TuiConfig) -> Self {
        let mut app = Self {
            state: AppState::default(),
            auth,
            config,
            status_message: None,
            persist_config: false,
            quit: false,
        };
        app.state.form = app.form_for(View::Login);
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Whether a shake is in progress (drives fast redraws)
    pub fn is_animating(&self) -> bool {
        self.state.shake.is_some()
    }

    /// Clear the shake once its duration has passed
    pub fn update_shake(&mut self) {
        if let Some(ref shake) = self.state.shake {
            if shake.is_expired() {
                self.state.shake = None;
            }
        }
    }

    /// Start the shake, or restart it if one is still running
    fn trigger_shake(&mut self) {
        match self.state.shake.as_mut() {
            Some(shake) => shake.rearm(),
            None => self.state.shake = Some(ShakeState::new(self.config.shake_duration())),
        }
        tracing::debug!("Shaking {:?} form", self.state.current_view);
    }

    /// Fresh form state for a view
    fn form_for(&self, view: View) -> FormState {
        match view {
            View::Login => FormState::Login(LoginForm::with_username(
                self.config.last_username.as_deref().unwrap_or_default(),
            )),
            View::Register => FormState::Register(RegisterForm::new()),
            View::Profile => match &self.state.session {
                Some(account) => FormState::Profile(ProfileForm::from_account(account)),
                None => FormState::None,
            },
            View::Dashboard => FormState::None,
        }
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        let view = if view.is_guest_view() && self.state.is_signed_in() {
            View::Dashboard
        } else if !view.is_guest_view() && !self.state.is_signed_in() {
            View::Login
        } else {
            view
        };
        if view == self.state.current_view {
            return;
        }
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
        self.state.clear_form();
        self.state.form = self.form_for(view);
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        while let Some(view) = self.state.view_history.pop() {
            // Skip views the session no longer allows
            if view.is_guest_view() == self.state.is_signed_in() {
                continue;
            }
            self.state.current_view = view;
            self.state.clear_form();
            self.state.form = self.form_for(view);
            return;
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::Login => self.handle_login_key(key).await?,
            View::Register => self.handle_register_key(key).await?,
            View::Dashboard => self.handle_dashboard_key(key),
            View::Profile => self.handle_profile_key(key).await?,
        }
        Ok(())
    }

    /// Keys shared by every form view. Returns true if the key was consumed.
    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab if self.state.form.as_form().is_some() => {
                self.state.form.next_field();
                return true;
            }
            KeyCode::BackTab if self.state.form.as_form().is_some() => {
                self.state.form.prev_field();
                return true;
            }
            _ => {}
        }
        let Some(form) = self.state.form.as_form_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.toggle_active_visibility();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                form.input_char(c);
            }
            KeyCode::Backspace => form.backspace(),
            _ => return false,
        }
        true
    }

    /// Validate the current form; shake it and return false if it is invalid
    fn validate_current_form(&mut self) -> bool {
        let outcome = match self.state.form.as_form_mut() {
            Some(form) => form.submit(),
            None => return false,
        };
        match outcome {
            SubmitOutcome::Accepted => true,
            SubmitOutcome::Blocked { invalid } => {
                tracing::debug!(
                    "Submit of {:?} blocked, invalid fields: {}",
                    self.state.current_view,
                    invalid.join(", ")
                );
                self.trigger_shake();
                false
            }
        }
    }

    /// Handle keys in Login view
    async fn handle_login_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Enter => self.submit_login().await,
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.navigate(View::Register);
            }
            _ => {
                self.handle_form_key(key);
            }
        }
        Ok(())
    }

    /// Handle keys in Register view
    async fn handle_register_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => self.submit_register().await,
            _ => {
                self.handle_form_key(key);
            }
        }
        Ok(())
    }

    /// Handle keys in Profile view
    async fn handle_profile_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => self.submit_profile().await,
            _ => {
                self.handle_form_key(key);
            }
        }
        Ok(())
    }

    /// Handle keys in Dashboard view
    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('p') => self.navigate(View::Profile),
            KeyCode::Char('l') => self.logout(),
            _ => {}
        }
    }

    /// Validate and send the login form
    async fn submit_login(&mut self) {
        if !self.validate_current_form() {
            return;
        }
        let FormState::Login(form) = &self.state.form else {
            return;
        };
        let username = form.username.as_text().to_string();
        let password = form.password.as_text().to_string();

        match self.auth.authenticate(&username, &password).await {
            Ok(account) => {
                tracing::info!("User {} signed in", account.username);
                self.remember_username(&account.username);
                self.state.session = Some(account);
                self.state.view_history.clear();
                self.navigate(View::Dashboard);
                self.status_message = Some("Login successful".to_string());
            }
            Err(e) => {
                tracing::warn!("Sign-in failed for {username}: {e}");
                self.push_error(e.to_string());
            }
        }
    }

    /// Validate and send the registration form
    async fn submit_register(&mut self) {
        if !self.validate_current_form() {
            return;
        }
        let FormState::Register(form) = &self.state.form else {
            return;
        };
        let registration = Registration {
            username: form.username.as_text().to_string(),
            email: form.email.as_text().to_string(),
            password1: form.password1.as_text().to_string(),
            password2: form.password2.as_text().to_string(),
        };

        match self.auth.register(registration).await {
            Ok(account) => {
                tracing::info!("Registered user {}", account.username);
                self.state.view_history.clear();
                self.state.current_view = View::Login;
                self.state.clear_form();
                self.state.form = FormState::Login(LoginForm::with_username(&account.username));
                self.status_message = Some("Registration successful, please log in".to_string());
            }
            Err(e) => {
                tracing::warn!("Registration refused: {e}");
                self.push_error(format!("Registration failed: {e}"));
            }
        }
    }

    /// Validate and send the profile form
    async fn submit_profile(&mut self) {
        if !self.validate_current_form() {
            return;
        }
        let Some(id) = self.state.session.as_ref().map(|a| a.id) else {
            self.push_error("Not signed in");
            return;
        };
        let FormState::Profile(form) = &self.state.form else {
            return;
        };
        let update = ProfileUpdate {
            username: form.username.as_text().to_string(),
            email: form.email.as_text().to_string(),
            phone: form.phone.as_text().to_string(),
        };

        match self.auth.update_profile(id, update).await {
            Ok(account) => {
                tracing::info!("Profile of {} updated", account.username);
                self.state.session = Some(account);
                self.go_back();
                self.status_message = Some("Profile updated".to_string());
            }
            Err(e) => {
                tracing::warn!("Profile update refused: {e}");
                self.push_error(format!("Update failed: {e}"));
            }
        }
    }

    /// End the session and return to the login form
    pub fn logout(&mut self) {
        if let Some(account) = self.state.session.take() {
            tracing::info!("User {} signed out", account.username);
        }
        self.state.view_history.clear();
        self.navigate(View::Login);
        self.status_message = Some("Logged out".to_string());
    }

    fn remember_username(&mut self, username: &str) {
        self.config.last_username = Some(username.to_string());
        if self.persist_config {
            if let Err(e) = self.config.save() {
                tracing::warn!("Failed to save config: {e}");
            }
        }
    }
}
