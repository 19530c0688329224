//! Login page state: email/password with a sign-in / sign-up toggle.

use site_auth::{AuthError, SessionGate};

use crate::navigation::Navigation;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

impl LoginMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    #[must_use]
    pub const fn action_label(self) -> &'static str {
        match self {
            Self::SignIn => "Login",
            Self::SignUp => "Create account",
        }
    }
}

#[derive(Debug, Default)]
pub struct LoginForm {
    mode: LoginMode,
    email: String,
    password: String,
    error: Option<String>,
}

impl LoginForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn mode(&self) -> LoginMode {
        self.mode
    }

    pub const fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sign in or create the account, then route to the signed-in user's
    /// dashboard. The password is cleared on success; the email is kept on
    /// failure so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns the gate's `AuthError`; the message is also kept in
    /// [`Self::error`].
    pub async fn submit(&mut self, gate: &SessionGate) -> Result<Navigation, AuthError> {
        let result = match self.mode {
            LoginMode::SignIn => gate.sign_in(&self.email, &self.password).await,
            LoginMode::SignUp => gate.sign_up(&self.email, &self.password).await,
        };
        match result {
            Ok(identity) => {
                self.password.clear();
                self.error = None;
                Ok(Navigation::dashboard_for(identity.display_name()))
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }
}
