//! Login gate in front of the feature surface.

use crate::types::User;

/// Authentication state of the shell.
///
/// Credentials are never checked here: the authentication collaborator
/// signals success and the gate admits the configured user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthGate {
    #[default]
    LoggedOut,
    LoggedIn(User),
}

impl AuthGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, AuthGate::LoggedIn(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthGate::LoggedIn(user) => Some(user),
            AuthGate::LoggedOut => None,
        }
    }

    /// React to a successful login. Returns `false` if already logged in.
    pub fn on_login_success(&mut self, user: User) -> bool {
        if self.is_logged_in() {
            return false;
        }
        tracing::info!("User logged in: {}", user.email);
        *self = AuthGate::LoggedIn(user);
        true
    }

    /// Drop the user. Returns `false` if nobody was logged in.
    pub fn logout(&mut self) -> bool {
        match std::mem::take(self) {
            AuthGate::LoggedIn(user) => {
                tracing::info!("User logged out: {}", user.email);
                true
            }
            AuthGate::LoggedOut => false,
        }
    }
}
