//! Authentication state for the current page lifetime.

use crate::core::model::{Role, User};

/// `user` is only ever set after the token was verified against `/auth/me`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// A token read back from storage; not yet verified.
    pub fn restored(token: Option<String>) -> Self {
        Self { token, user: None }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role().map(Role::is_admin).unwrap_or(false)
    }

    pub fn is_verified(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// A freshly issued token replaces any previous identity until verified again.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
        self.user = None;
    }

    pub fn verified(&mut self, user: User) {
        debug_assert!(self.token.is_some(), "verified without a token");
        self.user = Some(user);
    }
}
