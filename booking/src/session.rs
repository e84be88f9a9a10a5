//! Signed-in user session.
//!
//! The session is an explicit object handed to the wizard through its
//! environment. Nothing here is global: tests build their own session and
//! sign users in and out as needed.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Unique identifier for a user account
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random `UserId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `UserId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The signed-in user as seen by the booking flow
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Contact email for the reservation receipt
    pub email: String,
}

impl UserProfile {
    /// Creates a profile with a fresh id
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Source of the current user
pub trait SessionProvider: Send + Sync {
    /// The signed-in user, if any
    fn current_user(&self) -> Option<UserProfile>;

    /// Returns `true` when a user is signed in
    fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }
}

/// In-memory session shared between the UI shell and the wizard
///
/// Clones share the same underlying session.
#[derive(Clone, Debug, Default)]
pub struct InMemorySession {
    user: Arc<RwLock<Option<UserProfile>>>,
}

impl InMemorySession {
    /// Creates a signed-out session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with `user` already signed in
    #[must_use]
    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            user: Arc::new(RwLock::new(Some(user))),
        }
    }

    /// Signs `user` in, replacing any previous user
    pub fn sign_in(&self, user: UserProfile) {
        tracing::debug!(user_id = %user.id, "Session signed in");
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    /// Signs the current user out
    pub fn sign_out(&self) {
        tracing::debug!("Session signed out");
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl SessionProvider for InMemorySession {
    fn current_user(&self) -> Option<UserProfile> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_signed_out() {
        let session = InMemorySession::new();
        assert!(!session.is_signed_in());
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn clones_observe_sign_in_and_out() {
        let session = InMemorySession::new();
        let shared = session.clone();
        let user = UserProfile::new("Min", "min@example.com");

        session.sign_in(user.clone());
        assert_eq!(shared.current_user(), Some(user));

        shared.sign_out();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn signed_in_constructor() {
        let user = UserProfile::new("Jae", "jae@example.com");
        let session = InMemorySession::signed_in(user.clone());
        assert_eq!(session.current_user().map(|u| u.id), Some(user.id));
    }
}
