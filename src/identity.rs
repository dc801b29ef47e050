//! Identity of the acting user, as yielded by an external identity provider.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use tracing::info;

use crate::model::User;

/// Anything that can say who is currently signed in.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;
}

/// Holds the signed-in user. Clones share the same session.
///
/// Credentials and account creation belong to the identity provider; the
/// session only records the `(id, name)` pair it hands back.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Arc<RwLock<Option<User>>>,
}

impl Session {
    /// Create a signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session already signed in as `user`.
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Arc::new(RwLock::new(Some(user))),
        }
    }

    pub fn sign_in(&self, id: impl Into<String>, name: impl Into<String>) {
        let user = User::new(id, name);
        info!(user_id = %user.id, "signed in");
        *self.write() = Some(user);
    }

    pub fn sign_out(&self) {
        if let Some(user) = self.write().take() {
            info!(user_id = %user.id, "signed out");
        }
    }

    /// Update the display name of the signed-in user. No-op when signed out.
    pub fn rename(&self, name: impl Into<String>) {
        if let Some(user) = self.write().as_mut() {
            user.name = name.into();
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }

    // Every write swaps or edits one value, so a poisoned guard is still sound.
    fn write(&self) -> RwLockWriteGuard<'_, Option<User>> {
        self.user.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IdentityProvider for Session {
    fn current_user(&self) -> Option<User> {
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
    fn empty_session() {
        let session = Session::new();
        assert_eq!(session.current_user(), None);
        assert!(!session.is_signed_in());
    }

    #[test]
    fn sign_in_rename_sign_out() {
        let session = Session::new();
        session.sign_in("user-42", "Jamie");
        assert_eq!(session.current_user(), Some(User::new("user-42", "Jamie")));

        let shared = session.clone();
        shared.rename("Jamie Harris");
        assert_eq!(
            session.current_user().map(|u| u.name),
            Some("Jamie Harris".to_string())
        );

        session.sign_out();
        assert!(!shared.is_signed_in());
        shared.rename("nobody");
        assert_eq!(shared.current_user(), None);
    }

    #[test]
    fn session_survives_a_poisoned_lock() {
        let session = Session::signed_in(User::new("user-1", "Before"));
        let shared = session.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.user.write().unwrap();
            panic!("panicked while holding the session");
        })
        .join();
        assert!(session.user.is_poisoned());

        assert_eq!(session.current_user(), Some(User::new("user-1", "Before")));
        session.sign_in("user-2", "After");
        assert_eq!(session.current_user(), Some(User::new("user-2", "After")));
        session.rename("Renamed");
        assert_eq!(session.current_user().map(|u| u.name), Some("Renamed".to_string()));
        session.sign_out();
        assert!(!session.is_signed_in());
    }
}
