//! Client Session State
//!
//! The per-client record of "who is logged in, with what role". All
//! reads of login state go through this context; nothing in the client
//! touches the storage keys ad hoc. There is no expiry and no server
//! revalidation: a store that carries the keys is trusted as-is.
//!
//! Lifecycle: `load` rehydrates from durable storage at startup,
//! `sign_in` persists a successful login, `sign_out` clears everything
//! including the cached profile image.

use rhythmpulse_core::{AuthenticatedUser, Role};

use crate::error::Result;
use crate::kv::LocalStore;

/// Durable storage keys shared with earlier clients
pub mod keys {
    pub const USER_EMAIL: &str = "userEmail";
    pub const USER_FIRST_NAME: &str = "userFirstName";
    pub const USER_LAST_NAME: &str = "userLastName";
    pub const USER_ROLE: &str = "userRole";
    pub const PROFILE_IMAGE: &str = "profileImage";
    pub const SIGNUP_SUCCESS_MESSAGE: &str = "signupSuccessMessage";
}

/// Session context over a durable store
pub struct SessionContext<'a> {
    store: &'a LocalStore,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    role: Role,
}

impl<'a> SessionContext<'a> {
    /// Rehydrate session state from durable storage.
    ///
    /// A client is logged in exactly when the email key is present.
    pub fn load(store: &'a LocalStore) -> Result<Self> {
        let email = store.get(keys::USER_EMAIL)?;
        let first_name = store.get(keys::USER_FIRST_NAME)?;
        let last_name = store.get(keys::USER_LAST_NAME)?;
        let role = match store.get(keys::USER_ROLE)?.as_deref() {
            Some("admin") => Role::Admin,
            _ => Role::User,
        };

        Ok(Self {
            store,
            email,
            first_name,
            last_name,
            role,
        })
    }

    /// Record a successful login
    pub fn sign_in(&mut self, user: &AuthenticatedUser) -> Result<()> {
        self.store.set(keys::USER_EMAIL, &user.email)?;
        self.store.set(keys::USER_FIRST_NAME, &user.first_name)?;
        self.store.set(keys::USER_LAST_NAME, &user.last_name)?;
        self.store.set(keys::USER_ROLE, user.role.as_str())?;

        self.email = Some(user.email.clone());
        self.first_name = Some(user.first_name.clone());
        self.last_name = Some(user.last_name.clone());
        self.role = user.role;
        Ok(())
    }

    /// Clear identity keys and cached profile fields
    pub fn sign_out(&mut self) -> Result<()> {
        self.store.remove(keys::USER_EMAIL)?;
        self.store.remove(keys::USER_FIRST_NAME)?;
        self.store.remove(keys::USER_LAST_NAME)?;
        self.store.remove(keys::USER_ROLE)?;
        self.store.remove(keys::PROFILE_IMAGE)?;

        self.email = None;
        self.first_name = None;
        self.last_name = None;
        self.role = Role::User;
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.email.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.is_logged_in() && self.role == Role::Admin
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Cache a profile picture as a data URI
    pub fn set_profile_image(&self, data_uri: &str) -> Result<()> {
        self.store.set(keys::PROFILE_IMAGE, data_uri)
    }

    pub fn profile_image(&self) -> Result<Option<String>> {
        self.store.get(keys::PROFILE_IMAGE)
    }

    /// Leave a message for the next page view (shown once after signup)
    pub fn set_signup_message(&self, message: &str) -> Result<()> {
        self.store.set(keys::SIGNUP_SUCCESS_MESSAGE, message)
    }

    /// Consume the one-shot signup message, clearing it
    pub fn take_signup_message(&self) -> Result<Option<String>> {
        self.store.take(keys::SIGNUP_SUCCESS_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role,
        }
    }

    #[test]
    fn test_fresh_store_is_logged_out() {
        let store = LocalStore::open_in_memory().unwrap();
        let session = SessionContext::load(&store).unwrap();
        assert!(!session.is_logged_in());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_sign_in_rehydrates_in_fresh_context() {
        let store = LocalStore::open_in_memory().unwrap();

        let mut session = SessionContext::load(&store).unwrap();
        session.sign_in(&ada(Role::Admin)).unwrap();
        assert!(session.is_logged_in());
        assert!(session.is_admin());

        // A brand-new context over the same store sees the login
        let rehydrated = SessionContext::load(&store).unwrap();
        assert!(rehydrated.is_logged_in());
        assert!(rehydrated.is_admin());
        assert_eq!(rehydrated.email(), Some("ada@example.com"));
        assert_eq!(rehydrated.first_name(), Some("Ada"));
    }

    #[test]
    fn test_sign_out_clears_everything() {
        let store = LocalStore::open_in_memory().unwrap();

        let mut session = SessionContext::load(&store).unwrap();
        session.sign_in(&ada(Role::User)).unwrap();
        session.set_profile_image("data:image/png;base64,AAAA").unwrap();

        session.sign_out().unwrap();
        assert!(!session.is_logged_in());
        assert!(session.profile_image().unwrap().is_none());

        let rehydrated = SessionContext::load(&store).unwrap();
        assert!(!rehydrated.is_logged_in());
        assert_eq!(rehydrated.role(), Role::User);
    }

    #[test]
    fn test_signup_message_is_consumed_once() {
        let store = LocalStore::open_in_memory().unwrap();
        let session = SessionContext::load(&store).unwrap();

        session
            .set_signup_message("Registration successful! Please login.")
            .unwrap();
        assert_eq!(
            session.take_signup_message().unwrap().as_deref(),
            Some("Registration successful! Please login.")
        );
        assert!(session.take_signup_message().unwrap().is_none());
    }

    #[test]
    fn test_manually_written_keys_are_trusted() {
        // No server revalidation: storage keys alone decide the state
        let store = LocalStore::open_in_memory().unwrap();
        store.set(keys::USER_EMAIL, "anyone@example.com").unwrap();
        store.set(keys::USER_ROLE, "admin").unwrap();

        let session = SessionContext::load(&store).unwrap();
        assert!(session.is_logged_in());
        assert!(session.is_admin());
    }
}
