//! The login gate for the simulated storefront users.
//!
//! One shared password, six recognized usernames, one of which can never log
//! in. This layer is independent of the credential the process uses against
//! the hosted backend - that one gates data access, this one gates screens.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::Identity;
use crate::profile::BehaviorProfile;

/// The shared password accepted for every recognized identity.
pub const SHARED_SECRET: &str = "secret_sauce";

/// Errors that can occur during the simulated login.
///
/// Display strings are the exact inline messages the login screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Username not in the recognized set. Checked before the password.
    #[error("Username is invalid")]
    UnknownIdentity,

    /// Password does not match the shared secret.
    #[error("Password is incorrect")]
    WrongSecret,

    /// The designated locked identity. Checked after the password, so a
    /// locked user with a wrong password still sees the password error.
    #[error("User is locked out.")]
    AccountLocked,
}

/// An authenticated session: the identity plus its derived profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    identity: Identity,
}

impl Session {
    #[must_use]
    pub const fn identity(&self) -> Identity {
        self.identity
    }

    /// The behavior profile for this session, derived fresh on every call.
    #[must_use]
    pub const fn profile(&self) -> BehaviorProfile {
        BehaviorProfile::new(self.identity.profile_kind())
    }
}

/// Validate a username/password pair against the fixed identity set.
///
/// # Errors
///
/// - [`AuthError::UnknownIdentity`] if the username is not recognized
/// - [`AuthError::WrongSecret`] if the password is not the shared secret
/// - [`AuthError::AccountLocked`] for the locked identity (after the secret
///   check)
pub fn authenticate(username: &str, password: &str) -> Result<Session, AuthError> {
    let identity = Identity::parse(username).ok_or(AuthError::UnknownIdentity)?;

    if password != SHARED_SECRET {
        return Err(AuthError::WrongSecret);
    }

    if identity == Identity::LockedOutUser {
        return Err(AuthError::AccountLocked);
    }

    Ok(Session { identity })
}

/// The session slot: zero or one live session at a time.
///
/// An explicit context object with a defined lifecycle - created at process
/// start, reset on logout or a store reset. Callers must re-check
/// [`AuthState::is_authenticated`] on every navigation instead of caching the
/// answer across a logout.
#[derive(Debug, Default)]
pub struct AuthState {
    session: Option<Session>,
}

impl AuthState {
    #[must_use]
    pub const fn new() -> Self {
        Self { session: None }
    }

    /// Attempt a login. A failed attempt leaves any prior session untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`authenticate`] failures.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Session, AuthError> {
        let session = authenticate(username, password)?;
        self.session = Some(session);
        Ok(session)
    }

    /// Destroy the session. Idempotent; logging out twice is not an error.
    pub fn logout(&mut self) {
        self.session = None;
    }

    /// Whether a live session exists right now.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The live session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<Session> {
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ProfileKind;

    #[test]
    fn test_every_unlocked_identity_logs_in() {
        for identity in Identity::ALL {
            let result = authenticate(identity.as_str(), SHARED_SECRET);
            if identity == Identity::LockedOutUser {
                assert_eq!(result, Err(AuthError::AccountLocked));
            } else {
                let session = result.expect("login should succeed");
                assert_eq!(session.identity(), identity);
                assert_eq!(
                    session.profile().kind(),
                    identity.profile_kind(),
                    "profile mapping for {identity}"
                );
            }
        }
    }

    #[test]
    fn test_wrong_secret_fails_for_all_recognized() {
        for identity in Identity::ALL {
            assert_eq!(
                authenticate(identity.as_str(), "wrong_pw"),
                Err(AuthError::WrongSecret)
            );
        }
    }

    #[test]
    fn test_unknown_identity_checked_first() {
        assert_eq!(
            authenticate("any_user", SHARED_SECRET),
            Err(AuthError::UnknownIdentity)
        );
        assert_eq!(
            authenticate("any_user", "wrong_pw"),
            Err(AuthError::UnknownIdentity)
        );
    }

    #[test]
    fn test_locked_user_with_wrong_secret_sees_password_error() {
        assert_eq!(
            authenticate("locked_out_user", "wrong_pw"),
            Err(AuthError::WrongSecret)
        );
    }

    #[test]
    fn test_standard_scenario() {
        let mut auth = AuthState::new();
        let session = auth.login("standard_user", "secret_sauce").expect("login");
        assert_eq!(session.profile().kind(), ProfileKind::Standard);
        assert!(auth.is_authenticated());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let mut auth = AuthState::new();
        auth.login("visual_user", SHARED_SECRET).expect("login");
        auth.logout();
        assert!(!auth.is_authenticated());
        auth.logout();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.session(), None);
    }

    #[test]
    fn test_failed_login_keeps_prior_session() {
        let mut auth = AuthState::new();
        auth.login("standard_user", SHARED_SECRET).expect("login");
        assert!(auth.login("standard_user", "nope").is_err());
        assert!(auth.is_authenticated());
    }

    #[test]
    fn test_error_messages_match_login_screen() {
        assert_eq!(AuthError::UnknownIdentity.to_string(), "Username is invalid");
        assert_eq!(AuthError::WrongSecret.to_string(), "Password is incorrect");
        assert_eq!(AuthError::AccountLocked.to_string(), "User is locked out.");
    }
}
