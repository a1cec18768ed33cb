use async_trait::async_trait;
use chrono::Duration;

use crate::session::errors::TokenError;
use crate::session::models::AuthenticatedSession;
use crate::session::models::TokenSubject;
use crate::user::errors::UserError;
use crate::user::models::UserId;
use crate::user::models::UserProfile;
use crate::user::models::Username;

/// Signs and verifies bearer tokens bound to a user.
///
/// The signing key is fixed when the implementation is constructed.
pub trait TokenCodec: Send + Sync + 'static {
    /// Issue a token for a user.
    ///
    /// # Arguments
    /// * `id` - Subject of the token
    /// * `username` - Login name carried alongside the subject
    /// * `ttl` - Lifetime; `None` issues a token the codec never expires
    fn issue(
        &self,
        id: &UserId,
        username: &Username,
        ttl: Option<Duration>,
    ) -> Result<String, TokenError>;

    /// Verify signature and expiry.
    fn verify(&self, token: &str) -> Result<TokenSubject, TokenError>;
}

/// Port for the credential lifecycle: login, rotation, revocation and
/// per-request bearer validation.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Authenticate with username and password and open a session.
    ///
    /// # Returns
    /// Sanitized profile and the token now stored as the user's session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `Internal` - The session token was not persisted
    async fn login(&self, username: &str, password: &str)
        -> Result<AuthenticatedSession, UserError>;

    /// Exchange the current session token for a new one.
    ///
    /// The presented token is unusable once this succeeds.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is forged, expired, or no longer held by any user
    async fn refresh(&self, old_token: &str) -> Result<String, UserError>;

    /// Revoke the user's session by overwriting it with a short-lived sentinel.
    ///
    /// Idempotent.
    ///
    /// # Errors
    /// * `Internal` - The sentinel was not persisted
    async fn logout(&self, user: &UserProfile) -> Result<bool, UserError>;

    /// Authenticate a bearer token presented on a request.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, subject unknown, or the session was revoked
    async fn validate_bearer(&self, token: &str) -> Result<UserProfile, UserError>;
}
