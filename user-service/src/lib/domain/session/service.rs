use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::cache_aside::CachedUsers;
use crate::session::models::AuthenticatedSession;
use crate::session::models::TokenLifetimes;
use crate::session::ports::SessionServicePort;
use crate::session::ports::TokenCodec;
use crate::user::errors::UserError;
use crate::user::models::UserChanges;
use crate::user::models::UserId;
use crate::user::models::UserProfile;
use crate::user::models::Username;
use crate::user::ports::CredentialVerifier;
use crate::user::ports::UserCache;
use crate::user::ports::UserRepository;

/// Session lifecycle over the user's single stored session token.
///
/// Each login or refresh overwrites the stored token, so at most one session
/// per user is live. Logout overwrites it with a sentinel that expires almost
/// immediately.
pub struct SessionService<UR, UC, CV, TC>
where
    UR: UserRepository,
    UC: UserCache,
    CV: CredentialVerifier,
    TC: TokenCodec,
{
    users: CachedUsers<UR, UC>,
    verifier: Arc<CV>,
    codec: Arc<TC>,
    lifetimes: TokenLifetimes,
}

impl<UR, UC, CV, TC> SessionService<UR, UC, CV, TC>
where
    UR: UserRepository,
    UC: UserCache,
    CV: CredentialVerifier,
    TC: TokenCodec,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `cache` - Profile cache placed in front of the repository
    /// * `verifier` - Password verification implementation
    /// * `codec` - Token signing implementation
    /// * `lifetimes` - Lifetimes of access, refresh and revocation tokens
    pub fn new(
        repository: Arc<UR>,
        cache: Arc<UC>,
        verifier: Arc<CV>,
        codec: Arc<TC>,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            users: CachedUsers::new(repository, cache),
            verifier,
            codec,
            lifetimes,
        }
    }

    fn issue(
        &self,
        id: &UserId,
        username: &Username,
        ttl: Option<chrono::Duration>,
    ) -> Result<String, UserError> {
        self.codec
            .issue(id, username, ttl)
            .map_err(|e| UserError::Internal(e.to_string()))
    }

    /// Overwrite the stored session token and drop the cached profile.
    async fn store_token(&self, id: &UserId, token: String) -> Result<(), UserError> {
        let affected = self
            .users
            .repository()
            .update(id, UserChanges::refresh_token(token))
            .await?;

        if affected == 0 {
            return Err(UserError::Internal(format!(
                "session token of user {} was not persisted",
                id
            )));
        }

        self.users.invalidate(id).await;
        Ok(())
    }
}

#[async_trait]
impl<UR, UC, CV, TC> SessionServicePort for SessionService<UR, UC, CV, TC>
where
    UR: UserRepository,
    UC: UserCache,
    CV: CredentialVerifier,
    TC: TokenCodec,
{
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, UserError> {
        // Rejections without a stored hash still pay for one verification
        let Ok(username) = Username::new(username.to_string()) else {
            self.verifier.verify_decoy(password);
            tracing::debug!("Login rejected: malformed username");
            return Err(UserError::InvalidCredentials);
        };

        let Some(user) = self.users.repository().find_by_username(&username).await? else {
            self.verifier.verify_decoy(password);
            tracing::debug!(username = %username, "Login rejected: unknown username");
            return Err(UserError::InvalidCredentials);
        };

        if !self.verifier.verify(password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        let token = self.issue(&user.id, &user.username, self.lifetimes.access)?;
        self.store_token(&user.id, token.clone()).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        let mut profile = user.profile();
        profile.refresh_token = Some(token.clone());

        Ok(AuthenticatedSession {
            user: profile,
            token,
        })
    }

    async fn refresh(&self, old_token: &str) -> Result<String, UserError> {
        let subject = self.codec.verify(old_token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh rejected: token failed verification");
            UserError::Unauthorized
        })?;

        let repository = self.users.repository();

        let Some(holder) = repository.find_by_refresh_token(old_token).await? else {
            tracing::warn!(
                subject = %subject.subject,
                username = %subject.username,
                "Refresh rejected: token not held by any user"
            );
            return Err(UserError::Unauthorized);
        };

        if holder.id.to_string() != subject.subject {
            tracing::warn!(user_id = %holder.id, "Refresh rejected: subject mismatch");
            return Err(UserError::Unauthorized);
        }

        let next = self.issue(&holder.id, &holder.username, Some(self.lifetimes.refresh))?;

        // Conditional on the stored value still being `old_token`
        if !repository
            .swap_refresh_token(&holder.id, old_token, &next)
            .await?
        {
            tracing::warn!(user_id = %holder.id, "Refresh rejected: token rotated concurrently");
            return Err(UserError::Unauthorized);
        }

        self.users.invalidate(&holder.id).await;
        tracing::info!(user_id = %holder.id, "Session token rotated");

        Ok(next)
    }

    async fn logout(&self, user: &UserProfile) -> Result<bool, UserError> {
        let sentinel = self.issue(&user.id, &user.username, Some(self.lifetimes.revoke))?;
        self.store_token(&user.id, sentinel).await?;

        tracing::info!(user_id = %user.id, "User logged out");
        Ok(true)
    }

    async fn validate_bearer(&self, token: &str) -> Result<UserProfile, UserError> {
        let subject = self.codec.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer rejected: token failed verification");
            UserError::Unauthorized
        })?;

        let id = UserId::from_string(&subject.subject).map_err(|_| UserError::Unauthorized)?;

        // Read past the cache: a missed invalidation must not revive a revoked session
        let Some(profile) = self.users.repository().find_by_id(&id).await? else {
            tracing::debug!(user_id = %id, "Bearer rejected: unknown subject");
            return Err(UserError::Unauthorized);
        };

        // The bearer stays live only while the stored session token does
        let live = profile
            .refresh_token
            .as_deref()
            .is_some_and(|stored| self.codec.verify(stored).is_ok());

        if !live {
            tracing::debug!(user_id = %id, "Bearer rejected: session revoked or expired");
            return Err(UserError::Unauthorized);
        }

        Ok(profile)
    }
}
