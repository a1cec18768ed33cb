use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::user::models::Name;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::Username;
use crate::user::errors::CacheError;
use crate::user::errors::UserError;
use crate::user::ports::UserCache;
use crate::user::ports::UserRepository;

/// Cache-aside reads and invalidation for user profiles.
///
/// Reads check the cache first and repopulate it from the repository on a miss.
/// Writes are followed by `invalidate`, which deletes the entry rather than
/// updating it. Cache faults are logged and never returned.
pub struct CachedUsers<UR, UC>
where
    UR: UserRepository,
    UC: UserCache,
{
    repository: Arc<UR>,
    cache: Arc<UC>,
}

impl<UR, UC> CachedUsers<UR, UC>
where
    UR: UserRepository,
    UC: UserCache,
{
    pub fn new(repository: Arc<UR>, cache: Arc<UC>) -> Self {
        Self { repository, cache }
    }

    pub fn repository(&self) -> &UR {
        &self.repository
    }

    /// Load a profile by id, cache first.
    pub async fn load(&self, id: &UserId) -> Result<Option<UserProfile>, UserError> {
        let key = id.cache_key();

        match self.cached(&key).await {
            Ok(Some(profile)) => {
                tracing::debug!(user_id = %id, "User cache hit");
                return Ok(Some(profile));
            }
            Ok(None) => tracing::debug!(user_id = %id, "User cache miss"),
            Err(CacheError::CorruptEntry(reason)) => {
                tracing::warn!(user_id = %id, reason = %reason, "Discarding corrupt cache entry");
                self.invalidate(id).await;
            }
            Err(e) => tracing::warn!(user_id = %id, error = %e, "User cache read failed"),
        }

        let profile = self.repository.find_by_id(id).await?;

        if let Some(profile) = &profile {
            self.populate(&key, profile).await;
        }

        Ok(profile)
    }

    /// Delete the cached entry for a user after a committed write.
    pub async fn invalidate(&self, id: &UserId) {
        if let Err(e) = self.cache.del(&id.cache_key()).await {
            tracing::warn!(user_id = %id, error = %e, "User cache invalidation failed");
        }
    }

    /// Drop every cached entry.
    pub async fn reset(&self) {
        if let Err(e) = self.cache.reset_all().await {
            tracing::warn!(error = %e, "User cache reset failed");
        }
    }

    async fn cached(&self, key: &str) -> Result<Option<UserProfile>, CacheError> {
        match self.cache.get(key).await? {
            Some(raw) => {
                let entry: CachedUser = serde_json::from_str(&raw)
                    .map_err(|e| CacheError::CorruptEntry(e.to_string()))?;
                entry.try_into().map(Some)
            }
            None => Ok(None),
        }
    }

    async fn populate(&self, key: &str, profile: &UserProfile) {
        let raw = match serde_json::to_string(&CachedUser::from(profile)) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(user_id = %profile.id, error = %e, "User cache serialization failed");
                return;
            }
        };

        if let Err(e) = self.cache.set(key, raw).await {
            tracing::warn!(user_id = %profile.id, error = %e, "User cache write failed");
        }
    }
}

/// JSON snapshot of a profile as stored in the cache.
#[derive(Debug, Serialize, Deserialize)]
struct CachedUser {
    id: Uuid,
    name: String,
    username: String,
    refresh_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&UserProfile> for CachedUser {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.0,
            name: profile.name.as_str().to_string(),
            username: profile.username.as_str().to_string(),
            refresh_token: profile.refresh_token.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl TryFrom<CachedUser> for UserProfile {
    type Error = CacheError;

    fn try_from(entry: CachedUser) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId(entry.id),
            name: Name::new(entry.name).map_err(|e| CacheError::CorruptEntry(e.to_string()))?,
            username: Username::new(entry.username)
                .map_err(|e| CacheError::CorruptEntry(e.to_string()))?,
            refresh_token: entry.refresh_token,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        })
    }
}
