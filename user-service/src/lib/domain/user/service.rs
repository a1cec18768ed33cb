use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::cache_aside::CachedUsers;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::CredentialVerifier;
use crate::user::ports::UserCache;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Reads by id go through the cache; every committed write invalidates the
/// affected entry.
pub struct UserService<UR, UC, CV>
where
    UR: UserRepository,
    UC: UserCache,
    CV: CredentialVerifier,
{
    users: CachedUsers<UR, UC>,
    verifier: Arc<CV>,
}

impl<UR, UC, CV> UserService<UR, UC, CV>
where
    UR: UserRepository,
    UC: UserCache,
    CV: CredentialVerifier,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `cache` - Profile cache placed in front of the repository
    /// * `verifier` - Password hashing implementation
    pub fn new(repository: Arc<UR>, cache: Arc<UC>, verifier: Arc<CV>) -> Self {
        Self {
            users: CachedUsers::new(repository, cache),
            verifier,
        }
    }
}

#[async_trait]
impl<UR, UC, CV> UserServicePort for UserService<UR, UC, CV>
where
    UR: UserRepository,
    UC: UserCache,
    CV: CredentialVerifier,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<UserProfile, UserError> {
        let repository = self.users.repository();

        if repository.find_by_username(&command.username).await?.is_some() {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self.verifier.hash(&command.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: command.name,
            username: command.username,
            password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };

        // The unique constraint still decides a race between two creates
        let created = repository.create(user).await?;
        tracing::info!(user_id = %created.id, username = %created.username, "User created");

        Ok(created.profile())
    }

    async fn get_user(&self, id: &UserId) -> Result<UserProfile, UserError> {
        self.users
            .load(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<UserProfile, UserError> {
        self.users
            .repository()
            .find_by_username(username)
            .await?
            .map(|user| user.profile())
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, UserError> {
        self.users.repository().list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<UserProfile, UserError> {
        let repository = self.users.repository();

        let existing = repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        let mut changes = UserChanges {
            name: command.name,
            username: command.username,
            ..UserChanges::default()
        };

        if let Some(new_password) = command.password {
            changes.password_hash = Some(self.verifier.hash(&new_password)?);
        }

        if changes.is_empty() {
            return Ok(existing);
        }

        let affected = repository.update(id, changes).await?;
        if affected == 0 {
            return Err(UserError::Internal(format!(
                "update of user {} was not persisted",
                id
            )));
        }

        self.users.invalidate(id).await;
        tracing::info!(user_id = %id, "User updated");

        repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        if !self.users.repository().delete(id).await? {
            return Err(UserError::NotFound(id.to_string()));
        }

        self.users.invalidate(id).await;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
