use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::CacheError;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, username, and password
    ///
    /// # Returns
    /// Profile of the created user
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<UserProfile, UserError>;

    /// Retrieve user by unique identifier, served from the cache when possible.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<UserProfile, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<UserProfile, UserError>;

    /// Retrieve all users, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<UserProfile>, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Command with optional name, username, and password fields
    ///
    /// # Returns
    /// Fresh profile of the updated user
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `Internal` - The write did not persist
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<UserProfile, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
///
/// The durable store is the single source of truth for identity, password hash,
/// and the current session token.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve the sanitized projection of a user by identifier.
    ///
    /// # Returns
    /// Optional profile (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserError>;

    /// Retrieve the full user, including password hash, by username.
    ///
    /// Login path only.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve the user currently holding exactly this session token.
    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<UserProfile>, UserError>;

    /// Retrieve all users ordered by creation time.
    async fn list_all(&self) -> Result<Vec<UserProfile>, UserError>;

    /// Apply a partial change set.
    ///
    /// # Returns
    /// Number of rows affected (0 when the user does not exist)
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, id: &UserId, changes: UserChanges) -> Result<u64, UserError>;

    /// Replace the stored session token only if it still equals `current`.
    ///
    /// # Returns
    /// Whether the swap happened
    async fn swap_refresh_token(
        &self,
        id: &UserId,
        current: &str,
        next: &str,
    ) -> Result<bool, UserError>;

    /// Remove user from storage.
    ///
    /// # Returns
    /// Whether a record was removed
    async fn delete(&self, id: &UserId) -> Result<bool, UserError>;
}

/// String key-value cache in front of the user repository.
///
/// Not authoritative. Callers treat every error as a miss or ignore it.
#[async_trait]
pub trait UserCache: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError>;

    async fn del(&self, key: &str) -> Result<(), CacheError>;

    /// Drop every entry.
    async fn reset_all(&self) -> Result<(), CacheError>;
}

/// One-way password hashing with constant-time verification.
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// A mismatch is `false`, never an error.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;

    /// Spend the work of one `verify` without a stored hash to check against.
    fn verify_decoy(&self, plaintext: &str);
}
