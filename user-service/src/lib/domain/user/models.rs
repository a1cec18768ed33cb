use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::NameError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Carries the password hash; only the login path ever loads it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: Name,
    pub username: Username,
    pub password_hash: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Sanitized projection of this user.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
            refresh_token: self.refresh_token.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User projection without the password hash.
///
/// Returned by every general lookup and stored in the user cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: Name,
    pub username: Username,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }

    /// Key of this user's entry in the user cache.
    pub fn cache_key(&self) -> String {
        format!("User-{}", self.0)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Login key: 3-50 characters, alphanumeric, underscore, and hyphen. Case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 50 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    const MAX_LENGTH: usize = 50;

    /// Create a new display name from trimmed input.
    ///
    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - Name longer than 50 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: Name,
    pub username: Username,
    pub password: String,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `name` - Validated display name
    /// * `username` - Validated username
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(name: Name, username: Username, password: String) -> Self {
        Self {
            name,
            username,
            password,
        }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields will be updated. A provided password is re-hashed.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub name: Option<Name>,
    pub username: Option<Username>,
    pub password: Option<String>,
}

/// Partial field set written by `UserRepository::update`.
///
/// `refresh_token: Some(None)` clears the stored session token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<Name>,
    pub username: Option<Username>,
    pub password_hash: Option<String>,
    pub refresh_token: Option<Option<String>>,
}

impl UserChanges {
    /// Change set that only replaces the stored session token.
    pub fn refresh_token(token: String) -> Self {
        Self {
            refresh_token: Some(Some(token)),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.password_hash.is_none()
            && self.refresh_token.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(Username::new("bob".to_string()).is_ok());
        assert!(Username::new("Bob_the-2nd".to_string()).is_ok());

        assert_eq!(
            Username::new("bo".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
        assert_eq!(
            Username::new("a".repeat(51)),
            Err(UsernameError::TooLong {
                max: 50,
                actual: 51
            })
        );
        assert_eq!(
            Username::new("bob smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_username_is_case_sensitive() {
        let lower = Username::new("bob".to_string()).unwrap();
        let upper = Username::new("Bob".to_string()).unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(Name::new("  Bob  ".to_string()).unwrap().as_str(), "Bob");
        assert_eq!(Name::new("   ".to_string()), Err(NameError::Empty));
        assert!(matches!(
            Name::new("x".repeat(51)),
            Err(NameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_cache_key() {
        let id = UserId::from_string("7f1b2c3d-0000-4000-8000-000000000001").unwrap();
        assert_eq!(id.cache_key(), "User-7f1b2c3d-0000-4000-8000-000000000001");
    }

    #[test]
    fn test_profile_drops_password_hash() {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: Name::new("Bob".to_string()).unwrap(),
            username: Username::new("bob".to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            refresh_token: Some("token".to_string()),
            created_at: now,
            updated_at: now,
        };

        let profile = user.profile();
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.refresh_token.as_deref(), Some("token"));
    }
}
