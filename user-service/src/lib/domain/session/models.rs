use chrono::Duration;

use crate::user::models::UserProfile;

/// Lifetimes of the three token flavors the session service issues.
#[derive(Debug, Clone, Copy)]
pub struct TokenLifetimes {
    /// Tokens issued at login; `None` issues tokens without expiry
    pub access: Option<Duration>,
    /// Tokens issued by a successful refresh
    pub refresh: Duration,
    /// Sentinel written on logout
    pub revoke: Duration,
}

/// Identity recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub subject: String,
    pub username: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: UserProfile,
    pub token: String,
}
