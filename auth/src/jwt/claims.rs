use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Payload carried by every issued token.
///
/// `exp` is omitted when the token was issued without a lifetime, in which case the
/// codec never rejects it for age.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Login name of the subject
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Create claims for a user, issued now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Login name
    /// * `ttl` - Lifetime of the token; `None` issues a token without `exp`
    pub fn for_user(user_id: impl ToString, username: impl ToString, ttl: Option<Duration>) -> Self {
        Self::issued_at(user_id, username, Utc::now(), ttl)
    }

    /// Create claims for a user with an explicit issuance time.
    pub fn issued_at(
        user_id: impl ToString,
        username: impl ToString,
        now: DateTime<Utc>,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: ttl.map(|ttl| (now + ttl).timestamp()),
            jti: Uuid::new_v4().to_string(),
        }
    }
}
