//! Port implementations for the `auth` crate primitives.

use auth::JwtCodec;
use auth::PasswordHasher;
use chrono::Duration;

use crate::session::errors::TokenError;
use crate::session::models::TokenSubject;
use crate::session::ports::TokenCodec;
use crate::user::errors::PasswordError;
use crate::user::models::UserId;
use crate::user::models::Username;
use crate::user::ports::CredentialVerifier;

impl CredentialVerifier for PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        PasswordHasher::hash(self, plaintext).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        PasswordHasher::verify(self, plaintext, hash)
    }

    fn verify_decoy(&self, plaintext: &str) {
        PasswordHasher::verify_decoy(self, plaintext)
    }
}

impl TokenCodec for JwtCodec {
    fn issue(
        &self,
        id: &UserId,
        username: &Username,
        ttl: Option<Duration>,
    ) -> Result<String, TokenError> {
        JwtCodec::issue(self, &id.to_string(), username.as_str(), ttl)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenSubject, TokenError> {
        JwtCodec::verify(self, token)
            .map(|claims| TokenSubject {
                subject: claims.sub,
                username: claims.username,
            })
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}
