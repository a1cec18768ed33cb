//! Credential primitives library
//!
//! Provides the stateless building blocks of the session lifecycle:
//! - Password hashing and constant-time verification (Argon2id)
//! - Signed, optionally expiring bearer tokens (JWT, HS256)
//!
//! Services define their own ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::JwtCodec;
//! use chrono::Duration;
//!
//! let codec = JwtCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue("user123", "alice", Some(Duration::hours(1))).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! assert_eq!(claims.username, "alice");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtCodec;
pub use jwt::JwtError;
pub use password::PasswordError;
pub use password::PasswordHasher;
