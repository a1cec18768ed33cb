use thiserror::Error;

/// Error for token issuance and verification.
///
/// Verification failures all collapse to `Unauthorized` at the service boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token encoding failed: {0}")]
    Encoding(String),

    #[error("Invalid token: {0}")]
    Invalid(String),
}
