use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Top-level error for account operations.
///
/// The Display strings of the rejection variants are the exact messages
/// returned to clients; they carry no internal detail.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("User with this email already exists.")]
    EmailAlreadyExists(String),

    /// Covers both "no account with this email" and "wrong password".
    /// The two are deliberately indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    // Infrastructure errors
    #[error("Store error: {0}")]
    StoreError(String),
}
