use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

/// Role assumed in token claims when an account has no roles.
pub const DEFAULT_ROLE: &str = "ROLE_USER";

/// Account aggregate entity.
///
/// Represents a registered identity. The store assigns `id` and
/// `created_at` on creation; both are immutable afterwards.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_digest: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Role embedded in token claims: the first role label, or
    /// [`DEFAULT_ROLE`] when the account has none.
    pub fn primary_role(&self) -> &str {
        self.roles.first().map(String::as_str).unwrap_or(DEFAULT_ROLE)
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Record handed to the store to create an account.
///
/// Carries the already-hashed password digest; `id` and `created_at` are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_digest: String,
    pub roles: Vec<String>,
}

/// Command to register a new account, with the plaintext password still
/// to be hashed by the service.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub roles: Vec<String>,
}

/// Login credentials as submitted.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Outcome of a successful registration or login: the signed token and
/// the account's full role sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredentials {
    pub token: String,
    pub roles: Vec<String>,
}
