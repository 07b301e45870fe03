use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::IssuedCredentials;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::RegisterCommand;

/// Port for account credential operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and issue a signed token for it.
    ///
    /// # Arguments
    /// * `command` - Registration data with plaintext password
    ///
    /// # Returns
    /// Signed token plus the account's role sequence
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `Token` - Token issuance failed
    /// * `StoreError` - Store operation failed
    async fn register(&self, command: RegisterCommand)
        -> Result<IssuedCredentials, AccountError>;

    /// Authenticate an existing account and issue a signed token.
    ///
    /// # Arguments
    /// * `credentials` - Submitted email and plaintext password
    ///
    /// # Returns
    /// Signed token plus the account's role sequence
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, collapsed
    ///   into one outcome
    /// * `Token` - Token issuance failed
    /// * `StoreError` - Store operation failed
    async fn login(&self, credentials: Credentials) -> Result<IssuedCredentials, AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// Implementations MUST enforce email uniqueness inside `create`: the
/// service's pre-check is check-then-act and two concurrent registrations
/// can both pass it.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Retrieve an account by its email, exactly as stored.
    ///
    /// # Arguments
    /// * `email` - Email address string (no normalization applied)
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `StoreError` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Persist a new account, assigning its id and creation timestamp.
    ///
    /// # Arguments
    /// * `account` - Record with email, names, digest, and roles
    ///
    /// # Returns
    /// Created account entity with id and created_at assigned
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered (unique
    ///   constraint)
    /// * `StoreError` - Store operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;
}
