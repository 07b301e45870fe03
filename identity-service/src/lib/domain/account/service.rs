use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::IssuedCredentials;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::AccountStore;

/// Domain service implementing the registration and login flows.
///
/// Concrete implementation of AccountServicePort with dependency injection:
/// the store and the credential primitives arrive at construction, never
/// through ambient configuration.
pub struct AccountService<S>
where
    S: AccountStore,
{
    store: Arc<S>,
    authenticator: Arc<Authenticator>,
    token_expiration_hours: i64,
}

impl<S> AccountService<S>
where
    S: AccountStore,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Account persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `token_expiration_hours` - Validity window for issued tokens
    pub fn new(
        store: Arc<S>,
        authenticator: Arc<Authenticator>,
        token_expiration_hours: i64,
    ) -> Self {
        Self {
            store,
            authenticator,
            token_expiration_hours,
        }
    }

    fn claims_for(&self, account: &Account) -> Claims {
        Claims::for_account(
            account.id,
            &account.email,
            account.primary_role(),
            self.token_expiration_hours,
        )
    }
}

#[async_trait]
impl<S> AccountServicePort for AccountService<S>
where
    S: AccountStore,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<IssuedCredentials, AccountError> {
        // Uniqueness pre-check. The store's unique constraint still backs
        // this up: a concurrent registration that slips past here fails in
        // create with the same EmailAlreadyExists outcome.
        if self.store.find_by_email(&command.email).await?.is_some() {
            return Err(AccountError::EmailAlreadyExists(command.email));
        }

        let password_digest = self.authenticator.hash_password(&command.password)?;

        let account = self
            .store
            .create(NewAccount {
                email: command.email,
                first_name: command.first_name,
                last_name: command.last_name,
                password_digest,
                roles: command.roles,
            })
            .await?;

        tracing::info!(account_id = %account.id, "Account registered");

        let claims = self.claims_for(&account);
        let token = self.authenticator.issue_token(&claims)?;

        Ok(IssuedCredentials {
            token,
            roles: account.roles,
        })
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedCredentials, AccountError> {
        // Unknown email and wrong password collapse into the same error so
        // responses cannot be used to enumerate registered accounts.
        let account = self
            .store
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let claims = self.claims_for(&account);

        let result = self
            .authenticator
            .authenticate(&credentials.password, &account.password_digest, &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                AuthenticationError::JwtError(err) => AccountError::Token(err),
            })?;

        tracing::info!(account_id = %account.id, "Account authenticated");

        Ok(IssuedCredentials {
            token: result.access_token,
            roles: account.roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::account::models::AccountId;

    mock! {
        pub TestAccountStore {}

        #[async_trait]
        impl AccountStore for TestAccountStore {
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;
        }
    }

    const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(TEST_SECRET).expect("Failed to build authenticator"))
    }

    fn stored_account(email: &str, password: &str, roles: Vec<String>) -> Account {
        Account {
            id: AccountId::new(),
            email: email.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password_digest: authenticator()
                .hash_password(password)
                .expect("Failed to hash password"),
            roles,
            created_at: Utc::now(),
        }
    }

    fn register_command(email: &str, roles: Vec<String>) -> RegisterCommand {
        RegisterCommand {
            email: email.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password: "pass_word!".to_string(),
            roles,
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut store = MockTestAccountStore::new();

        store
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(|_| Ok(None));

        store
            .expect_create()
            .withf(|account| {
                account.email == "ada@example.com"
                    && account.password_digest.starts_with("$argon2")
            })
            .times(1)
            .returning(|account| {
                Ok(Account {
                    id: AccountId::new(),
                    email: account.email,
                    first_name: account.first_name,
                    last_name: account.last_name,
                    password_digest: account.password_digest,
                    roles: account.roles,
                    created_at: Utc::now(),
                })
            });

        let authenticator = authenticator();
        let service = AccountService::new(Arc::new(store), Arc::clone(&authenticator), 24);

        let issued = service
            .register(register_command(
                "ada@example.com",
                vec!["ROLE_ADMIN".to_string()],
            ))
            .await
            .expect("Registration failed");

        assert_eq!(issued.roles, vec!["ROLE_ADMIN".to_string()]);

        let claims = authenticator
            .validate_token(&issued.token)
            .expect("Issued token failed validation");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, "ROLE_ADMIN");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_precheck() {
        let mut store = MockTestAccountStore::new();

        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_account("ada@example.com", "pass_word!", vec![]))));

        // The flow stops before the store create
        store.expect_create().times(0);

        let service = AccountService::new(Arc::new(store), authenticator(), 24);

        let result = service
            .register(register_command("ada@example.com", vec![]))
            .await;
        assert!(matches!(
            result,
            Err(AccountError::EmailAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_from_store_constraint() {
        let mut store = MockTestAccountStore::new();

        // Pre-check passes; a concurrent registration won the race and the
        // store's unique constraint rejects the insert.
        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        store
            .expect_create()
            .times(1)
            .returning(|account| Err(AccountError::EmailAlreadyExists(account.email)));

        let service = AccountService::new(Arc::new(store), authenticator(), 24);

        let result = service
            .register(register_command("ada@example.com", vec![]))
            .await;
        assert!(matches!(
            result,
            Err(AccountError::EmailAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_register_default_role_in_claims() {
        let mut store = MockTestAccountStore::new();

        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        store.expect_create().times(1).returning(|account| {
            Ok(Account {
                id: AccountId::new(),
                email: account.email,
                first_name: account.first_name,
                last_name: account.last_name,
                password_digest: account.password_digest,
                roles: account.roles,
                created_at: Utc::now(),
            })
        });

        let authenticator = authenticator();
        let service = AccountService::new(Arc::new(store), Arc::clone(&authenticator), 24);

        let issued = service
            .register(register_command("ada@example.com", vec![]))
            .await
            .expect("Registration failed");

        // No roles supplied: the response role sequence is empty but the
        // claim falls back to the default label
        assert!(issued.roles.is_empty());
        let claims = authenticator.validate_token(&issued.token).unwrap();
        assert_eq!(claims.role, "ROLE_USER");
    }

    #[tokio::test]
    async fn test_login_success() {
        let account = stored_account(
            "ada@example.com",
            "pass_word!",
            vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()],
        );
        let account_id = account.id;

        let mut store = MockTestAccountStore::new();
        store
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let authenticator = authenticator();
        let service = AccountService::new(Arc::new(store), Arc::clone(&authenticator), 24);

        let issued = service
            .login(Credentials {
                email: "ada@example.com".to_string(),
                password: "pass_word!".to_string(),
            })
            .await
            .expect("Login failed");

        assert_eq!(
            issued.roles,
            vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()]
        );

        let claims = authenticator.validate_token(&issued.token).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, "ROLE_ADMIN");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let account = stored_account("ada@example.com", "pass_word!", vec![]);

        let mut store = MockTestAccountStore::new();
        store
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(Arc::new(store), authenticator(), 24);

        let result = service
            .login(Credentials {
                email: "ada@example.com".to_string(),
                password: "wrong_password".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_error_as_wrong_password() {
        let mut store = MockTestAccountStore::new();
        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(store), authenticator(), 24);

        let result = service
            .login(Credentials {
                email: "nobody@example.com".to_string(),
                password: "pass_word!".to_string(),
            })
            .await;

        // Same variant as the wrong-password case: no enumeration signal
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_corrupt_stored_digest() {
        let mut account = stored_account("ada@example.com", "pass_word!", vec![]);
        account.password_digest = "corrupted".to_string();

        let mut store = MockTestAccountStore::new();
        store
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(Arc::new(store), authenticator(), 24);

        let result = service
            .login(Credentials {
                email: "ada@example.com".to_string(),
                password: "pass_word!".to_string(),
            })
            .await;

        // Fail closed: a corrupt digest reads as bad credentials
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_store_error() {
        let mut store = MockTestAccountStore::new();
        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(AccountError::StoreError("connection reset".to_string())));

        let service = AccountService::new(Arc::new(store), authenticator(), 24);

        let result = service
            .login(Credentials {
                email: "ada@example.com".to_string(),
                password: "pass_word!".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AccountError::StoreError(_))));
    }
}
