use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::NewAccount;
use crate::domain::account::ports::AccountStore;

/// In-memory account store, keyed by email.
///
/// Check-and-insert happens under one write lock, so the unique-email
/// contract of [`AccountStore::create`] holds under concurrent
/// registrations just as it does for the Postgres adapter's constraint.
/// Used by the integration tests and for running the service without a
/// database.
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored accounts.
    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.email) {
            return Err(AccountError::EmailAlreadyExists(account.email));
        }

        let created = Account {
            id: AccountId::new(),
            email: account.email.clone(),
            first_name: account.first_name,
            last_name: account.last_name,
            password_digest: account.password_digest,
            roles: account.roles,
            created_at: Utc::now(),
        };

        accounts.insert(account.email, created.clone());

        Ok(created)
    }
}
