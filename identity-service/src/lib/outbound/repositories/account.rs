use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::NewAccount;
use crate::domain::account::ports::AccountStore;

/// Name of the unique constraint on accounts.email; duplicate inserts
/// surface through it (see migrations).
const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    password_digest: String,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: AccountId(row.id),
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            password_digest: row.password_digest,
            roles: row.roles,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, first_name, last_name, password_digest, roles, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Account::from))
        .map_err(|e| AccountError::StoreError(e.to_string()))
    }

    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let id = AccountId::new();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, first_name, last_name, password_digest, roles, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id.0)
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.password_digest)
        .bind(&account.roles)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return AccountError::EmailAlreadyExists(account.email.clone());
                }
            }
            AccountError::StoreError(e.to_string())
        })?;

        Ok(Account {
            id,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            password_digest: account.password_digest,
            roles: account.roles,
            created_at,
        })
    }
}
