use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims embedded in issued tokens.
///
/// Carries the three identity assertions of this service (subject id,
/// email, primary role) plus issuance and expiry timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Account email, as registered
    pub email: String,

    /// Primary role label
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an authenticated account.
    ///
    /// # Arguments
    /// * `subject` - Unique account identifier
    /// * `email` - Account email
    /// * `role` - Primary role label
    /// * `expiration_hours` - Hours until token expires
    ///
    /// # Returns
    /// Claims with iat set to now and exp derived from `expiration_hours`
    pub fn for_account(
        subject: impl ToString,
        email: impl Into<String>,
        role: impl Into<String>,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self {
            sub: subject.to_string(),
            email: email.into(),
            role: role.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = iat;
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }
}
