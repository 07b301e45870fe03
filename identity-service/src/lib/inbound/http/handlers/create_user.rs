use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::TokenResponse;
use crate::domain::account::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|issued| Json(issued.into()))
}

/// HTTP request body for creating a user (raw JSON).
///
/// Every field is optional at the deserialization layer so that presence
/// is checked explicitly and missing fields map to a 400, not a framework
/// rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    email: Option<String>,
    firstname: Option<String>,
    lastname: Option<String>,
    password: Option<String>,
    roles: Option<RolesField>,
}

/// The roles field accepts a single label or a sequence of labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RolesField {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Error)]
enum ParseCreateUserRequestError {
    #[error("Missing required fields")]
    MissingFields,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseCreateUserRequestError> {
        let (Some(email), Some(first_name), Some(last_name), Some(password)) =
            (self.email, self.firstname, self.lastname, self.password)
        else {
            return Err(ParseCreateUserRequestError::MissingFields);
        };

        // Ordered, no dedup, no label validation; absent means empty
        let roles = match self.roles {
            None => Vec::new(),
            Some(RolesField::One(role)) => vec![role],
            Some(RolesField::Many(roles)) => roles,
        };

        Ok(RegisterCommand {
            email,
            first_name,
            last_name,
            password,
            roles,
        })
    }
}

impl From<ParseCreateUserRequestError> for ApiError {
    fn from(err: ParseCreateUserRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
