use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::TokenResponse;
use crate::domain::account::models::Credentials;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    // Presence is checked explicitly rather than letting absent fields
    // fall through to the lookup
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    };

    state
        .account_service
        .login(Credentials { email, password })
        .await
        .map_err(ApiError::from)
        .map(|issued| Json(issued.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}
