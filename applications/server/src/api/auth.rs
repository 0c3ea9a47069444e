/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use stowaway_core::types::{CreateUser, UserId};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub user_id: UserId,
}

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(ServerError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let password_hash = app_state.auth_service.hash_password(&req.password)?;
    let user = app_state
        .db
        .create_user(
            CreateUser {
                username: username.to_string(),
                first_name: req.first_name,
                last_name: req.last_name,
            },
            &password_hash,
        )
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let token = app_state.auth_service.create_token(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            user_id: user.id,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let invalid = || ServerError::Auth("Invalid username or password".to_string());

    let user = app_state
        .db
        .find_user_by_username(&req.username)
        .await?
        .ok_or_else(invalid)?;

    let password_hash = app_state
        .db
        .get_password_hash(user.id)
        .await?
        .ok_or_else(invalid)?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(invalid());
    }

    let token = app_state.auth_service.create_token(user.id)?;

    Ok(Json(TokenResponse {
        token,
        user_id: user.id,
    }))
}
