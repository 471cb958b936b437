use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{LoginRequest, RegisterRequest};
use crate::api::extractors::json::ApiJson;
use crate::domain::models::{auth::{AuthResponse, UserProfile}, user::User};
use crate::domain::services::auth_service::invalid_credentials;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let email = normalize_email(&payload.email);
    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("An account with this email already exists".into()));
    }

    let password_hash = state.auth_service.hash_password(&payload.password)?;
    let name = payload.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

    let user = state.user_repo.create(&User::new(email, name, password_hash)).await?;
    info!("Organizer registered: {}", user.id);

    Ok((StatusCode::CREATED, Json(UserProfile {
        id: user.id,
        email: user.email,
        name: user.name,
    })))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_email(&normalize_email(&payload.email)).await?
        .ok_or_else(invalid_credentials)?;

    state.auth_service.verify_password(&payload.password, &user.password_hash)?;

    let access_token = state.auth_service.issue_access_token(&user)?;

    info!("Organizer logged in: {}", user.id);

    Ok(Json(AuthResponse {
        access_token,
        user_id: user.id,
        email: user.email,
        name: user.name,
    }))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
