use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header::AUTHORIZATION, request::Parts},
};
use crate::state::AppState;
use crate::error::AppError;
use std::sync::Arc;
use tracing::Span;

/// The organizer behind a valid `Authorization: Bearer <jwt>` header.
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?
            .to_str()
            .map_err(|_| AppError::Unauthorized("Malformed authorization header".into()))?;

        let token = header.strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let claims = app_state.auth_service.verify_access_token(token)?;

        Span::current().record("user_id", claims.sub.as_str());

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}
