use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::api::dtos::requests::InviteGuestRequest;
use crate::api::handlers::event::load_owned_event;
use crate::domain::models::guest::Guest;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

pub async fn list_guests(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_owned_event(&state, &user, &event_id).await?;

    let guests = state.guest_repo.list_by_event(&event.id).await?;
    Ok(Json(guests))
}

/// Creates a pending guest, mints its RSVP token and mails the link.
/// The token never appears in the response.
pub async fn invite_guest(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ApiJson(payload): ApiJson<InviteGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let event = load_owned_event(&state, &user, &payload.event_id).await?;

    let (guest, token) = Guest::invite(event.id.clone(), payload.email.trim().to_string());
    let created = state.guest_repo.create(&guest).await?;

    info!("Invited guest {} to event {}", created.id, event.id);

    // The guest stays valid without the mail; the organizer can invite again.
    if let Err(e) = state.invitation_service.send(&event, &created, &token).await {
        error!("Invitation mail for guest {} failed: {}", created.id, e);
    }

    Ok((StatusCode::CREATED, Json(created)))
}
