use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::api::dtos::responses::MessageResponse;
use crate::domain::models::event::{Event, EventDetails};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_by_owner(&user.id).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = load_owned_event(&state, &user, &event_id).await?;
    Ok(Json(event))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ApiJson(payload): ApiJson<EventDetails>,
) -> Result<impl IntoResponse, AppError> {
    validate_details(&payload)?;

    let event = Event::new(user.id.clone(), payload);
    let created = state.event_repo.create(&event).await?;

    info!("Created event {} for organizer {}", created.id, user.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
    ApiJson(payload): ApiJson<EventDetails>,
) -> Result<impl IntoResponse, AppError> {
    validate_details(&payload)?;

    let mut event = load_owned_event(&state, &user, &event_id).await?;
    event.apply(payload);

    let updated = state.event_repo.update(&event).await?;
    info!("Updated event: {}", event_id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    load_owned_event(&state, &user, &event_id).await?;

    state.event_repo.delete(&event_id).await?;
    info!("Deleted event {} and its invitations", event_id);
    Ok(Json(MessageResponse::new("Event deleted")))
}

/// Loads an event and checks that `user` owns it.
pub async fn load_owned_event(state: &AppState, user: &AuthUser, event_id: &str) -> Result<Event, AppError> {
    let event = state.event_repo.find_by_id(event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if !event.is_owned_by(&user.id) {
        return Err(AppError::Forbidden("You do not have access to this event".into()));
    }

    Ok(event)
}

fn validate_details(details: &EventDetails) -> Result<(), AppError> {
    if details.name.trim().is_empty() {
        return Err(AppError::Validation("Event name is required".into()));
    }
    if details.location.trim().is_empty() {
        return Err(AppError::Validation("Event location is required".into()));
    }
    Ok(())
}
