use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::ApiJson;
use crate::api::dtos::{requests::RsvpDecisionRequest, responses::RsvpDecisionResponse};
use crate::error::AppError;
use std::sync::Arc;

/// Public: the token in the path is the only credential.
pub async fn resolve_rsvp(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let resolution = state.rsvp_service.resolve(&token).await?;
    Ok(Json(resolution))
}

pub async fn decide_rsvp(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    ApiJson(payload): ApiJson<RsvpDecisionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let guest = state.rsvp_service.decide(&token, payload.rsvp_status).await?;

    Ok(Json(RsvpDecisionResponse {
        rsvp_status: guest.rsvp_status,
        responded: true,
    }))
}
