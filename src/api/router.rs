use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, event, guest, health, rsvp};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
    trace::TraceLayer,
};
use tracing::{info_span, Span, error, info, warn};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.public_base_url);

    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))

        // Organizer console
        .route("/events", get(event::list_events).post(event::create_event))
        .route("/events/guests", post(guest::invite_guest))
        .route("/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/events/{event_id}/guests", get(guest::list_guests))

        // Public RSVP
        .route("/events/rsvp/{token}", get(rsvp::resolve_rsvp).post(rsvp::decide_rsvp))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        route = %redacted_path(request.uri().path()),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), redacted_path(request.uri().path()));
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(public_base_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match HeaderValue::from_str(public_base_url) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            warn!("PUBLIC_BASE_URL is not a valid origin, cross-origin requests will be refused");
            layer
        }
    }
}

/// RSVP tokens are bearer capabilities and must not end up in logs.
fn redacted_path(path: &str) -> String {
    match path.strip_prefix("/events/rsvp/") {
        Some(_) => "/events/rsvp/{token}".to_string(),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::redacted_path;

    #[test]
    fn rsvp_tokens_are_redacted_from_logged_paths() {
        assert_eq!(redacted_path("/events/rsvp/AbC123"), "/events/rsvp/{token}");
        assert_eq!(redacted_path("/events/42/guests"), "/events/42/guests");
    }
}
