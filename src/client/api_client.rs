use std::env;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::api::dtos::{requests::RsvpDecisionRequest, responses::RsvpDecisionResponse};
use crate::client::{
    error::ClientError,
    forms::SignupForm,
    session::{persist_login, Session, SessionStore},
};
use crate::domain::models::{
    auth::{AuthResponse, UserProfile},
    event::{Event, EventDetails},
    guest::{Guest, RsvpDecision},
    rsvp::RsvpResolution,
};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("APP_API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            timeout: Duration::from_secs(
                env::var("APP_API_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(15),
            ),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Typed wrapper over the service's HTTP API. Each call is one request, no retries.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Validation(format!("Invalid API base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Validation("Invalid API base URL".into()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                error!("Failed to build HTTP client: {}", e);
                ClientError::unexpected()
            })?;

        Ok(Self { http, base_url })
    }

    pub async fn register(&self, form: &SignupForm) -> Result<UserProfile, ClientError> {
        form.validate()?;

        let body = json!({
            "email": form.email.trim(),
            "password": form.password,
            "name": form.name.trim(),
        });
        let req = self.request(Method::POST, &["auth", "register"], None)?.json(&body);
        self.send(req, "Registration failed").await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = json!({ "email": email, "password": password });
        let req = self.request(Method::POST, &["auth", "login"], None)?.json(&body);
        self.send(req, "Login failed").await
    }

    /// Logs in and, only on success, writes the credential to `store`.
    pub async fn sign_in(&self, store: &dyn SessionStore, email: &str, password: &str) -> Result<Session, ClientError> {
        let auth = self.login(email, password).await?;
        persist_login(store, &auth);

        Ok(Session {
            credential: auth.access_token,
            organizer_id: Some(auth.user_id),
        })
    }

    pub async fn list_events(&self, session: &Session) -> Result<Vec<Event>, ClientError> {
        let req = self.request(Method::GET, &["events"], Some(session))?;
        self.send(req, "Failed to fetch events").await
    }

    pub async fn get_event(&self, session: &Session, event_id: &str) -> Result<Event, ClientError> {
        let req = self.request(Method::GET, &["events", event_id], Some(session))?;
        self.send(req, "Failed to fetch event").await
    }

    pub async fn create_event(&self, session: &Session, details: &EventDetails) -> Result<Event, ClientError> {
        let req = self.request(Method::POST, &["events"], Some(session))?.json(details);
        self.send(req, "Event creation failed").await
    }

    pub async fn update_event(&self, session: &Session, event_id: &str, details: &EventDetails) -> Result<Event, ClientError> {
        let req = self.request(Method::PUT, &["events", event_id], Some(session))?.json(details);
        self.send(req, "Failed to update event").await
    }

    pub async fn delete_event(&self, session: &Session, event_id: &str) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &["events", event_id], Some(session))?;
        let _: serde_json::Value = self.send(req, "Failed to delete event").await?;
        Ok(())
    }

    pub async fn list_guests(&self, session: &Session, event_id: &str) -> Result<Vec<Guest>, ClientError> {
        let req = self.request(Method::GET, &["events", event_id, "guests"], Some(session))?;
        self.send(req, "Failed to fetch guests").await
    }

    pub async fn invite_guest(&self, session: &Session, event_id: &str, email: &str) -> Result<Guest, ClientError> {
        let body = InvitePayload { event_id, email };
        let req = self.request(Method::POST, &["events", "guests"], Some(session))?.json(&body);
        self.send(req, "Failed to invite guest").await
    }

    pub async fn resolve_rsvp(&self, token: &str) -> Result<RsvpResolution, ClientError> {
        let req = self.request(Method::GET, &["events", "rsvp", token], None)?;
        self.send(req, "Failed to fetch RSVP details").await
    }

    pub async fn decide_rsvp(&self, token: &str, decision: RsvpDecision) -> Result<RsvpDecisionResponse, ClientError> {
        let body = RsvpDecisionRequest { rsvp_status: decision };
        let req = self.request(Method::POST, &["events", "rsvp", token], None)?.json(&body);
        self.send(req, "Failed to update RSVP status").await
    }

    fn request(&self, method: Method, segments: &[&str], session: Option<&Session>) -> Result<RequestBuilder, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::unexpected())?
            .pop_if_empty()
            .extend(segments);

        let req = self.http.request(method, url);
        Ok(match session {
            Some(session) => req.bearer_auth(&session.credential),
            None => req,
        })
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, fallback: &str) -> Result<T, ClientError> {
        let response = req.send().await.map_err(|e| {
            if e.is_builder() {
                error!("API Error: {}", e);
                ClientError::unexpected()
            } else {
                error!("API Error: No response received: {}", e);
                ClientError::network()
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                error!("API Error: unreadable response body: {}", e);
                ClientError::unexpected()
            });
        }

        let text = response.text().await.unwrap_or_default();
        warn!("API Error: {} {}", status, text);

        let message = serde_json::from_str::<ErrorBody>(&text).ok().and_then(|b| b.message);
        Err(ClientError::from_status(status, message, fallback))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InvitePayload<'a> {
    event_id: &'a str,
    email: &'a str,
}
