use rsvp_service::{
    api::router::create_router,
    config::Config,
    domain::ports::EmailService,
    domain::services::invitation_service::load_templates,
    error::AppError,
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo,
        sqlite_guest_repo::SqliteGuestRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use parking_lot::Mutex;
use tower::ServiceExt;
use serde_json::{json, Value};

pub const PUBLIC_BASE_URL: &str = "http://rsvp.test";
pub const PASSWORD: &str = "correct-horse-battery";

#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
}

impl SentMail {
    pub fn rsvp_token(&self) -> String {
        let marker = format!("{}/rsvp/", PUBLIC_BASE_URL);
        let start = self.html_body.find(&marker).expect("No RSVP link in mail") + marker.len();
        self.html_body[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect()
    }
}

#[derive(Default)]
pub struct MockEmailService {
    pub sent: Mutex<Vec<SentMail>>,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
        self.sent.lock().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub mailer: Arc<MockEmailService>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret_key: include_str!("../tests/keys/test_private.pem").to_string(),
            jwt_public_key: include_str!("../tests/keys/test_public.pem").to_string(),
            auth_issuer: "test-issuer".to_string(),
            session_ttl_minutes: 60,
            public_base_url: PUBLIC_BASE_URL.to_string(),
            mail_service_url: None,
            mail_service_token: String::new(),
        };

        let mailer = Arc::new(MockEmailService::default());

        let state = Arc::new(AppState::assemble(
            config,
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteEventRepo::new(pool.clone())),
            Arc::new(SqliteGuestRepo::new(pool.clone())),
            mailer.clone(),
            Arc::new(load_templates().unwrap()),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            mailer,
        }
    }

    /// Serves the router on a real socket for the HTTP client. Returns the base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn register(&self, email: &str) {
        let (status, body) = self.request("POST", "/auth/register", None, Some(json!({
            "email": email,
            "password": PASSWORD,
            "name": "Organizer"
        }))).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    }

    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self.request("POST", "/auth/login", None, Some(json!({
            "email": email,
            "password": PASSWORD
        }))).await;

        if !status.is_success() {
            panic!("Login failed in test helper: status {}", status);
        }
        body["accessToken"].as_str().expect("No accessToken in body").to_string()
    }

    /// Registers and logs in a fresh organizer. Returns the bearer credential.
    pub async fn organizer(&self, email: &str) -> String {
        self.register(email).await;
        self.login(email).await
    }

    pub async fn create_event(&self, token: &str, details: Value) -> Value {
        let (status, body) = self.request("POST", "/events", Some(token), Some(details)).await;
        assert_eq!(status, StatusCode::CREATED, "create event failed: {}", body);
        body
    }

    /// Invites `email` and returns the RSVP token from the captured mail.
    pub async fn invite(&self, token: &str, event_id: &str, email: &str) -> String {
        let (status, body) = self.request("POST", "/events/guests", Some(token), Some(json!({
            "eventId": event_id,
            "email": email
        }))).await;
        assert_eq!(status, StatusCode::CREATED, "invite failed: {}", body);

        self.last_mail_to(email).rsvp_token()
    }

    pub fn last_mail_to(&self, email: &str) -> SentMail {
        self.mailer.sent.lock()
            .iter()
            .rev()
            .find(|m| m.recipient == email)
            .cloned()
            .expect("No mail sent to recipient")
    }
}

pub fn launch_party() -> Value {
    json!({
        "name": "Launch Party",
        "date": "2025-06-01",
        "time": "18:00",
        "location": "HQ Roof"
    })
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
