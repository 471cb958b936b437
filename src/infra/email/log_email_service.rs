use crate::domain::ports::EmailService;
use crate::error::AppError;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Fallback when no mail relay is configured. The body holds a live RSVP token, so it is not logged.
/// The guest address only goes out at debug level.
pub struct LogEmailService;

#[async_trait]
impl EmailService for LogEmailService {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
        warn!(
            subject,
            body_len = html_body.len(),
            "MAIL_SERVICE_URL not set, invitation mail dropped"
        );
        debug!(recipient, "Dropped invitation recipient");
        Ok(())
    }
}
