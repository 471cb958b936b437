use std::sync::Arc;
use tera::{Context, Tera};
use tracing::{error, info};

use crate::config::Config;
use crate::domain::{
    models::{event::{display_date, time_of_day, Event}, guest::Guest},
    ports::EmailService,
};
use crate::error::AppError;

pub const INVITATION_TEMPLATE: &str = "invitation.html";

pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(INVITATION_TEMPLATE, include_str!("../../../templates/invitation.html"))?;
    Ok(tera)
}

/// Delivers the RSVP link out of band. The raw token only ever travels inside this mail.
pub struct InvitationService {
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
    config: Config,
}

impl InvitationService {
    pub fn new(email_service: Arc<dyn EmailService>, templates: Arc<Tera>, config: Config) -> Self {
        Self { email_service, templates, config }
    }

    pub fn render(&self, event: &Event, token: &str) -> Result<String, AppError> {
        let mut context = Context::new();
        context.insert("event_name", &event.name);
        context.insert("event_date", &display_date(&event.date));
        context.insert("event_time", &time_of_day::format(&event.time));
        context.insert("event_location", &event.location);
        context.insert("rsvp_link", &self.config.rsvp_link(token));

        self.templates.render(INVITATION_TEMPLATE, &context).map_err(|e| {
            error!("Template render error: {:?}", e);
            AppError::InternalWithMsg(format!("Failed to render invitation: {}", e))
        })
    }

    pub async fn send(&self, event: &Event, guest: &Guest, token: &str) -> Result<(), AppError> {
        let html_body = self.render(event, token)?;
        let subject = format!("You're invited: {}", event.name);

        self.email_service.send(&guest.email, &subject, &html_body).await?;
        info!(guest_id = %guest.id, event_id = %event.id, "Invitation sent");
        Ok(())
    }
}
