use std::sync::Arc;
use crate::domain::ports::{EmailService, EventRepository, GuestRepository, UserRepository};
use crate::domain::services::{
    auth_service::AuthService, invitation_service::InvitationService, rsvp_service::RsvpService,
};
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub auth_service: Arc<AuthService>,
    pub rsvp_service: Arc<RsvpService>,
    pub invitation_service: Arc<InvitationService>,
}

impl AppState {
    /// Wires the domain services on top of a set of adapters.
    pub fn assemble(
        config: Config,
        user_repo: Arc<dyn UserRepository>,
        event_repo: Arc<dyn EventRepository>,
        guest_repo: Arc<dyn GuestRepository>,
        email_service: Arc<dyn EmailService>,
        templates: Arc<Tera>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(config.clone()));
        let rsvp_service = Arc::new(RsvpService::new(event_repo.clone(), guest_repo.clone()));
        let invitation_service = Arc::new(InvitationService::new(email_service, templates, config.clone()));

        Self {
            config,
            user_repo,
            event_repo,
            guest_repo,
            auth_service,
            rsvp_service,
            invitation_service,
        }
    }
}
