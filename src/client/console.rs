use std::collections::HashMap;
use tracing::{info, warn};

use crate::client::{
    api_client::ApiClient,
    error::ClientError,
    forms::EventForm,
    session::Session,
};
use crate::domain::models::{event::Event, guest::Guest};

/// Non-blocking feedback for the last action, the console's toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Organizer dashboard state: the event list and the guest lists that are open.
///
/// Nothing is patched locally. Each successful mutation invalidates and
/// re-fetches the views it affects, so server-assigned ids and cascades are
/// always what is shown. Actions take `&mut self`, which keeps one call in
/// flight per console and rules out double submission.
pub struct OrganizerConsole {
    api: ApiClient,
    session: Session,
    events: Vec<Event>,
    guests: HashMap<String, Vec<Guest>>,
    notice: Option<Notice>,
}

impl OrganizerConsole {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            events: Vec::new(),
            guests: HashMap::new(),
            notice: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn guests(&self, event_id: &str) -> Option<&[Guest]> {
        self.guests.get(event_id).map(Vec::as_slice)
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub async fn refresh_events(&mut self) -> Result<&[Event], ClientError> {
        match self.api.list_events(&self.session).await {
            Ok(events) => {
                self.events = events;
                Ok(&self.events)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub async fn create_event(&mut self, form: &EventForm) -> Result<Event, ClientError> {
        let details = form.validate().map_err(|e| self.fail(e))?;

        let created = self.api.create_event(&self.session, &details).await
            .map_err(|e| self.fail(e))?;
        info!("Event created: {}", created.id);

        self.succeed("Event created successfully!");
        self.reload_events().await;
        Ok(created)
    }

    pub async fn update_event(&mut self, event_id: &str, form: &EventForm) -> Result<Event, ClientError> {
        let details = form.validate().map_err(|e| self.fail(e))?;

        let updated = self.api.update_event(&self.session, event_id, &details).await
            .map_err(|e| self.fail(e))?;

        self.succeed("Event updated successfully!");
        self.reload_events().await;
        if self.guests.contains_key(event_id) {
            self.reload_guests(event_id).await;
        }
        Ok(updated)
    }

    pub async fn delete_event(&mut self, event_id: &str) -> Result<(), ClientError> {
        self.api.delete_event(&self.session, event_id).await
            .map_err(|e| self.fail(e))?;

        // The event and its guests are gone for good; drop every reference to them.
        self.guests.remove(event_id);
        self.events.retain(|e| e.id != event_id);

        self.succeed("Event deleted successfully!");
        self.reload_events().await;
        Ok(())
    }

    pub async fn open_guests(&mut self, event_id: &str) -> Result<&[Guest], ClientError> {
        match self.api.list_guests(&self.session, event_id).await {
            Ok(guests) => {
                self.guests.insert(event_id.to_string(), guests);
                Ok(self.guests.get(event_id).map(Vec::as_slice).unwrap_or_default())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn close_guests(&mut self, event_id: &str) {
        self.guests.remove(event_id);
    }

    /// Invites `email` to the event. Format checks are left to the server; the
    /// same address may be invited more than once.
    pub async fn invite_guest(&mut self, event_id: &str, email: &str) -> Result<Guest, ClientError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(self.fail(ClientError::Validation("Email is required".into())));
        }

        let guest = self.api.invite_guest(&self.session, event_id, email).await
            .map_err(|e| self.fail(e))?;

        self.succeed("Guest invited successfully!");
        self.reload_guests(event_id).await;
        Ok(guest)
    }

    async fn reload_events(&mut self) {
        if let Err(e) = self.refresh_events().await {
            warn!("Event list refresh after mutation failed: {}", e);
        }
    }

    async fn reload_guests(&mut self, event_id: &str) {
        if let Err(e) = self.open_guests(event_id).await {
            warn!("Guest list refresh for {} failed: {}", event_id, e);
        }
    }

    fn succeed(&mut self, message: &str) {
        self.notice = Some(Notice::Success(message.to_string()));
    }

    fn fail(&mut self, error: ClientError) -> ClientError {
        self.notice = Some(Notice::Error(error.message().to_string()));
        error
    }
}
