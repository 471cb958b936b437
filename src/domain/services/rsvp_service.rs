use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{
    models::{event::Event, guest::{Guest, RsvpDecision}, rsvp::{RsvpResolution, ALREADY_RESPONDED}},
    ports::{EventRepository, GuestRepository},
    services::rsvp_token,
};
use crate::error::AppError;

/// One message for every lookup failure, so an unknown token and a token whose
/// event was deleted look identical to the caller.
pub const INVITATION_NOT_FOUND: &str = "Invitation not found";

/// The public side of an invitation: the raw token is the only credential.
pub struct RsvpService {
    event_repo: Arc<dyn EventRepository>,
    guest_repo: Arc<dyn GuestRepository>,
}

impl RsvpService {
    pub fn new(event_repo: Arc<dyn EventRepository>, guest_repo: Arc<dyn GuestRepository>) -> Self {
        Self { event_repo, guest_repo }
    }

    /// Read-only and repeatable. Stays available after a decision so the page
    /// can render the "already recorded" state.
    pub async fn resolve(&self, token: &str) -> Result<RsvpResolution, AppError> {
        let (event, guest) = self.lookup(token).await?;
        Ok(RsvpResolution::new(&event, &guest))
    }

    /// Pending -> decision, exactly once. Any later call is a conflict and leaves
    /// the recorded answer untouched.
    pub async fn decide(&self, token: &str, decision: RsvpDecision) -> Result<Guest, AppError> {
        let (_event, mut guest) = self.lookup(token).await?;

        if guest.rsvp_status.is_decided() {
            warn!(guest_id = %guest.id, "Repeated RSVP decision rejected");
            return Err(AppError::Conflict(ALREADY_RESPONDED.into()));
        }

        let responded_at = Utc::now();
        let recorded = self.guest_repo.record_decision(&guest.id, decision, responded_at).await?;
        if !recorded {
            // Lost a race against a concurrent decision on the same token.
            warn!(guest_id = %guest.id, "RSVP decision raced and lost");
            return Err(AppError::Conflict(ALREADY_RESPONDED.into()));
        }

        guest.rsvp_status = decision.into();
        guest.responded_at = Some(responded_at);

        info!(guest_id = %guest.id, event_id = %guest.event_id, status = %guest.rsvp_status, "RSVP recorded");
        Ok(guest)
    }

    async fn lookup(&self, token: &str) -> Result<(Event, Guest), AppError> {
        if !rsvp_token::is_well_formed(token) {
            return Err(AppError::NotFound(INVITATION_NOT_FOUND.into()));
        }

        let guest = self.guest_repo.find_by_token_hash(&rsvp_token::hash(token)).await?
            .ok_or(AppError::NotFound(INVITATION_NOT_FOUND.into()))?;

        let event = self.event_repo.find_by_id(&guest.event_id).await?
            .ok_or(AppError::NotFound(INVITATION_NOT_FOUND.into()))?;

        Ok((event, guest))
    }
}
