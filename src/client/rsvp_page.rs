use tracing::{info, warn};

use crate::client::{api_client::ApiClient, error::ClientError};
use crate::domain::models::{
    event::display_date,
    guest::{RsvpDecision, RsvpStatus},
    rsvp::{RsvpEventView, ALREADY_RESPONDED},
};

#[derive(Debug, Clone, PartialEq)]
pub enum RsvpPageState {
    Loading,
    /// Pending invitation: event details and the Accept/Decline controls.
    Invitation(RsvpEventView),
    /// "Your response has been recorded." No decision controls, ever again.
    /// Carries the decision when it was made on this page.
    Recorded(Option<RsvpStatus>),
    Failed(String),
}

/// The public page behind an invitation link. Needs no session: the token is the credential.
pub struct RsvpPage {
    api: ApiClient,
    token: String,
    state: RsvpPageState,
}

impl RsvpPage {
    pub fn new(api: ApiClient, token: impl Into<String>) -> Self {
        Self {
            api,
            token: token.into(),
            state: RsvpPageState::Loading,
        }
    }

    pub fn state(&self) -> &RsvpPageState {
        &self.state
    }

    /// Safe to repeat: resolving never changes the invitation.
    pub async fn load(&mut self) -> &RsvpPageState {
        self.state = match self.api.resolve_rsvp(&self.token).await {
            Ok(resolution) if resolution.responded => RsvpPageState::Recorded(None),
            Ok(resolution) => RsvpPageState::Invitation(resolution.event),
            Err(e) => {
                warn!("Error fetching event details: {}", e);
                RsvpPageState::Failed(e.message().to_string())
            }
        };
        &self.state
    }

    pub fn can_decide(&self) -> bool {
        matches!(self.state, RsvpPageState::Invitation(_))
    }

    /// Day-first date for the invitation card.
    pub fn display_date(&self) -> Option<String> {
        match &self.state {
            RsvpPageState::Invitation(event) => Some(display_date(&event.date)),
            _ => None,
        }
    }

    /// Sends the one decision this token allows. After success, or after the
    /// server reports the token as already used, the page is in `Recorded` for good.
    pub async fn decide(&mut self, decision: RsvpDecision) -> Result<RsvpStatus, ClientError> {
        match self.state {
            RsvpPageState::Invitation(_) => {}
            RsvpPageState::Recorded(_) => return Err(ClientError::Conflict(ALREADY_RESPONDED.into())),
            RsvpPageState::Loading | RsvpPageState::Failed(_) => {
                return Err(ClientError::Validation("Invitation is not loaded".into()))
            }
        }

        match self.api.decide_rsvp(&self.token, decision).await {
            Ok(receipt) => {
                info!("RSVP updated: {}", receipt.rsvp_status);
                self.state = RsvpPageState::Recorded(Some(receipt.rsvp_status));
                Ok(receipt.rsvp_status)
            }
            Err(e @ ClientError::Conflict(_)) => {
                self.state = RsvpPageState::Recorded(None);
                Err(e)
            }
            Err(ClientError::NotFound(message)) => {
                self.state = RsvpPageState::Failed(message.clone());
                Err(ClientError::NotFound(message))
            }
            // The invitation is still pending; the guest may try again.
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api_client::ClientConfig;
    use std::time::Duration;

    fn offline_page() -> RsvpPage {
        let api = ApiClient::new(&ClientConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout: Duration::from_secs(1),
        }).unwrap();
        RsvpPage::new(api, "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA")
    }

    #[tokio::test]
    async fn deciding_before_load_is_refused_locally() {
        let mut page = offline_page();

        assert!(!page.can_decide());
        let err = page.decide(RsvpDecision::Accepted).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(page.state(), &RsvpPageState::Loading);
    }

    #[tokio::test]
    async fn recorded_page_never_offers_a_second_decision() {
        let mut page = offline_page();
        page.state = RsvpPageState::Recorded(Some(RsvpStatus::Accepted));

        let err = page.decide(RsvpDecision::Declined).await.unwrap_err();

        assert_eq!(err, ClientError::Conflict(ALREADY_RESPONDED.into()));
        assert_eq!(page.state(), &RsvpPageState::Recorded(Some(RsvpStatus::Accepted)));
    }

    #[tokio::test]
    async fn load_failure_is_shown_not_raised() {
        let mut page = offline_page();

        let state = page.load().await.clone();

        assert_eq!(state, RsvpPageState::Failed(ClientError::network().message().to_string()));
        assert!(!page.can_decide());
    }
}
