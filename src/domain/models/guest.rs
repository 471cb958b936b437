use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::services::rsvp_token;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RsvpStatus {
    Pending,
    Accepted,
    Declined,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Pending => "Pending",
            RsvpStatus::Accepted => "Accepted",
            RsvpStatus::Declined => "Declined",
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, RsvpStatus::Pending)
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown rsvp status '{0}'")]
pub struct UnknownRsvpStatus(pub String);

impl FromStr for RsvpStatus {
    type Err = UnknownRsvpStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(RsvpStatus::Pending),
            "Accepted" => Ok(RsvpStatus::Accepted),
            "Declined" => Ok(RsvpStatus::Declined),
            other => Err(UnknownRsvpStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for RsvpStatus {
    type Error = UnknownRsvpStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The answers a guest can give. `Pending` is deliberately not representable.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RsvpDecision {
    Accepted,
    Declined,
}

impl From<RsvpDecision> for RsvpStatus {
    fn from(decision: RsvpDecision) -> Self {
        match decision {
            RsvpDecision::Accepted => RsvpStatus::Accepted,
            RsvpDecision::Declined => RsvpStatus::Declined,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: String,
    pub event_id: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub rsvp_status: RsvpStatus,
    #[serde(skip)]
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl Guest {
    /// Creates a pending guest together with the raw RSVP token bound to it.
    /// Only the token's hash is kept on the guest.
    pub fn invite(event_id: String, email: String) -> (Self, String) {
        let token = rsvp_token::mint();

        let guest = Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            email,
            rsvp_status: RsvpStatus::Pending,
            token_hash: rsvp_token::hash(&token),
            created_at: Utc::now(),
            responded_at: None,
        };

        (guest, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invited_guest_starts_pending() {
        let (guest, token) = Guest::invite("event-1".into(), "a@x.com".into());

        assert_eq!(guest.rsvp_status, RsvpStatus::Pending);
        assert!(guest.responded_at.is_none());
        assert_eq!(guest.token_hash, rsvp_token::hash(&token));
        assert_ne!(guest.token_hash, token);
    }

    #[test]
    fn two_invites_for_the_same_email_are_independent() {
        let (a, token_a) = Guest::invite("event-1".into(), "a@x.com".into());
        let (b, token_b) = Guest::invite("event-1".into(), "a@x.com".into());

        assert_ne!(a.id, b.id);
        assert_ne!(token_a, token_b);
    }

    #[test]
    fn status_round_trips_through_its_column_text() {
        for status in [RsvpStatus::Pending, RsvpStatus::Accepted, RsvpStatus::Declined] {
            assert_eq!(status.as_str().parse::<RsvpStatus>().unwrap(), status);
        }
        assert!("maybe".parse::<RsvpStatus>().is_err());
    }

    #[test]
    fn pending_is_not_a_decision() {
        let parsed: Result<RsvpDecision, _> = serde_json::from_str("\"Pending\"");
        assert!(parsed.is_err());

        let parsed: RsvpDecision = serde_json::from_str("\"Declined\"").unwrap();
        assert_eq!(RsvpStatus::from(parsed), RsvpStatus::Declined);
    }

    #[test]
    fn token_hash_is_not_serialized() {
        let (guest, _) = Guest::invite("event-1".into(), "a@x.com".into());
        let value = serde_json::to_value(&guest).unwrap();

        assert!(value.get("tokenHash").is_none());
        assert_eq!(value["rsvpStatus"], "Pending");
        assert_eq!(value["eventId"], "event-1");
    }
}
