use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveTime};

use crate::domain::models::{event::{Event, time_of_day}, guest::Guest};

/// Message of the conflict returned for a token that has already been answered.
pub const ALREADY_RESPONDED: &str = "Your response has already been recorded";

/// What an anonymous token holder may see of an event.
/// Built field by field so ids, owner and other guests can never leak through.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RsvpEventView {
    pub name: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RsvpResolution {
    pub event: RsvpEventView,
    /// A decision is already recorded for this token; only the confirmation view may be shown.
    pub responded: bool,
}

impl RsvpResolution {
    pub fn new(event: &Event, guest: &Guest) -> Self {
        Self {
            event: RsvpEventView {
                name: event.name.clone(),
                date: event.date,
                time: event.time,
                location: event.location.clone(),
            },
            responded: guest.rsvp_status.is_decided(),
        }
    }
}
