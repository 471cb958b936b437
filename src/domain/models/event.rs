use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// The four organizer-editable fields. Updates always resend all of them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventDetails {
    pub name: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
    pub location: String,
}

impl Event {
    pub fn new(owner_id: String, details: EventDetails) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            name: details.name,
            date: details.date,
            time: details.time,
            location: details.location,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    /// Full replace of the mutable fields; id, owner and creation time stay.
    pub fn apply(&mut self, details: EventDetails) {
        self.name = details.name;
        self.date = details.date;
        self.time = details.time;
        self.location = details.location;
    }

    pub fn details(&self) -> EventDetails {
        EventDetails {
            name: self.name.clone(),
            date: self.date,
            time: self.time,
            location: self.location.clone(),
        }
    }
}

/// Day-first rendering used in invitation mails and on the RSVP page, e.g. `01-06-2025`.
pub fn display_date(date: &NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// `HH:MM` on the wire, the format of an HTML time input. Seconds are kept
/// and written as `HH:MM:SS` when they are not zero.
pub mod time_of_day {
    use chrono::{NaiveTime, Timelike};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn format(time: &NaiveTime) -> String {
        if time.second() == 0 {
            time.format("%H:%M").to_string()
        } else {
            time.format("%H:%M:%S").to_string()
        }
    }

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .ok()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid time '{}', expected HH:MM", raw)))
    }
}
