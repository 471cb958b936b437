use chrono::{NaiveDate, NaiveTime};

use crate::client::error::ClientError;
use crate::domain::models::event::{time_of_day, EventDetails};

/// Raw input of the signup form. Checked locally before anything is sent.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ClientError::Validation("Email and password are required".into()));
        }
        if self.password != self.confirm_password {
            return Err(ClientError::Validation("Passwords do not match".into()));
        }
        Ok(())
    }
}

/// Raw input of the add/update event drawers: all four fields, as typed.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

impl EventForm {
    pub fn from_event(details: &EventDetails) -> Self {
        Self {
            name: details.name.clone(),
            date: details.date.format("%Y-%m-%d").to_string(),
            time: time_of_day::format(&details.time),
            location: details.location.clone(),
        }
    }

    pub fn validate(&self) -> Result<EventDetails, ClientError> {
        let fields = [&self.name, &self.date, &self.time, &self.location];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ClientError::Validation("All fields are required".into()));
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ClientError::Validation("Date must be in YYYY-MM-DD format".into()))?;
        let time = time_of_day::parse(self.time.trim())
            .ok_or_else(|| ClientError::Validation("Time must be in HH:MM format".into()))?;

        Ok(EventDetails {
            name: self.name.clone(),
            date,
            time,
            location: self.location.clone(),
        })
    }
}
