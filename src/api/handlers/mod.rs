pub mod auth;
pub mod event;
pub mod guest;
pub mod health;
pub mod rsvp;
