pub mod auth;
pub mod event;
pub mod guest;
pub mod rsvp;
pub mod user;
