pub mod auth_service;
pub mod invitation_service;
pub mod rsvp_service;
pub mod rsvp_token;
