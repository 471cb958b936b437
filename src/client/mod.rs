//! Client core of the organizer console and the public RSVP page.
//!
//! Everything here talks to the service over HTTP through [`ApiClient`]; no
//! state is shared with the server side of the crate besides the wire types.

pub mod api_client;
pub mod console;
pub mod error;
pub mod forms;
pub mod rsvp_page;
pub mod session;

pub use api_client::{ApiClient, ClientConfig};
pub use console::{Notice, OrganizerConsole};
pub use error::ClientError;
pub use forms::{EventForm, SignupForm};
pub use rsvp_page::{RsvpPage, RsvpPageState};
pub use session::{GuardOutcome, MemorySessionStore, Session, SessionStore};
