//! Web layer for the registry lookup.
//!
//! Serves the page, the htmx fragments and the event endpoints that drive
//! each session's view controller.

mod dto;
mod routes;
mod session;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use session::{SESSION_COOKIE, Session, SessionConfig, SessionStore, session_id};
pub use state::AppState;
