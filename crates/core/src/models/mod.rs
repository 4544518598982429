//! Domain models

mod event;
mod user;

pub use event::{Event, EventDraft};
pub use user::{AuthenticatedUser, Role, User};
