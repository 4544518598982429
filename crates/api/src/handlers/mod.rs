//! Request handlers for the REST surface

pub mod events;
pub mod users;
