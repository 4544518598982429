//! RhythmPulse Core Library
//!
//! Domain models, validation, the Event Catalog and Auth services, and
//! SQLite storage for the RhythmPulse platform.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod models;
pub mod storage;
pub mod validate;

pub use auth::{derive_role, AuthService};
pub use catalog::EventCatalog;
pub use error::{Error, FieldError, Result};
pub use models::*;
pub use storage::{Database, EventRepository, UserRepository};
