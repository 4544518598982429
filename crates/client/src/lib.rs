//! RhythmPulse Client Library
//!
//! Client-side state for the RhythmPulse frontend: durable key/value
//! storage, the session context, and the booking ledger. Server state
//! (the event catalog, accounts) lives behind the REST API; everything
//! here is local to one client instance.

pub mod bookings;
pub mod error;
pub mod kv;
pub mod session;

pub use bookings::{Booking, BookingDraft, BookingLedger, EventSnapshot};
pub use error::{Error, Result};
pub use kv::LocalStore;
pub use session::SessionContext;
