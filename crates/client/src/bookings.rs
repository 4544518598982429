//! Booking Ledger
//!
//! Client-local bookings layered on top of event snapshots. Bookings are
//! never validated against the live catalog: the snapshot taken at
//! booking time is what the ledger keeps. Each booking carries a
//! generated id, which is how later edits and deletes address it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::kv::LocalStore;

/// Storage key holding the serialized booking list
const BOOKINGS_KEY: &str = "userBookings";

/// Booker contact and ticket details, as submitted by the booking form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tickets: u32,
    pub special_requirements: String,
}

/// A stored booking: contact details plus a denormalized event snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub event_title: String,
    pub event_date: NaiveDate,
    pub event_venue: String,
    pub ticket_price: f64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tickets: u32,
    pub special_requirements: String,
    /// Always ticket_price × tickets, never edited independently
    pub total_amount: f64,
    pub booked_at: DateTime<Utc>,
}

/// Snapshot of the event being booked, captured at booking time
#[derive(Debug, Clone, PartialEq)]
pub struct EventSnapshot {
    pub title: String,
    pub date: NaiveDate,
    pub venue: String,
    pub ticket_price: f64,
}

/// Ledger of the client's bookings, persisted in the durable store
pub struct BookingLedger<'a> {
    store: &'a LocalStore,
}

impl<'a> BookingLedger<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// All bookings in insertion order
    pub fn list(&self) -> Result<Vec<Booking>> {
        match self.store.get(BOOKINGS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, bookings: &[Booking]) -> Result<()> {
        let raw = serde_json::to_string(bookings)?;
        self.store.set(BOOKINGS_KEY, &raw)
    }

    /// Record a new booking against an event snapshot
    pub fn add(&self, event: &EventSnapshot, draft: BookingDraft) -> Result<Booking> {
        let booking = Booking {
            id: Uuid::new_v4(),
            event_title: event.title.clone(),
            event_date: event.date,
            event_venue: event.venue.clone(),
            ticket_price: event.ticket_price,
            total_amount: event.ticket_price * f64::from(draft.tickets),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            tickets: draft.tickets,
            special_requirements: draft.special_requirements,
            booked_at: Utc::now(),
        };

        let mut bookings = self.list()?;
        bookings.push(booking.clone());
        self.save(&bookings)?;
        Ok(booking)
    }

    /// Replace the contact and ticket details of an existing booking.
    ///
    /// The event snapshot, id, and booking timestamp are kept; the total
    /// is recomputed from the snapshot price and the new ticket count.
    pub fn update(&self, id: Uuid, draft: BookingDraft) -> Result<Booking> {
        let mut bookings = self.list()?;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| Error::NotFound("Booking not found".into()))?;

        booking.total_amount = booking.ticket_price * f64::from(draft.tickets);
        booking.name = draft.name;
        booking.email = draft.email;
        booking.phone = draft.phone;
        booking.tickets = draft.tickets;
        booking.special_requirements = draft.special_requirements;

        let updated = booking.clone();
        self.save(&bookings)?;
        Ok(updated)
    }

    /// Remove a booking
    pub fn delete(&self, id: Uuid) -> Result<()> {
        let mut bookings = self.list()?;
        let before = bookings.len();
        bookings.retain(|b| b.id != id);
        if bookings.len() == before {
            return Err(Error::NotFound("Booking not found".into()));
        }
        self.save(&bookings)
    }
}
