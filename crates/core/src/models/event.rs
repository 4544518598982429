//! Event model - a schedulable performance record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A music event listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    /// Local time-of-day, `HH:MM`
    pub time: String,
    pub venue: String,
    pub artist: String,
    pub genre: String,
    pub ticket_price: f64,
    pub capacity: u32,
}

/// The full set of mutable event fields, as submitted by the create/edit
/// form. Every field is required; an update replaces all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub venue: String,
    pub artist: String,
    pub genre: String,
    pub ticket_price: f64,
    pub capacity: u32,
}

impl Event {
    /// Materialize a validated draft with a fresh store-assigned id
    pub fn from_draft(draft: EventDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            time: draft.time,
            venue: draft.venue,
            artist: draft.artist,
            genre: draft.genre,
            ticket_price: draft.ticket_price,
            capacity: draft.capacity,
        }
    }

    /// Overwrite all mutable fields from a draft, keeping the id
    pub fn apply_draft(&mut self, draft: EventDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.date = draft.date;
        self.time = draft.time;
        self.venue = draft.venue;
        self.artist = draft.artist;
        self.genre = draft.genre;
        self.ticket_price = draft.ticket_price;
        self.capacity = draft.capacity;
    }
}
