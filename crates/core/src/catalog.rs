//! Event Catalog Service
//!
//! Create/read/update/delete for catalog events, plus the search listing.
//! Validation happens here, before anything touches the store.

use chrono::Local;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Event, EventDraft};
use crate::storage::Database;
use crate::validate::validate_draft;

pub struct EventCatalog<'a> {
    db: &'a Database,
}

impl<'a> EventCatalog<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List events ordered by date ascending.
    ///
    /// With a search term, returns events where the term matches
    /// case-insensitively as a substring of any of title, description,
    /// artist, venue, or genre. No match is an empty list, not an error.
    #[instrument(skip(self))]
    pub fn list(&self, search: Option<&str>) -> Result<Vec<Event>> {
        self.db.events().list(search)
    }

    /// Fetch a single event
    #[instrument(skip(self))]
    pub fn get(&self, id: Uuid) -> Result<Event> {
        self.db
            .events()
            .find_by_id(id)?
            .ok_or_else(|| Error::NotFound("Event not found".into()))
    }

    /// Validate and persist a new event, returning the stored record
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create(&self, draft: EventDraft) -> Result<Event> {
        validate_draft(&draft, Local::now().date_naive()).map_err(Error::Validation)?;

        let event = Event::from_draft(draft);
        self.db.events().create(&event)?;
        info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    /// Replace all mutable fields of an existing event
    ///
    /// Update is a full-field overwrite, not a sparse merge: the draft
    /// must carry every field, exactly as the edit form submits it.
    #[instrument(skip(self, draft))]
    pub fn update(&self, id: Uuid, draft: EventDraft) -> Result<Event> {
        let mut event = self.get(id)?;
        validate_draft(&draft, Local::now().date_naive()).map_err(Error::Validation)?;

        event.apply_draft(draft);
        if !self.db.events().update(&event)? {
            return Err(Error::NotFound("Event not found".into()));
        }
        info!(event_id = %event.id, "Event updated");
        Ok(event)
    }

    /// Delete an event
    ///
    /// Not idempotent: deleting an already-deleted id is NotFound again.
    #[instrument(skip(self))]
    pub fn delete(&self, id: Uuid) -> Result<()> {
        if !self.db.events().delete(id)? {
            return Err(Error::NotFound("Event not found".into()));
        }
        info!(event_id = %id, "Event deleted");
        Ok(())
    }
}
