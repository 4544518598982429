//! Event storage operations

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_date, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::Event;

const EVENT_COLUMNS: &str =
    "id, title, description, date, time, venue, artist, genre, ticket_price, capacity";

pub struct EventStore<'a> {
    conn: &'a Connection,
}

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        title: row.get(1)?,
        description: row.get(2)?,
        date: parse_date(&row.get::<_, String>(3)?)?,
        time: row.get(4)?,
        venue: row.get(5)?,
        artist: row.get(6)?,
        genre: row.get(7)?,
        ticket_price: row.get(8)?,
        capacity: row.get(9)?,
    })
}

impl<'a> EventStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new event
    #[instrument(skip(self, event), fields(title = %event.title))]
    pub fn create(&self, event: &Event) -> Result<()> {
        self.conn.execute(
            "INSERT INTO events (id, title, description, date, time, venue, artist, genre, ticket_price, capacity)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                event.id.to_string(),
                event.title,
                event.description,
                event.date.to_string(),
                event.time,
                event.venue,
                event.artist,
                event.genre,
                event.ticket_price,
                event.capacity,
            ],
        )?;
        Ok(())
    }

    /// Find event by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"))?;

        let event = stmt
            .query_row(params![id.to_string()], event_from_row)
            .optional()?;

        Ok(event)
    }

    /// Overwrite all mutable fields of an event
    ///
    /// Returns false when no row with that id exists.
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    pub fn update(&self, event: &Event) -> Result<bool> {
        let affected = self.conn.execute(
            "UPDATE events SET title = ?1, description = ?2, date = ?3, time = ?4, venue = ?5,
                    artist = ?6, genre = ?7, ticket_price = ?8, capacity = ?9
             WHERE id = ?10",
            params![
                event.title,
                event.description,
                event.date.to_string(),
                event.time,
                event.venue,
                event.artist,
                event.genre,
                event.ticket_price,
                event.capacity,
                event.id.to_string(),
            ],
        )?;
        Ok(affected > 0)
    }

    /// Delete an event
    ///
    /// Returns false when no row with that id exists.
    #[instrument(skip(self))]
    pub fn delete(&self, id: Uuid) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }

    /// List events ordered by date ascending, optionally filtered by a
    /// search term
    ///
    /// A term matches when it is a case-insensitive substring of ANY of
    /// title, description, artist, venue, or genre. `instr` keeps `%`
    /// and `_` in the term literal, unlike LIKE.
    #[instrument(skip(self))]
    pub fn list(&self, search: Option<&str>) -> Result<Vec<Event>> {
        let mut stmt;
        let rows = match search {
            Some(term) if !term.is_empty() => {
                stmt = self.conn.prepare(&format!(
                    "SELECT {EVENT_COLUMNS} FROM events
                     WHERE instr(lower(title), ?1) > 0
                        OR instr(lower(description), ?1) > 0
                        OR instr(lower(artist), ?1) > 0
                        OR instr(lower(venue), ?1) > 0
                        OR instr(lower(genre), ?1) > 0
                     ORDER BY date, time"
                ))?;
                stmt.query_map(params![term.to_lowercase()], event_from_row)?
            }
            _ => {
                stmt = self.conn.prepare(&format!(
                    "SELECT {EVENT_COLUMNS} FROM events ORDER BY date, time"
                ))?;
                stmt.query_map([], event_from_row)?
            }
        };

        let events = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDraft;
    use crate::storage::Database;
    use chrono::NaiveDate;

    fn draft(title: &str, date: (i32, u32, u32)) -> EventDraft {
        EventDraft {
            title: title.into(),
            description: "An evening of live music.".into(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time: "20:00".into(),
            venue: "Blue Note".into(),
            artist: "Miles".into(),
            genre: "Jazz".into(),
            ticket_price: 49.99,
            capacity: 200,
        }
    }

    #[test]
    fn test_create_and_find() {
        let db = Database::open_in_memory().unwrap();
        let store = db.events();

        let event = Event::from_draft(draft("Jazz Night", (2031, 6, 1)));
        store.create(&event).unwrap();

        let found = store.find_by_id(event.id).unwrap().unwrap();
        assert_eq!(found, event);
    }

    #[test]
    fn test_find_missing_returns_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.events().find_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_update_overwrites_all_fields() {
        let db = Database::open_in_memory().unwrap();
        let store = db.events();

        let mut event = Event::from_draft(draft("Jazz Night", (2031, 6, 1)));
        store.create(&event).unwrap();

        event.apply_draft(EventDraft {
            title: "Rock Night".into(),
            description: "Completely different evening.".into(),
            date: NaiveDate::from_ymd_opt(2031, 7, 2).unwrap(),
            time: "21:30".into(),
            venue: "The Garage".into(),
            artist: "The Amps".into(),
            genre: "Rock".into(),
            ticket_price: 25.0,
            capacity: 500,
        });
        assert!(store.update(&event).unwrap());

        let found = store.find_by_id(event.id).unwrap().unwrap();
        assert_eq!(found, event);
    }

    #[test]
    fn test_update_missing_reports_no_rows() {
        let db = Database::open_in_memory().unwrap();
        let event = Event::from_draft(draft("Jazz Night", (2031, 6, 1)));
        assert!(!db.events().update(&event).unwrap());
    }

    #[test]
    fn test_delete_twice_reports_no_rows() {
        let db = Database::open_in_memory().unwrap();
        let store = db.events();

        let event = Event::from_draft(draft("Jazz Night", (2031, 6, 1)));
        store.create(&event).unwrap();

        assert!(store.delete(event.id).unwrap());
        assert!(store.find_by_id(event.id).unwrap().is_none());
        assert!(!store.delete(event.id).unwrap());
    }

    #[test]
    fn test_list_sorted_by_date_ascending() {
        let db = Database::open_in_memory().unwrap();
        let store = db.events();

        // Inserted out of order
        store
            .create(&Event::from_draft(draft("Third", (2031, 9, 1))))
            .unwrap();
        store
            .create(&Event::from_draft(draft("First", (2031, 1, 1))))
            .unwrap();
        store
            .create(&Event::from_draft(draft("Second", (2031, 5, 1))))
            .unwrap();

        let titles: Vec<String> = store
            .list(None)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_search_matches_any_field_case_insensitively() {
        let db = Database::open_in_memory().unwrap();
        let store = db.events();

        let event = Event::from_draft(draft("Jazz Night", (2031, 6, 1)));
        store.create(&event).unwrap();

        // venue substring, mixed case
        let hits = store.list(Some("BLUE")).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, event.id);

        // artist substring
        assert_eq!(store.list(Some("miles")).unwrap().len(), 1);
        // genre substring
        assert_eq!(store.list(Some("jaz")).unwrap().len(), 1);
        // description substring
        assert_eq!(store.list(Some("live music")).unwrap().len(), 1);

        // no match is an empty list, not an error
        assert!(store.list(Some("rock")).unwrap().is_empty());
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let db = Database::open_in_memory().unwrap();
        let store = db.events();
        store
            .create(&Event::from_draft(draft("Jazz Night", (2031, 6, 1))))
            .unwrap();

        assert!(store.list(Some("%")).unwrap().is_empty());
        assert!(store.list(Some("_")).unwrap().is_empty());
    }
}
