//! Event field validation
//!
//! Bounds match the create/edit form contract. All violations are
//! collected so a caller can surface every bad field at once.

use chrono::{NaiveDate, NaiveTime};

use crate::error::FieldError;
use crate::models::EventDraft;

fn check_len(
    errors: &mut Vec<FieldError>,
    field: &str,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    let len = value.chars().count();
    if len < min {
        errors.push(FieldError::new(
            field,
            format!("{label} must be at least {min} characters long"),
        ));
    } else if len > max {
        errors.push(FieldError::new(
            field,
            format!("{label} must not exceed {max} characters"),
        ));
    }
}

/// Validate every field of a draft against its bounds.
///
/// `today` is the calendar date the "not in the past" rule is evaluated
/// against.
pub fn validate_draft(draft: &EventDraft, today: NaiveDate) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    check_len(&mut errors, "title", "Title", &draft.title, 3, 100);
    check_len(
        &mut errors,
        "description",
        "Description",
        &draft.description,
        10,
        1000,
    );

    if draft.date < today {
        errors.push(FieldError::new("date", "Date cannot be in the past"));
    }

    if NaiveTime::parse_from_str(&draft.time, "%H:%M").is_err() {
        errors.push(FieldError::new("time", "Please select a valid time"));
    }

    check_len(&mut errors, "venue", "Venue", &draft.venue, 3, 100);
    check_len(&mut errors, "artist", "Artist name", &draft.artist, 2, 100);

    if !draft.ticket_price.is_finite() || draft.ticket_price < 0.0 {
        errors.push(FieldError::new(
            "ticketPrice",
            "Please enter a valid positive price",
        ));
    } else if draft.ticket_price > 10_000.0 {
        errors.push(FieldError::new(
            "ticketPrice",
            "Ticket price cannot exceed $10,000",
        ));
    } else {
        // At most two fractional digits
        let cents = draft.ticket_price * 100.0;
        if (cents - cents.round()).abs() > 1e-6 {
            errors.push(FieldError::new(
                "ticketPrice",
                "Ticket price must have at most 2 decimal places",
            ));
        }
    }

    if draft.capacity < 1 {
        errors.push(FieldError::new("capacity", "Capacity must be at least 1"));
    } else if draft.capacity > 100_000 {
        errors.push(FieldError::new(
            "capacity",
            "Capacity cannot exceed 100,000",
        ));
    }

    check_len(&mut errors, "genre", "Genre", &draft.genre, 2, 50);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
