//! Event catalog handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use rhythmpulse_core::{Error as CoreError, Event, EventCatalog, EventDraft};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

/// An id that does not parse as a UUID cannot name a stored event, so it
/// resolves to the same NotFound as an unknown id.
fn parse_event_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError(CoreError::NotFound("Event not found".into())))
}

/// `GET /events?search=<term>`
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let db = state.db.lock().unwrap();
    let events = EventCatalog::new(&db).list(params.search.as_deref())?;
    Ok(Json(events))
}

/// `GET /events/:id`
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let id = parse_event_id(&id)?;
    let db = state.db.lock().unwrap();
    let event = EventCatalog::new(&db).get(id)?;
    Ok(Json(event))
}

/// `POST /events`
pub async fn create_event(
    State(state): State<AppState>,
    Json(draft): Json<EventDraft>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let db = state.db.lock().unwrap();
    let event = EventCatalog::new(&db).create(draft)?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// `PUT /events/:id`
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<EventDraft>,
) -> Result<Json<Event>, ApiError> {
    let id = parse_event_id(&id)?;
    let db = state.db.lock().unwrap();
    let event = EventCatalog::new(&db).update(id, draft)?;
    Ok(Json(event))
}

/// `DELETE /events/:id`
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_event_id(&id)?;
    let db = state.db.lock().unwrap();
    EventCatalog::new(&db).delete(id)?;
    Ok(Json(json!({ "message": "Event deleted successfully" })))
}
