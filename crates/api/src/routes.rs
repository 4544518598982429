//! Router composition
//!
//! # Routes
//!
//! ## Events
//! - `GET /events?search=<term>` - List events, date ascending
//! - `GET /events/:id` - Fetch one event
//! - `POST /events` - Create an event
//! - `PUT /events/:id` - Replace an event's fields
//! - `DELETE /events/:id` - Delete an event
//!
//! ## Users
//! - `POST /users/register` - Register an account
//! - `POST /users/login` - Authenticate and fetch identity + role

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{events, users};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{Duration, Local};
    use rhythmpulse_core::Database;
    use serde_json::{json, Value};

    fn test_server() -> TestServer {
        let db = Database::open_in_memory().unwrap();
        TestServer::new(router(AppState::new(db))).unwrap()
    }

    fn jazz_night() -> Value {
        let tomorrow = (Local::now().date_naive() + Duration::days(1)).to_string();
        json!({
            "title": "Jazz Night",
            "description": "An evening of jazz.",
            "date": tomorrow,
            "time": "20:00",
            "venue": "Blue Note",
            "artist": "Miles",
            "genre": "Jazz",
            "ticketPrice": 49.99,
            "capacity": 200
        })
    }

    #[tokio::test]
    async fn test_event_crud_cycle() {
        let server = test_server();

        let created = server.post("/events").json(&jazz_night()).await;
        created.assert_status(StatusCode::CREATED);
        let body: Value = created.json();
        let id = body["id"].as_str().unwrap().to_string();
        assert_eq!(body["ticketPrice"], json!(49.99));

        let fetched = server.get(&format!("/events/{id}")).await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Value>()["title"], "Jazz Night");

        let mut edit = jazz_night();
        edit["title"] = json!("Late Jazz Night");
        let updated = server.put(&format!("/events/{id}")).json(&edit).await;
        updated.assert_status_ok();
        assert_eq!(updated.json::<Value>()["title"], "Late Jazz Night");

        let deleted = server.delete(&format!("/events/{id}")).await;
        deleted.assert_status_ok();
        assert_eq!(
            deleted.json::<Value>()["message"],
            "Event deleted successfully"
        );

        // Gone now, and a second delete is 404 too
        server
            .get(&format!("/events/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&format!("/events/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_and_search() {
        let server = test_server();
        server.post("/events").json(&jazz_night()).await;

        let all: Value = server.get("/events").await.json();
        assert_eq!(all.as_array().unwrap().len(), 1);

        let hits: Value = server
            .get("/events")
            .add_query_param("search", "blue")
            .await
            .json();
        assert_eq!(hits.as_array().unwrap().len(), 1);
        assert_eq!(hits[0]["title"], "Jazz Night");

        let misses: Value = server
            .get("/events")
            .add_query_param("search", "rock")
            .await
            .json();
        assert!(misses.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_invalid_returns_field_tagged_400() {
        let server = test_server();

        let mut draft = jazz_night();
        draft["title"] = json!("ab");
        let response = server.post("/events").json(&draft).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["field"], "title");
        assert_eq!(body["message"], "Title must be at least 3 characters long");
    }

    #[tokio::test]
    async fn test_not_found_body_has_message_without_field() {
        let server = test_server();

        let response = server
            .get("/events/00000000-0000-0000-0000-000000000000")
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["message"], "Event not found");
        assert!(body.get("field").is_none());
    }

    #[tokio::test]
    async fn test_non_uuid_event_id_is_not_found() {
        let server = test_server();
        server
            .get("/events/not-a-uuid")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    fn ada() -> Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "hunter22"
        })
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let server = test_server();

        let registered = server.post("/users/register").json(&ada()).await;
        registered.assert_status(StatusCode::CREATED);
        assert_eq!(
            registered.json::<Value>()["message"],
            "User registered successfully"
        );

        let login = server
            .post("/users/login")
            .json(&json!({ "email": "ada@example.com", "password": "hunter22" }))
            .await;
        login.assert_status_ok();
        let body: Value = login.json();
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["user"]["firstName"], "Ada");
        assert_eq!(body["user"]["role"], "user");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_and_password() {
        let server = test_server();
        server.post("/users/register").json(&ada()).await;

        let same_email = server.post("/users/register").json(&ada()).await;
        same_email.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = same_email.json();
        assert_eq!(body["field"], "email");
        assert_eq!(body["message"], "Email already exists, login instead");

        // Different email, same password
        let mut bob = ada();
        bob["email"] = json!("bob@example.com");
        let same_password = server.post("/users/register").json(&bob).await;
        same_password.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = same_password.json();
        assert_eq!(body["field"], "password");
        assert_eq!(
            body["message"],
            "This password is already in use by another account"
        );
    }

    #[tokio::test]
    async fn test_login_failures_are_field_tagged() {
        let server = test_server();
        server.post("/users/register").json(&ada()).await;

        let unknown = server
            .post("/users/login")
            .json(&json!({ "email": "ghost@example.com", "password": "x" }))
            .await;
        unknown.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = unknown.json();
        assert_eq!(body["field"], "email");
        assert_eq!(body["message"], "Email not found");

        let wrong = server
            .post("/users/login")
            .json(&json!({ "email": "ada@example.com", "password": "wrong" }))
            .await;
        wrong.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = wrong.json();
        assert_eq!(body["field"], "password");
        assert_eq!(body["message"], "Invalid password");
    }

    #[tokio::test]
    async fn test_admin_email_logs_in_with_admin_role() {
        let server = test_server();

        let mut admin = ada();
        admin["email"] = json!("CorRPAdmin@example.com");
        admin["password"] = json!("another-pw");
        server.post("/users/register").json(&admin).await;

        let login = server
            .post("/users/login")
            .json(&json!({ "email": "CorRPAdmin@example.com", "password": "another-pw" }))
            .await;
        login.assert_status_ok();
        assert_eq!(login.json::<Value>()["user"]["role"], "admin");
    }
}
