//! Application state shared across request handlers

use std::sync::{Arc, Mutex};

use rhythmpulse_core::Database;

/// Shared handler state
///
/// rusqlite connections are not Sync, so the database sits behind a
/// mutex; every operation is a single short store access.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }
}
