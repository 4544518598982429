//! Storage repository traits
//!
//! These traits define the storage interface, allowing for different
//! implementations (SQLite, mock, future network backend).

use uuid::Uuid;

use crate::error::Result;
use crate::models::{Event, Role, User};

/// Event repository operations
pub trait EventRepository {
    /// Create a new event
    fn create_event(&self, event: &Event) -> Result<()>;

    /// Find event by ID
    fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>>;

    /// Overwrite all mutable fields; false when the id is unknown
    fn update_event(&self, event: &Event) -> Result<bool>;

    /// Delete an event; false when the id is unknown
    fn delete_event(&self, id: Uuid) -> Result<bool>;

    /// List events by date ascending, optionally filtered by search term
    fn list_events(&self, search: Option<&str>) -> Result<Vec<Event>>;
}

/// User repository operations
pub trait UserRepository {
    /// Create a new user
    fn create_user(&self, user: &User) -> Result<()>;

    /// Find user by email
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Find user by stored password hash
    fn find_user_by_password_hash(&self, password_hash: &str) -> Result<Option<User>>;

    /// Persist a role change
    fn update_user_role(&self, user_id: Uuid, role: Role) -> Result<()>;
}
