//! User storage operations

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid, role_from_str, OptionalExt};
use crate::error::Result;
use crate::models::{Role, User};

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, role, created_at";

pub struct UserStore<'a> {
    conn: &'a Connection,
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        password_hash: row.get(4)?,
        role: role_from_str(&row.get::<_, String>(5)?),
        created_at: parse_datetime(&row.get::<_, String>(6)?)?,
    })
}

impl<'a> UserStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new user
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub fn create(&self, user: &User) -> Result<()> {
        self.conn.execute(
            "INSERT INTO users (id, first_name, last_name, email, password_hash, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.id.to_string(),
                user.first_name,
                user.last_name,
                user.email,
                user.password_hash,
                user.role.as_str(),
                user.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find user by email (the login key)
    #[instrument(skip(self))]
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"))?;

        let user = stmt.query_row(params![email], user_from_row).optional()?;

        Ok(user)
    }

    /// Find user by stored password hash
    ///
    /// Backs the duplicate-password rule: the comparison is on the hash,
    /// not the plaintext.
    #[instrument(skip(self, password_hash))]
    pub fn find_by_password_hash(&self, password_hash: &str) -> Result<Option<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE password_hash = ?1"
        ))?;

        let user = stmt
            .query_row(params![password_hash], user_from_row)
            .optional()?;

        Ok(user)
    }

    /// Persist a role change
    #[instrument(skip(self))]
    pub fn update_role(&self, user_id: Uuid, role: Role) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET role = ?1 WHERE id = ?2",
            params![role.as_str(), user_id.to_string()],
        )?;
        Ok(())
    }
}
