use chrono::Utc;
use crewlink_types::UserId;
use crewlink_types::models::{User, UserSummary};
use rusqlite::{Connection, OptionalExtension};

use crate::models::UserRow;
use crate::{Database, DbError, DbResult};

impl Database {
    pub fn create_user(&self, name: &str, email: &str, password_hash: &str) -> DbResult<UserId> {
        self.transaction(|conn| insert(conn, name, email, password_hash))
    }

    pub fn get_user_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        self.with_conn(|conn| find_row_by_email(conn, email))
    }
}

pub fn insert(conn: &Connection, name: &str, email: &str, password_hash: &str) -> DbResult<UserId> {
    conn.execute(
        "INSERT INTO users (name, email, password, created_at) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![name, email, password_hash, Utc::now()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find(conn: &Connection, id: UserId) -> DbResult<Option<User>> {
    conn.query_row(
        "SELECT id, name, created_at FROM users WHERE id = ?1",
        [id],
        |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(DbError::from)
}

pub fn get(conn: &Connection, id: UserId) -> DbResult<User> {
    find(conn, id)?.ok_or(DbError::NotFound { entity: "User", id })
}

pub fn summary(conn: &Connection, id: UserId) -> DbResult<UserSummary> {
    let user = get(conn, id)?;
    Ok(UserSummary {
        id: user.id,
        name: user.name,
    })
}

pub fn find_row_by_email(conn: &Connection, email: &str) -> DbResult<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, name, email, password, created_at FROM users WHERE email = ?1")?;

    stmt.query_row([email], |row| {
        Ok(UserRow {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
            created_at: row.get(4)?,
        })
    })
    .optional()
    .map_err(DbError::from)
}
