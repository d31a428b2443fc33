//! Cities, jobs, skills and topics, plus the referential checks other writes rely on.

use crewlink_types::EntityId;
use crewlink_types::models::{City, Job, Tag, TagStatus};
use rusqlite::{Connection, OptionalExtension, Row};

use crate::{DbError, DbResult};

/// Skills and topics live in two tables with identical columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Skill,
    Topic,
}

impl TagKind {
    pub(crate) fn table(&self) -> &'static str {
        match self {
            TagKind::Skill => "skills",
            TagKind::Topic => "topics",
        }
    }
}

/// Fail with a constraint violation unless `table` has a row with `id`.
///
/// `table` is always one of this crate's own table names.
pub(crate) fn ensure_exists(
    conn: &Connection,
    table: &str,
    field: &str,
    id: EntityId,
) -> DbResult<()> {
    let found = conn
        .query_row(&format!("SELECT 1 FROM {table} WHERE id = ?1"), [id], |_| Ok(()))
        .optional()?;

    match found {
        Some(()) => Ok(()),
        None => Err(DbError::ConstraintViolation(format!(
            "{field} {id} does not reference an existing row in {table}"
        ))),
    }
}

// -- Cities --

pub fn insert_city(conn: &Connection, name: &str) -> DbResult<City> {
    conn.execute("INSERT INTO cities (name) VALUES (?1)", [name])?;
    Ok(City {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

pub fn list_cities(conn: &Connection) -> DbResult<Vec<City>> {
    let mut stmt = conn.prepare("SELECT id, name FROM cities ORDER BY name")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(City {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// -- Jobs --

pub fn insert_job(conn: &Connection, title: &str) -> DbResult<Job> {
    conn.execute("INSERT INTO jobs (title) VALUES (?1)", [title])?;
    Ok(Job {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
    })
}

pub fn list_jobs(conn: &Connection) -> DbResult<Vec<Job>> {
    let mut stmt = conn.prepare("SELECT id, title FROM jobs ORDER BY title")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Job {
                id: row.get(0)?,
                title: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// -- Skills and topics --

pub fn insert_tag(conn: &Connection, kind: TagKind, title: &str, status: TagStatus) -> DbResult<Tag> {
    conn.execute(
        &format!("INSERT INTO {} (title, status) VALUES (?1, ?2)", kind.table()),
        [title, status.as_str()],
    )?;
    Ok(Tag {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
        status,
    })
}

pub fn list_tags(conn: &Connection, kind: TagKind) -> DbResult<Vec<Tag>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, title, status FROM {} ORDER BY title",
        kind.table()
    ))?;
    let rows = stmt
        .query_map([], tag_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Map `(id, title, status)` columns to a [`Tag`].
pub(crate) fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    let status: String = row.get(2)?;
    let status = status.parse::<TagStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
    })?;

    Ok(Tag {
        id: row.get(0)?,
        title: row.get(1)?,
        status,
    })
}
