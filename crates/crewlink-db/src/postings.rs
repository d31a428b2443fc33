//! Listings and job vacancies. Both are soft-deleted: default reads skip rows
//! whose `deleted_at` is set.

use chrono::{DateTime, Utc};
use crewlink_types::api::PostingFilter;
use crewlink_types::models::{Posting, PostingKind};
use crewlink_types::{EntityId, UserId};
use rusqlite::{Connection, OptionalExtension, Row};

use crate::reference::ensure_exists;
use crate::{DbError, DbResult};

const POSTING_COLUMNS: &str = "id, title, description, slug, posted_by, job_id, city_id, \
     is_active, ends_at, created_at, updated_at, deleted_at";

pub(crate) fn table(kind: PostingKind) -> &'static str {
    match kind {
        PostingKind::Listing => "listings",
        PostingKind::JobVacancy => "job_vacancies",
    }
}

pub struct NewPosting<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub slug: &'a str,
    pub posted_by: UserId,
    pub job_id: EntityId,
    pub city_id: EntityId,
    pub is_active: bool,
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Default)]
pub struct PostingPatch<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub city_id: Option<EntityId>,
    pub job_id: Option<EntityId>,
    pub is_active: Option<bool>,
    pub ends_at: Option<DateTime<Utc>>,
}

pub fn insert(conn: &Connection, kind: PostingKind, new: &NewPosting<'_>) -> DbResult<Posting> {
    ensure_exists(conn, "users", "posted_by", new.posted_by)?;
    ensure_exists(conn, "cities", "city_id", new.city_id)?;
    ensure_exists(conn, "jobs", "job_id", new.job_id)?;

    conn.execute(
        &format!(
            "INSERT INTO {} (title, description, slug, posted_by, job_id, city_id, is_active, ends_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
            table(kind)
        ),
        rusqlite::params![
            new.title,
            new.description,
            new.slug,
            new.posted_by,
            new.job_id,
            new.city_id,
            new.is_active,
            new.ends_at,
            new.created_at,
        ],
    )?;

    get(conn, kind, conn.last_insert_rowid())
}

/// Live (not soft-deleted) posting by id.
pub fn find(conn: &Connection, kind: PostingKind, id: EntityId) -> DbResult<Option<Posting>> {
    conn.query_row(
        &format!(
            "SELECT {POSTING_COLUMNS} FROM {} WHERE id = ?1 AND deleted_at IS NULL",
            table(kind)
        ),
        [id],
        posting_from_row,
    )
    .optional()
    .map_err(DbError::from)
}

/// Posting by id, soft-deleted or not.
pub fn find_including_deleted(
    conn: &Connection,
    kind: PostingKind,
    id: EntityId,
) -> DbResult<Option<Posting>> {
    conn.query_row(
        &format!("SELECT {POSTING_COLUMNS} FROM {} WHERE id = ?1", table(kind)),
        [id],
        posting_from_row,
    )
    .optional()
    .map_err(DbError::from)
}

pub fn get(conn: &Connection, kind: PostingKind, id: EntityId) -> DbResult<Posting> {
    find(conn, kind, id)?.ok_or(DbError::NotFound {
        entity: kind.entity(),
        id,
    })
}

/// Live postings matching `filter`, newest first.
pub fn list(conn: &Connection, kind: PostingKind, filter: &PostingFilter) -> DbResult<Vec<Posting>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {POSTING_COLUMNS} FROM {}
         WHERE deleted_at IS NULL
           AND (?1 IS NULL OR city_id = ?1)
           AND (?2 IS NULL OR job_id = ?2)
           AND (?3 IS NULL OR is_active = ?3)
         ORDER BY id DESC",
        table(kind)
    ))?;

    let rows = stmt
        .query_map(
            rusqlite::params![filter.city_id, filter.job_id, filter.active],
            posting_from_row,
        )?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn update(
    conn: &Connection,
    kind: PostingKind,
    id: EntityId,
    patch: &PostingPatch<'_>,
) -> DbResult<Posting> {
    if let Some(city_id) = patch.city_id {
        ensure_exists(conn, "cities", "city_id", city_id)?;
    }
    if let Some(job_id) = patch.job_id {
        ensure_exists(conn, "jobs", "job_id", job_id)?;
    }

    let changed = conn.execute(
        &format!(
            "UPDATE {} SET
                 title = COALESCE(?2, title),
                 description = COALESCE(?3, description),
                 city_id = COALESCE(?4, city_id),
                 job_id = COALESCE(?5, job_id),
                 is_active = COALESCE(?6, is_active),
                 ends_at = COALESCE(?7, ends_at),
                 updated_at = ?8
             WHERE id = ?1 AND deleted_at IS NULL",
            table(kind)
        ),
        rusqlite::params![
            id,
            patch.title,
            patch.description,
            patch.city_id,
            patch.job_id,
            patch.is_active,
            patch.ends_at,
            Utc::now(),
        ],
    )?;
    if changed == 0 {
        return Err(DbError::NotFound {
            entity: kind.entity(),
            id,
        });
    }

    get(conn, kind, id)
}

/// Flag a posting as deleted. The row and its associations stay in place.
pub fn soft_delete(
    conn: &Connection,
    kind: PostingKind,
    id: EntityId,
    at: DateTime<Utc>,
) -> DbResult<()> {
    let changed = conn.execute(
        &format!(
            "UPDATE {} SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
            table(kind)
        ),
        rusqlite::params![id, at],
    )?;
    if changed == 0 {
        return Err(DbError::NotFound {
            entity: kind.entity(),
            id,
        });
    }
    Ok(())
}

fn posting_from_row(row: &Row<'_>) -> rusqlite::Result<Posting> {
    Ok(Posting {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        slug: row.get(3)?,
        posted_by: row.get(4)?,
        job_id: row.get(5)?,
        city_id: row.get(6)?,
        is_active: row.get(7)?,
        ends_at: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
        deleted_at: row.get(11)?,
    })
}
