use chrono::Utc;
use crewlink_types::models::{Project, ProjectImage};
use crewlink_types::{EntityId, UserId};
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::debug;

use crate::reference::ensure_exists;
use crate::{DbError, DbResult};

const PROJECT_COLUMNS: &str =
    "id, title, description, created_by, manager_id, created_at, updated_at";

pub struct NewProject<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub created_by: UserId,
    pub manager_id: UserId,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Default)]
pub struct ProjectPatch<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub manager_id: Option<UserId>,
}

pub fn insert(conn: &Connection, new: &NewProject<'_>) -> DbResult<Project> {
    ensure_exists(conn, "users", "created_by", new.created_by)?;
    ensure_exists(conn, "users", "manager_id", new.manager_id)?;

    let now = Utc::now();
    conn.execute(
        "INSERT INTO projects (title, description, created_by, manager_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        rusqlite::params![new.title, new.description, new.created_by, new.manager_id, now],
    )?;

    get(conn, conn.last_insert_rowid())
}

pub fn find(conn: &Connection, id: EntityId) -> DbResult<Option<Project>> {
    conn.query_row(
        &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
        [id],
        project_from_row,
    )
    .optional()
    .map_err(DbError::from)
}

pub fn get(conn: &Connection, id: EntityId) -> DbResult<Project> {
    find(conn, id)?.ok_or(DbError::NotFound { entity: "Project", id })
}

/// All projects, newest first.
pub fn list(conn: &Connection) -> DbResult<Vec<Project>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id DESC"
    ))?;
    let rows = stmt
        .query_map([], project_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn update(conn: &Connection, id: EntityId, patch: &ProjectPatch<'_>) -> DbResult<Project> {
    if let Some(manager_id) = patch.manager_id {
        ensure_exists(conn, "users", "manager_id", manager_id)?;
    }

    let changed = conn.execute(
        "UPDATE projects SET
             title = COALESCE(?2, title),
             description = COALESCE(?3, description),
             manager_id = COALESCE(?4, manager_id),
             updated_at = ?5
         WHERE id = ?1",
        rusqlite::params![id, patch.title, patch.description, patch.manager_id, Utc::now()],
    )?;
    if changed == 0 {
        return Err(DbError::NotFound { entity: "Project", id });
    }

    get(conn, id)
}

/// Physically remove a project. Images and association rows go with it.
pub fn delete(conn: &Connection, id: EntityId) -> DbResult<()> {
    let changed = conn.execute("DELETE FROM projects WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(DbError::NotFound { entity: "Project", id });
    }
    debug!(project_id = id, "Project row deleted");
    Ok(())
}

// -- Images --

pub fn insert_image(conn: &Connection, project_id: EntityId, path: &str) -> DbResult<ProjectImage> {
    ensure_exists(conn, "projects", "project_id", project_id)?;

    let now = Utc::now();
    conn.execute(
        "INSERT INTO project_images (project_id, path, created_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![project_id, path, now],
    )?;

    Ok(ProjectImage {
        id: conn.last_insert_rowid(),
        project_id,
        path: path.to_string(),
        created_at: now,
    })
}

pub fn list_images(conn: &Connection, project_id: EntityId) -> DbResult<Vec<ProjectImage>> {
    let mut stmt = conn.prepare(
        "SELECT id, project_id, path, created_at FROM project_images
         WHERE project_id = ?1
         ORDER BY id",
    )?;
    let rows = stmt
        .query_map([project_id], |row| {
            Ok(ProjectImage {
                id: row.get(0)?,
                project_id: row.get(1)?,
                path: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn delete_image(conn: &Connection, project_id: EntityId, image_id: EntityId) -> DbResult<()> {
    let changed = conn.execute(
        "DELETE FROM project_images WHERE id = ?1 AND project_id = ?2",
        [image_id, project_id],
    )?;
    if changed == 0 {
        return Err(DbError::NotFound {
            entity: "ProjectImage",
            id: image_id,
        });
    }
    Ok(())
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        created_by: row.get(3)?,
        manager_id: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
