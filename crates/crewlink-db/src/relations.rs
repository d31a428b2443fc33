//! Many-to-many associations.
//!
//! Every relation has its own join table keyed by `(owner, target)`, so a pair
//! can be stored at most once. Attaching an existing pair and detaching a
//! missing one are both no-ops.

use std::collections::BTreeSet;

use crewlink_types::EntityId;
use crewlink_types::models::{Tag, UserSummary};
use rusqlite::{Connection, OptionalExtension};

use crate::reference::{ensure_exists, tag_from_row};
use crate::{DbError, DbResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    ProjectLikes,
    ProjectFollowers,
    ProjectMembers,
    ProjectTopics,
    ListingSkills,
    UserSkills,
    UserTopics,
}

struct Layout {
    table: &'static str,
    owner_table: &'static str,
    owner_entity: &'static str,
    owner_column: &'static str,
    target_table: &'static str,
    target_column: &'static str,
}

impl Relation {
    pub fn name(&self) -> &'static str {
        match self {
            Relation::ProjectLikes => "project_likes",
            Relation::ProjectFollowers => "project_followers",
            Relation::ProjectMembers => "project_members",
            Relation::ProjectTopics => "project_topics",
            Relation::ListingSkills => "listing_skills",
            Relation::UserSkills => "user_skills",
            Relation::UserTopics => "user_topics",
        }
    }

    fn layout(&self) -> Layout {
        match self {
            Relation::ProjectLikes => Layout::project("project_likes", "users", "user_id"),
            Relation::ProjectFollowers => Layout::project("project_followers", "users", "user_id"),
            Relation::ProjectMembers => Layout::project("project_members", "users", "user_id"),
            Relation::ProjectTopics => Layout::project("project_topics", "topics", "topic_id"),
            Relation::ListingSkills => Layout {
                table: "listing_skills",
                owner_table: "listings",
                owner_entity: "Listing",
                owner_column: "listing_id",
                target_table: "skills",
                target_column: "skill_id",
            },
            Relation::UserSkills => Layout::user("user_skills", "skills", "skill_id"),
            Relation::UserTopics => Layout::user("user_topics", "topics", "topic_id"),
        }
    }
}

impl Layout {
    fn project(table: &'static str, target_table: &'static str, target_column: &'static str) -> Self {
        Layout {
            table,
            owner_table: "projects",
            owner_entity: "Project",
            owner_column: "project_id",
            target_table,
            target_column,
        }
    }

    fn user(table: &'static str, target_table: &'static str, target_column: &'static str) -> Self {
        Layout {
            table,
            owner_table: "users",
            owner_entity: "User",
            owner_column: "user_id",
            target_table,
            target_column,
        }
    }
}

fn ensure_owner(conn: &Connection, layout: &Layout, owner_id: EntityId) -> DbResult<()> {
    conn.query_row(
        &format!("SELECT 1 FROM {} WHERE id = ?1", layout.owner_table),
        [owner_id],
        |_| Ok(()),
    )
    .optional()?
    .ok_or(DbError::NotFound {
        entity: layout.owner_entity,
        id: owner_id,
    })
}

/// Attach `targets` to `owner_id`. Returns how many new rows were written.
///
/// Every target is checked before anything is inserted, so an unknown id
/// leaves the relation untouched.
pub fn attach(
    conn: &Connection,
    relation: Relation,
    owner_id: EntityId,
    targets: &[EntityId],
) -> DbResult<usize> {
    let layout = relation.layout();
    ensure_owner(conn, &layout, owner_id)?;

    let targets: BTreeSet<EntityId> = targets.iter().copied().collect();
    for &target in &targets {
        ensure_exists(conn, layout.target_table, layout.target_column, target)?;
    }

    let mut stmt = conn.prepare(&format!(
        "INSERT OR IGNORE INTO {} ({}, {}) VALUES (?1, ?2)",
        layout.table, layout.owner_column, layout.target_column
    ))?;

    let mut inserted = 0;
    for target in targets {
        inserted += stmt.execute([owner_id, target])?;
    }
    Ok(inserted)
}

/// Detach `targets` from `owner_id`. Returns how many rows were removed.
pub fn detach(
    conn: &Connection,
    relation: Relation,
    owner_id: EntityId,
    targets: &[EntityId],
) -> DbResult<usize> {
    let layout = relation.layout();
    ensure_owner(conn, &layout, owner_id)?;

    let mut stmt = conn.prepare(&format!(
        "DELETE FROM {} WHERE {} = ?1 AND {} = ?2",
        layout.table, layout.owner_column, layout.target_column
    ))?;

    let mut removed = 0;
    for target in targets.iter().copied().collect::<BTreeSet<_>>() {
        removed += stmt.execute([owner_id, target])?;
    }
    Ok(removed)
}

pub fn count(conn: &Connection, relation: Relation, owner_id: EntityId) -> DbResult<u64> {
    let layout = relation.layout();
    let n: i64 = conn.query_row(
        &format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ?1",
            layout.table, layout.owner_column
        ),
        [owner_id],
        |r| r.get(0),
    )?;
    Ok(n as u64)
}

/// Attached ids in ascending order.
pub fn target_ids(conn: &Connection, relation: Relation, owner_id: EntityId) -> DbResult<Vec<EntityId>> {
    let layout = relation.layout();
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM {} WHERE {} = ?1 ORDER BY {}",
        layout.target_column, layout.table, layout.owner_column, layout.target_column
    ))?;
    let ids = stmt
        .query_map([owner_id], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

/// Attached users, for relations whose targets are users.
pub fn users(conn: &Connection, relation: Relation, owner_id: EntityId) -> DbResult<Vec<UserSummary>> {
    let layout = relation.layout();
    if layout.target_table != "users" {
        return Err(DbError::InvalidRelation(relation.name()));
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT u.id, u.name FROM {} r
         JOIN users u ON u.id = r.{}
         WHERE r.{} = ?1
         ORDER BY u.id",
        layout.table, layout.target_column, layout.owner_column
    ))?;
    let rows = stmt
        .query_map([owner_id], |row| {
            Ok(UserSummary {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Attached skills or topics, for relations whose targets are tags.
pub fn tags(conn: &Connection, relation: Relation, owner_id: EntityId) -> DbResult<Vec<Tag>> {
    let layout = relation.layout();
    if layout.target_table == "users" {
        return Err(DbError::InvalidRelation(relation.name()));
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT t.id, t.title, t.status FROM {} r
         JOIN {} t ON t.id = r.{}
         WHERE r.{} = ?1
         ORDER BY t.title",
        layout.table, layout.target_table, layout.target_column, layout.owner_column
    ))?;
    let rows = stmt
        .query_map([owner_id], tag_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
