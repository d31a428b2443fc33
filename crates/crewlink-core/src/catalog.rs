//! Read-only reference data.

use crewlink_db::Database;
use crewlink_db::reference::{self, TagKind};
use crewlink_types::models::{City, Job, Tag};

use crate::CoreResult;

pub fn cities(db: &Database) -> CoreResult<Vec<City>> {
    db.with_conn(|conn| Ok(reference::list_cities(conn)?))
}

pub fn jobs(db: &Database) -> CoreResult<Vec<Job>> {
    db.with_conn(|conn| Ok(reference::list_jobs(conn)?))
}

pub fn skills(db: &Database) -> CoreResult<Vec<Tag>> {
    db.with_conn(|conn| Ok(reference::list_tags(conn, TagKind::Skill)?))
}

pub fn topics(db: &Database) -> CoreResult<Vec<Tag>> {
    db.with_conn(|conn| Ok(reference::list_tags(conn, TagKind::Topic)?))
}
