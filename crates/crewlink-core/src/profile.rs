//! Public user profiles and self-service skills/topics.

use crewlink_db::relations::{self, Relation};
use crewlink_db::{Connection, Database, users};
use crewlink_types::actor::Actor;
use crewlink_types::models::UserProfile;
use crewlink_types::{EntityId, UserId};

use crate::policy::require_user;
use crate::{Change, CoreResult, apply_change};

pub fn get(db: &Database, id: UserId) -> CoreResult<UserProfile> {
    db.with_conn(|conn| profile(conn, id))
}

/// Change the acting user's own skills.
pub fn change_skills(db: &Database, actor: Actor, skill_ids: &[EntityId], change: Change) -> CoreResult<UserProfile> {
    change_own(db, actor, Relation::UserSkills, skill_ids, change)
}

/// Change the acting user's own topics.
pub fn change_topics(db: &Database, actor: Actor, topic_ids: &[EntityId], change: Change) -> CoreResult<UserProfile> {
    change_own(db, actor, Relation::UserTopics, topic_ids, change)
}

fn change_own(
    db: &Database,
    actor: Actor,
    relation: Relation,
    targets: &[EntityId],
    change: Change,
) -> CoreResult<UserProfile> {
    let user_id = require_user(actor)?;

    db.transaction(|conn| {
        apply_change(conn, relation, user_id, targets, change)?;
        profile(conn, user_id)
    })
}

fn profile(conn: &Connection, id: UserId) -> CoreResult<UserProfile> {
    let user = users::get(conn, id)?;
    Ok(UserProfile {
        id: user.id,
        name: user.name,
        created_at: user.created_at,
        skills: relations::tags(conn, Relation::UserSkills, id)?,
        topics: relations::tags(conn, Relation::UserTopics, id)?,
    })
}
