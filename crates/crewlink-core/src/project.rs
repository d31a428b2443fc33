//! Project lifecycle and associations.
//!
//! The creator manages a new project unless `manager_id` appoints somebody
//! else. Only the current manager may edit, delete, hand the project over, or
//! curate its members, topics and images. Likes and follows are personal: any
//! signed-in user adds or removes their own.

use crewlink_db::projects::{self, NewProject, ProjectPatch};
use crewlink_db::relations::{self, Relation};
use crewlink_db::{Connection, Database, users};
use crewlink_types::EntityId;
use crewlink_types::actor::Actor;
use crewlink_types::api::{CreateProject, UpdateProject};
use crewlink_types::models::{Project, ProjectDetail, ProjectImage};
use tracing::info;

use crate::policy::{Action, authorize, require_user};
use crate::{Change, CoreError, CoreResult, apply_change, validate_title};

pub fn list(db: &Database) -> CoreResult<Vec<Project>> {
    db.with_conn(|conn| Ok(projects::list(conn)?))
}

pub fn get(db: &Database, id: EntityId) -> CoreResult<ProjectDetail> {
    db.with_conn(|conn| detail(conn, id))
}

pub fn create(db: &Database, actor: Actor, input: &CreateProject) -> CoreResult<Project> {
    let user_id = require_user(actor)?;
    let title = validate_title(&input.title)?;

    if input.created_by.is_some_and(|id| id != user_id) {
        return Err(CoreError::Validation(
            "created_by is assigned by the server and must be the acting user".into(),
        ));
    }

    let new = NewProject {
        title,
        description: &input.description,
        created_by: user_id,
        manager_id: input.manager_id.unwrap_or(user_id),
    };
    let project = db.transaction(|conn| -> CoreResult<Project> { Ok(projects::insert(conn, &new)?) })?;

    info!(
        project_id = project.id,
        created_by = project.created_by,
        manager_id = project.manager_id,
        "Project created"
    );
    Ok(project)
}

/// Partial update. A `manager_id` hands the project to another user.
pub fn update(db: &Database, actor: Actor, id: EntityId, input: &UpdateProject) -> CoreResult<Project> {
    require_user(actor)?;
    let title = input.title.as_deref().map(validate_title).transpose()?;

    db.transaction(|conn| {
        let current = projects::get(conn, id)?;
        authorize(actor, Action::Update, &current)?;

        if input.created_by.is_some_and(|by| by != current.created_by) {
            return Err(CoreError::Validation("created_by cannot be changed".into()));
        }

        let patch = ProjectPatch {
            title,
            description: input.description.as_deref(),
            manager_id: input.manager_id,
        };
        let updated = projects::update(conn, id, &patch)?;

        if updated.manager_id != current.manager_id {
            info!(
                project_id = id,
                from = current.manager_id,
                to = updated.manager_id,
                "Project handed over to new manager"
            );
        }
        Ok(updated)
    })
}

/// Remove the project along with its images and every association row.
pub fn delete(db: &Database, actor: Actor, id: EntityId) -> CoreResult<()> {
    require_user(actor)?;

    db.transaction(|conn| {
        let project = projects::get(conn, id)?;
        authorize(actor, Action::Delete, &project)?;
        projects::delete(conn, id)?;
        Ok::<_, CoreError>(())
    })?;

    info!(project_id = id, "Project deleted");
    Ok(())
}

/// Like or unlike as the acting user.
pub fn change_like(db: &Database, actor: Actor, id: EntityId, change: Change) -> CoreResult<ProjectDetail> {
    change_own(db, actor, id, Relation::ProjectLikes, change)
}

/// Follow or unfollow as the acting user.
pub fn change_follow(db: &Database, actor: Actor, id: EntityId, change: Change) -> CoreResult<ProjectDetail> {
    change_own(db, actor, id, Relation::ProjectFollowers, change)
}

pub fn change_members(
    db: &Database,
    actor: Actor,
    id: EntityId,
    user_ids: &[EntityId],
    change: Change,
) -> CoreResult<ProjectDetail> {
    change_managed(db, actor, id, Relation::ProjectMembers, user_ids, change)
}

pub fn change_topics(
    db: &Database,
    actor: Actor,
    id: EntityId,
    topic_ids: &[EntityId],
    change: Change,
) -> CoreResult<ProjectDetail> {
    change_managed(db, actor, id, Relation::ProjectTopics, topic_ids, change)
}

pub fn add_image(db: &Database, actor: Actor, id: EntityId, path: &str) -> CoreResult<ProjectImage> {
    require_user(actor)?;
    let path = path.trim();
    if path.is_empty() {
        return Err(CoreError::Validation("path must not be empty".into()));
    }

    db.transaction(|conn| {
        let project = projects::get(conn, id)?;
        authorize(actor, Action::ManageRelations, &project)?;
        Ok(projects::insert_image(conn, id, path)?)
    })
}

pub fn remove_image(db: &Database, actor: Actor, id: EntityId, image_id: EntityId) -> CoreResult<ProjectDetail> {
    require_user(actor)?;

    db.transaction(|conn| {
        let project = projects::get(conn, id)?;
        authorize(actor, Action::ManageRelations, &project)?;
        projects::delete_image(conn, id, image_id)?;
        detail(conn, id)
    })
}

fn change_own(
    db: &Database,
    actor: Actor,
    id: EntityId,
    relation: Relation,
    change: Change,
) -> CoreResult<ProjectDetail> {
    let user_id = require_user(actor)?;

    db.transaction(|conn| {
        projects::get(conn, id)?;
        apply_change(conn, relation, id, &[user_id], change)?;
        detail(conn, id)
    })
}

fn change_managed(
    db: &Database,
    actor: Actor,
    id: EntityId,
    relation: Relation,
    targets: &[EntityId],
    change: Change,
) -> CoreResult<ProjectDetail> {
    require_user(actor)?;

    db.transaction(|conn| {
        let project = projects::get(conn, id)?;
        authorize(actor, Action::ManageRelations, &project)?;
        apply_change(conn, relation, id, targets, change)?;
        detail(conn, id)
    })
}

fn detail(conn: &Connection, id: EntityId) -> CoreResult<ProjectDetail> {
    let project = projects::get(conn, id)?;

    Ok(ProjectDetail {
        manager: users::summary(conn, project.manager_id)?,
        images: projects::list_images(conn, id)?,
        likes_count: relations::count(conn, Relation::ProjectLikes, id)?,
        followers_count: relations::count(conn, Relation::ProjectFollowers, id)?,
        members: relations::users(conn, Relation::ProjectMembers, id)?,
        topics: relations::tags(conn, Relation::ProjectTopics, id)?,
        project,
    })
}
