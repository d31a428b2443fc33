use axum::{extract::State, http::StatusCode};
use crewlink_core::{Change, project};
use crewlink_types::EntityId;
use crewlink_types::api::{AddImageRequest, CreateProject, DeletedResponse, IdsRequest, UpdateProject};
use crewlink_types::models::{Project, ProjectDetail, ProjectImage};

use crate::extract::{Json, Path, RequireUser};
use crate::{AppResult, AppState, blocking};

pub async fn list_projects(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = blocking(&state, project::list).await?;
    Ok(Json(projects))
}

pub async fn create_project(
    State(state): State<AppState>,
    user: RequireUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let created = blocking(&state, move |db| project::create(db, user.actor(), &input)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = blocking(&state, move |db| project::get(db, id)).await?;
    Ok(Json(detail))
}

pub async fn update_project(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let updated = blocking(&state, move |db| project::update(db, user.actor(), id, &input)).await?;
    Ok(Json(updated))
}

pub async fn delete_project(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<DeletedResponse>> {
    blocking(&state, move |db| project::delete(db, user.actor(), id)).await?;
    Ok(Json(DeletedResponse { id, deleted: true }))
}

// -- Likes and follows --

pub async fn like(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = blocking(&state, move |db| project::change_like(db, user.actor(), id, Change::Add)).await?;
    Ok(Json(detail))
}

pub async fn unlike(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = blocking(&state, move |db| project::change_like(db, user.actor(), id, Change::Remove)).await?;
    Ok(Json(detail))
}

pub async fn follow(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = blocking(&state, move |db| project::change_follow(db, user.actor(), id, Change::Add)).await?;
    Ok(Json(detail))
}

pub async fn unfollow(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = blocking(&state, move |db| project::change_follow(db, user.actor(), id, Change::Remove)).await?;
    Ok(Json(detail))
}

// -- Manager-curated associations --

pub async fn add_members(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
    Json(req): Json<IdsRequest>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = blocking(&state, move |db| {
        project::change_members(db, user.actor(), id, &req.ids, Change::Add)
    })
    .await?;
    Ok(Json(detail))
}

pub async fn remove_members(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
    Json(req): Json<IdsRequest>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = blocking(&state, move |db| {
        project::change_members(db, user.actor(), id, &req.ids, Change::Remove)
    })
    .await?;
    Ok(Json(detail))
}

pub async fn add_topics(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
    Json(req): Json<IdsRequest>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = blocking(&state, move |db| {
        project::change_topics(db, user.actor(), id, &req.ids, Change::Add)
    })
    .await?;
    Ok(Json(detail))
}

pub async fn remove_topics(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
    Json(req): Json<IdsRequest>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = blocking(&state, move |db| {
        project::change_topics(db, user.actor(), id, &req.ids, Change::Remove)
    })
    .await?;
    Ok(Json(detail))
}

pub async fn add_image(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
    Json(req): Json<AddImageRequest>,
) -> AppResult<(StatusCode, Json<ProjectImage>)> {
    let image = blocking(&state, move |db| project::add_image(db, user.actor(), id, &req.path)).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

pub async fn remove_image(
    State(state): State<AppState>,
    user: RequireUser,
    Path((id, image_id)): Path<(EntityId, EntityId)>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = blocking(&state, move |db| project::remove_image(db, user.actor(), id, image_id)).await?;
    Ok(Json(detail))
}
