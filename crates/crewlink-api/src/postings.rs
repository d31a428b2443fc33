//! Handlers shared by `/listings` and `/job-vacancies`.
//!
//! The router stamps each route group with an `Extension<PostingKind>`, so one
//! set of handlers serves both tables.

use axum::{Extension, extract::State, http::StatusCode};
use crewlink_core::{Change, posting};
use crewlink_types::EntityId;
use crewlink_types::api::{CreatePosting, DeletedResponse, IdsRequest, PostingFilter, UpdatePosting};
use crewlink_types::models::{Posting, PostingDetail, PostingKind};

use crate::extract::{CurrentActor, Json, Path, Query, RequireUser};
use crate::{AppResult, AppState, blocking};

pub async fn list_postings(
    State(state): State<AppState>,
    Extension(kind): Extension<PostingKind>,
    Query(filter): Query<PostingFilter>,
) -> AppResult<Json<Vec<Posting>>> {
    let postings = blocking(&state, move |db| posting::list(db, kind, &filter)).await?;
    Ok(Json(postings))
}

pub async fn create_posting(
    State(state): State<AppState>,
    user: RequireUser,
    Extension(kind): Extension<PostingKind>,
    Json(input): Json<CreatePosting>,
) -> AppResult<(StatusCode, Json<Posting>)> {
    let created = blocking(&state, move |db| posting::create(db, kind, user.actor(), &input)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_posting(
    State(state): State<AppState>,
    Extension(kind): Extension<PostingKind>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<EntityId>,
) -> AppResult<Json<PostingDetail>> {
    let detail = blocking(&state, move |db| posting::get(db, kind, actor, id)).await?;
    Ok(Json(detail))
}

pub async fn update_posting(
    State(state): State<AppState>,
    user: RequireUser,
    Extension(kind): Extension<PostingKind>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdatePosting>,
) -> AppResult<Json<Posting>> {
    let updated = blocking(&state, move |db| posting::update(db, kind, user.actor(), id, &input)).await?;
    Ok(Json(updated))
}

pub async fn delete_posting(
    State(state): State<AppState>,
    user: RequireUser,
    Extension(kind): Extension<PostingKind>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<DeletedResponse>> {
    blocking(&state, move |db| posting::delete(db, kind, user.actor(), id)).await?;
    Ok(Json(DeletedResponse { id, deleted: true }))
}

// -- Listing skills --

pub async fn add_skills(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
    Json(req): Json<IdsRequest>,
) -> AppResult<Json<PostingDetail>> {
    let detail = blocking(&state, move |db| {
        posting::change_skills(db, user.actor(), id, &req.ids, Change::Add)
    })
    .await?;
    Ok(Json(detail))
}

pub async fn remove_skills(
    State(state): State<AppState>,
    user: RequireUser,
    Path(id): Path<EntityId>,
    Json(req): Json<IdsRequest>,
) -> AppResult<Json<PostingDetail>> {
    let detail = blocking(&state, move |db| {
        posting::change_skills(db, user.actor(), id, &req.ids, Change::Remove)
    })
    .await?;
    Ok(Json(detail))
}
