use axum::extract::State;
use crewlink_core::{Change, profile};
use crewlink_types::UserId;
use crewlink_types::api::IdsRequest;
use crewlink_types::models::UserProfile;

use crate::extract::{Json, Path, RequireUser};
use crate::{AppResult, AppState, blocking};

pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<UserProfile>> {
    let profile = blocking(&state, move |db| profile::get(db, id)).await?;
    Ok(Json(profile))
}

/// Profile of whoever holds the token.
pub async fn me(State(state): State<AppState>, RequireUser(id): RequireUser) -> AppResult<Json<UserProfile>> {
    let profile = blocking(&state, move |db| profile::get(db, id)).await?;
    Ok(Json(profile))
}

pub async fn add_skills(
    State(state): State<AppState>,
    user: RequireUser,
    Json(req): Json<IdsRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = blocking(&state, move |db| profile::change_skills(db, user.actor(), &req.ids, Change::Add)).await?;
    Ok(Json(profile))
}

pub async fn remove_skills(
    State(state): State<AppState>,
    user: RequireUser,
    Json(req): Json<IdsRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = blocking(&state, move |db| profile::change_skills(db, user.actor(), &req.ids, Change::Remove)).await?;
    Ok(Json(profile))
}

pub async fn add_topics(
    State(state): State<AppState>,
    user: RequireUser,
    Json(req): Json<IdsRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = blocking(&state, move |db| profile::change_topics(db, user.actor(), &req.ids, Change::Add)).await?;
    Ok(Json(profile))
}

pub async fn remove_topics(
    State(state): State<AppState>,
    user: RequireUser,
    Json(req): Json<IdsRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = blocking(&state, move |db| profile::change_topics(db, user.actor(), &req.ids, Change::Remove)).await?;
    Ok(Json(profile))
}
