use axum::{Json, extract::State};
use crewlink_core::catalog;
use crewlink_types::models::{City, Job, Tag};
use serde_json::{Value, json};

use crate::{AppResult, AppState, blocking};

pub async fn cities(State(state): State<AppState>) -> AppResult<Json<Vec<City>>> {
    Ok(Json(blocking(&state, catalog::cities).await?))
}

pub async fn jobs(State(state): State<AppState>) -> AppResult<Json<Vec<Job>>> {
    Ok(Json(blocking(&state, catalog::jobs).await?))
}

pub async fn skills(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    Ok(Json(blocking(&state, catalog::skills).await?))
}

pub async fn topics(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    Ok(Json(blocking(&state, catalog::topics).await?))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
