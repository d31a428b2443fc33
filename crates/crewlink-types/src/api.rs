use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EntityId, UserId};

// -- JWT Claims --

/// Bearer token claims. `sub` is the user's row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    pub name: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: UserId,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: UserId,
    pub name: String,
    pub token: String,
}

// -- Projects --

/// `created_by` is accepted only when it names the acting user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_by: Option<UserId>,
    pub manager_id: Option<UserId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub manager_id: Option<UserId>,
    pub created_by: Option<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddImageRequest {
    pub path: String,
}

// -- Listings and job vacancies --

/// `slug`, `is_active` and `ends_at` are assigned by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePosting {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub city_id: EntityId,
    pub job_id: EntityId,
    pub posted_by: Option<UserId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePosting {
    pub title: Option<String>,
    pub description: Option<String>,
    pub city_id: Option<EntityId>,
    pub job_id: Option<EntityId>,
    pub is_active: Option<bool>,
    pub ends_at: Option<DateTime<Utc>>,
    pub posted_by: Option<UserId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingFilter {
    pub city_id: Option<EntityId>,
    pub job_id: Option<EntityId>,
    pub active: Option<bool>,
}

// -- Associations --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdsRequest {
    pub ids: Vec<EntityId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: EntityId,
    pub deleted: bool,
}
