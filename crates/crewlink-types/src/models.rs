use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EntityId, UserId};

// -- Users --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub skills: Vec<Tag>,
    pub topics: Vec<Tag>,
}

// -- Reference data --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: EntityId,
    pub title: String,
}

/// Curation state of a skill or topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    /// Part of the curated catalogue.
    Official,
    /// Added by a user, not yet curated.
    Custom,
}

impl TagStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagStatus::Official => "official",
            TagStatus::Custom => "custom",
        }
    }
}

impl fmt::Display for TagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "official" => Ok(TagStatus::Official),
            "custom" => Ok(TagStatus::Custom),
            other => Err(format!("unknown tag status '{other}'")),
        }
    }
}

/// A skill or a topic; both tables share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: EntityId,
    pub title: String,
    pub status: TagStatus,
}

// -- Projects --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub created_by: UserId,
    pub manager_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectImage {
    pub id: EntityId,
    pub project_id: EntityId,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

/// A project together with its associations, as served by `GET /projects/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub manager: UserSummary,
    pub images: Vec<ProjectImage>,
    pub likes_count: u64,
    pub followers_count: u64,
    pub members: Vec<UserSummary>,
    pub topics: Vec<Tag>,
}

// -- Listings and job vacancies --

/// Listings and job vacancies are stored in separate tables with the same columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingKind {
    Listing,
    JobVacancy,
}

impl PostingKind {
    /// Entity name used in error messages and logs.
    pub fn entity(&self) -> &'static str {
        match self {
            PostingKind::Listing => "Listing",
            PostingKind::JobVacancy => "JobVacancy",
        }
    }

    pub fn has_skills(&self) -> bool {
        matches!(self, PostingKind::Listing)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub posted_by: UserId,
    pub job_id: EntityId,
    pub city_id: EntityId,
    pub is_active: bool,
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Posting {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingDetail {
    #[serde(flatten)]
    pub posting: Posting,
    /// Present for listings only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<Tag>>,
}
