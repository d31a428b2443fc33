//! Route table.
//!
//! | Route | Auth |
//! |---|---|
//! | `POST /auth/register`, `POST /auth/login` | none |
//! | `GET /listings`, `GET /listings/{id}` | optional |
//! | `POST /listings`, `PATCH/DELETE /listings/{id}` | bearer, poster for changes |
//! | `POST/DELETE /listings/{id}/skills` | poster |
//! | `/job-vacancies`, same five routes | same as listings |
//! | `GET /projects`, `GET /projects/{id}` | none |
//! | `POST /projects`, `PATCH/DELETE /projects/{id}` | bearer, manager for changes |
//! | `POST/DELETE /projects/{id}/like`, `/follow` | bearer |
//! | `POST/DELETE /projects/{id}/members`, `/topics` | manager |
//! | `POST /projects/{id}/images`, `DELETE /projects/{id}/images/{image_id}` | manager |
//! | `GET /users/{id}` | none |
//! | `GET /me`, `POST/DELETE /me/skills`, `/me/topics` | bearer |
//! | `GET /cities`, `/jobs`, `/skills`, `/topics`, `/health` | none |

use axum::{
    Extension, Router,
    routing::{delete, get, post},
};
use crewlink_types::models::PostingKind;

use crate::{AppState, auth, catalog, postings, profile, projects};

pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(posting_routes("/listings", PostingKind::Listing))
        .merge(posting_routes("/job-vacancies", PostingKind::JobVacancy))
        .route(
            "/listings/{id}/skills",
            post(postings::add_skills).delete(postings::remove_skills),
        )
        .merge(project_routes())
        .route("/users/{id}", get(profile::get_profile))
        .route("/me", get(profile::me))
        .route("/me/skills", post(profile::add_skills).delete(profile::remove_skills))
        .route("/me/topics", post(profile::add_topics).delete(profile::remove_topics))
        .route("/cities", get(catalog::cities))
        .route("/jobs", get(catalog::jobs))
        .route("/skills", get(catalog::skills))
        .route("/topics", get(catalog::topics))
        .route("/health", get(catalog::health))
        .with_state(state)
}

fn posting_routes(base: &str, kind: PostingKind) -> Router<AppState> {
    Router::new()
        .route(base, get(postings::list_postings).post(postings::create_posting))
        .route(
            &format!("{base}/{{id}}"),
            get(postings::get_posting)
                .patch(postings::update_posting)
                .delete(postings::delete_posting),
        )
        .layer(Extension(kind))
}

fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(projects::list_projects).post(projects::create_project))
        .route(
            "/projects/{id}",
            get(projects::get_project)
                .patch(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/projects/{id}/like", post(projects::like).delete(projects::unlike))
        .route("/projects/{id}/follow", post(projects::follow).delete(projects::unfollow))
        .route(
            "/projects/{id}/members",
            post(projects::add_members).delete(projects::remove_members),
        )
        .route(
            "/projects/{id}/topics",
            post(projects::add_topics).delete(projects::remove_topics),
        )
        .route("/projects/{id}/images", post(projects::add_image))
        .route("/projects/{id}/images/{image_id}", delete(projects::remove_image))
}
