use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use crewlink_core::CoreError;
use crewlink_types::UserId;
use crewlink_types::actor::Actor;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::validate_token;
use crate::{AppError, AppState};

/// The request's [`Actor`].
///
/// No `Authorization` header makes the request a guest; whether a guest may
/// proceed is up to the service being called. A header that is present but
/// malformed, forged or expired is rejected with 401 straight away.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(CurrentActor(Actor::Guest));
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Core(CoreError::Unauthenticated))?;

        let claims = validate_token(bearer.token(), &state.jwt).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            AppError::Core(CoreError::Unauthenticated)
        })?;

        Ok(CurrentActor(Actor::User(claims.sub)))
    }
}

/// A signed-in user, or 401.
///
/// Handlers that mutate state take this ahead of their path and body
/// extractors, so a guest is turned away before any input is parsed.
#[derive(Debug, Clone, Copy)]
pub struct RequireUser(pub UserId);

impl RequireUser {
    pub fn actor(self) -> Actor {
        Actor::User(self.0)
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentActor(actor) = CurrentActor::from_request_parts(parts, state).await?;
        actor
            .user_id()
            .map(RequireUser)
            .ok_or(AppError::Core(CoreError::Unauthenticated))
    }
}

// -- Input extractors with the JSON error body --

/// `axum::Json` whose rejection is an [`AppError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Json(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// `axum::extract::Path` whose rejection is an [`AppError`].
#[derive(Debug)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) = axum::extract::Path::<T>::from_request_parts(parts, state).await?;
        Ok(Path(value))
    }
}

/// `axum::extract::Query` whose rejection is an [`AppError`].
#[derive(Debug)]
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) = axum::extract::Query::<T>::from_request_parts(parts, state).await?;
        Ok(Query(value))
    }
}
