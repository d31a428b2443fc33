//! HTTP surface of crewlink.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod postings;
pub mod profile;
pub mod projects;
pub mod router;
pub mod state;

pub use error::{AppError, AppResult};
pub use state::{AppState, AppStateInner};

use crewlink_core::CoreResult;
use crewlink_db::Database;
use tracing::error;

/// Run store work off the async runtime.
pub(crate) async fn blocking<F, T>(state: &AppState, f: F) -> AppResult<T>
where
    F: FnOnce(&Database) -> CoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            AppError::Internal(e.to_string())
        })?
        .map_err(AppError::from)
}
