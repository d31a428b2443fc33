use crewlink_db::DbError;
use crewlink_types::EntityId;

/// Fixed message for an authenticated actor who does not own the target.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized action.";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A mutation was attempted without credentials.
    #[error("Unauthenticated.")]
    Unauthenticated,

    /// The actor is authenticated but does not own the target.
    #[error("Unauthorized action.")]
    Unauthorized,

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: EntityId },

    #[error("{0}")]
    ConstraintViolation(String),

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CoreError::NotFound { entity, id },
            DbError::ConstraintViolation(msg) => CoreError::ConstraintViolation(msg),
            other => CoreError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_message_is_fixed() {
        assert_eq!(CoreError::Unauthorized.to_string(), UNAUTHORIZED_MESSAGE);
    }

    #[test]
    fn store_errors_keep_their_kind() {
        let not_found: CoreError = DbError::NotFound { entity: "Listing", id: 3 }.into();
        assert!(matches!(not_found, CoreError::NotFound { entity: "Listing", id: 3 }));

        let fk: CoreError = DbError::ConstraintViolation("job_id 9".into()).into();
        assert!(matches!(fk, CoreError::ConstraintViolation(m) if m == "job_id 9"));

        let poisoned: CoreError = DbError::LockPoisoned.into();
        assert!(matches!(poisoned, CoreError::Internal(_)));
    }
}
