pub mod actor;
pub mod api;
pub mod models;

/// Primary key of every stored row.
pub type EntityId = i64;

/// Primary key of a user row.
pub type UserId = EntityId;
