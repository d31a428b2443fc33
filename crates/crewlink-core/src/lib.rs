//! Business rules for crewlink: who may change what, and how writes are
//! applied to the store. Nothing in here knows about HTTP.

pub mod catalog;
pub mod error;
pub mod policy;
pub mod posting;
pub mod profile;
pub mod project;
pub mod slug;

use crewlink_db::Connection;
use crewlink_db::relations::{self, Relation};
use crewlink_types::EntityId;

pub use error::{CoreError, CoreResult};

/// Direction of an association change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Add,
    Remove,
}

/// Attach or detach `targets`, returning how many rows actually changed.
pub(crate) fn apply_change(
    conn: &Connection,
    relation: Relation,
    owner_id: EntityId,
    targets: &[EntityId],
    change: Change,
) -> CoreResult<usize> {
    let changed = match change {
        Change::Add => relations::attach(conn, relation, owner_id, targets)?,
        Change::Remove => relations::detach(conn, relation, owner_id, targets)?,
    };
    tracing::debug!(relation = relation.name(), owner_id, changed, ?change, "Relation updated");
    Ok(changed)
}

/// Trimmed, non-empty title.
pub(crate) fn validate_title(title: &str) -> CoreResult<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()));
    }
    Ok(title)
}
