//! Ownership rules.
//!
//! Every mutable entity has exactly one user allowed to change it: a project's
//! manager, or the poster of a listing or vacancy. Anybody, including guests,
//! may read.

use crewlink_types::UserId;
use crewlink_types::actor::Actor;
use crewlink_types::models::{Posting, Project};
use tracing::warn;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Update,
    Delete,
    /// Attach or detach members, topics, skills or images.
    ManageRelations,
}

impl Action {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Action::View)
    }
}

/// An entity with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> UserId;
}

impl Owned for Project {
    fn owner_id(&self) -> UserId {
        self.manager_id
    }
}

impl Owned for Posting {
    fn owner_id(&self) -> UserId {
        self.posted_by
    }
}

pub fn can(actor: Actor, action: Action, target: &impl Owned) -> bool {
    !action.is_mutation() || actor.is_user(target.owner_id())
}

/// The acting user's id, or `Unauthenticated` for guests.
pub fn require_user(actor: Actor) -> CoreResult<UserId> {
    actor.user_id().ok_or(CoreError::Unauthenticated)
}

/// Guests are turned away as `Unauthenticated` before ownership is looked at;
/// authenticated non-owners get `Unauthorized`.
pub fn authorize(actor: Actor, action: Action, target: &impl Owned) -> CoreResult<()> {
    if !action.is_mutation() {
        return Ok(());
    }

    let user_id = require_user(actor)?;
    if can(actor, action, target) {
        Ok(())
    } else {
        warn!(
            user_id,
            owner_id = target.owner_id(),
            ?action,
            "Rejected mutation by non-owner"
        );
        Err(CoreError::Unauthorized)
    }
}
