use crate::UserId;

/// Whoever is making a request. Passed explicitly into every service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// No credentials were presented.
    Guest,
    /// A user authenticated by bearer token.
    User(UserId),
}

impl Actor {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Actor::Guest => None,
            Actor::User(id) => Some(*id),
        }
    }

    pub fn is_user(&self, id: UserId) -> bool {
        self.user_id() == Some(id)
    }
}
