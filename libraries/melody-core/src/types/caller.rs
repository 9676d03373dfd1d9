//! Caller identity
//!
//! Every operation receives the caller explicitly instead of reading an
//! ambient request/session.

use super::UserId;
use crate::error::{MelodyError, Result};
use serde::{Deserialize, Serialize};

/// Who is performing an operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "user_id", rename_all = "lowercase")]
pub enum Caller {
    /// No credentials were presented
    #[default]
    Anonymous,
    /// Authenticated user
    User(UserId),
}

impl Caller {
    /// Authenticated caller
    pub fn user(id: UserId) -> Self {
        Self::User(id)
    }

    /// Whether credentials were presented and verified
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// The caller's user id, if authenticated
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::User(id) => Some(*id),
            Self::Anonymous => None,
        }
    }

    /// The caller's user id, or `AuthenticationRequired`
    pub fn require_user(&self) -> Result<UserId> {
        self.user_id().ok_or(MelodyError::AuthenticationRequired)
    }
}
