//! The authenticated caller on whose behalf an operation runs.

use serde::{Deserialize, Serialize};

use crate::roles::ROLE_ADMIN;
use crate::types::UserId;

/// Identity of the user invoking a placement operation.
///
/// Built by the (excluded) HTTP layer from its session or token. The
/// placement engine only compares `user_id` against record owners and checks
/// for the admin role on soft delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub user_id: UserId,
    /// Role name (e.g. `"admin"`, `"editor"`).
    pub role: String,
}

impl Requester {
    pub fn new(user_id: impl Into<UserId>, role: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Returns `true` if this requester created the record owned by `owner_id`.
    pub fn owns(&self, owner_id: &str) -> bool {
        self.user_id == owner_id
    }
}
