//! Admin capability check

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};

/// Set of user ids allowed to run admin handlers.
///
/// An empty gate denies everyone.
#[derive(Debug, Clone, Default)]
pub struct AdminGate {
    admins: HashSet<i64>,
}

impl AdminGate {
    pub fn new(admins: impl IntoIterator<Item = i64>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }

    /// Gate with a single configured admin.
    pub fn single(admin_id: i64) -> Self {
        Self::new([admin_id])
    }

    /// Check if user is admin
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admins.contains(&user_id)
    }

    /// Fails with [`CoreError::Unauthorized`] unless `user_id` is an admin.
    pub fn require(&self, user_id: i64) -> CoreResult<()> {
        if self.is_admin(user_id) {
            Ok(())
        } else {
            tracing::warn!(user_id, "admin access denied");
            Err(CoreError::Unauthorized)
        }
    }

    pub fn len(&self) -> usize {
        self.admins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}
