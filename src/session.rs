//! Session state consumed during insert.

/// The current session's owning user.
///
/// Read-only holder passed in via [`crate::StoreContext`]; its id is
/// substituted for any `user_id` column on insert, overriding whatever the
/// field itself holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    user_id: i64,
}

impl Session {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }
}
