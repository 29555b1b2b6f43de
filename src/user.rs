//! The principal whose rows are read and written by every handler.

/// Identifies the single application user that owns transactions and wishlist items.
///
/// The ID comes from server configuration and is threaded explicitly through each handler's
/// state so that every query and mutation is scoped to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Create a user ID from the configured identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as it is stored in the database.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
