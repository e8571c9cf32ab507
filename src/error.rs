//! Typed errors for the persistence layer. The UI and CLI wrap these in
//! `anyhow` and only peek at them to tell "nothing there" apart from failures.

use crate::models::CustomerId;

/// Result type for directory and reservation queries.
pub type Result<T, E = DirectoryError> = std::result::Result<T, E>;

/// Everything a directory call can fail with.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// Query or connection failure, passed through untouched.
    #[error(transparent)]
    Store(#[from] rusqlite::Error),
}

impl DirectoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound(_))
    }
}

/// The lookup produced nothing where the contract requires something.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFound {
    #[error("No such customer: {0}")]
    Customer(CustomerId),

    #[error("No customers fulfilling condition.")]
    Ranking,

    #[error("not found: {0}")]
    Search(String),
}

/// Rejected reservation input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationError {
    #[error("A reservation needs at least one guest.")]
    NoGuests,
}
