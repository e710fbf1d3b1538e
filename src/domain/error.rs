//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree model's rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("entry already exists: {0}")]
    EntryExists(String),

    #[error("entry not found: {0}")]
    EntryNotFound(String),

    #[error("entry cannot have children: {0}")]
    NotNestable(String),

    #[error("invalid entry name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
}
