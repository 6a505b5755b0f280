//! Error types for the shared crate

use thiserror::Error;

/// Failure to turn a loosely-typed server record into an [`Employee`](crate::Employee)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The record is not a JSON object
    #[error("employee record is not an object")]
    NotAnObject,

    /// `id` is absent or null
    #[error("employee record has no id")]
    MissingId,

    /// `id` is present but not a non-negative integer
    #[error("employee id is not numeric: {0}")]
    InvalidId(String),

    /// `username` is absent, null or not a string
    #[error("employee {id} has no username")]
    MissingUsername { id: i64 },
}

/// Add-employee form rejected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Username is required")]
    EmptyUsername,

    #[error("Age must be a number: {0}")]
    InvalidAge(String),
}
