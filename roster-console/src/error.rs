//! Console error types

use roster_client::ClientError;
use shared::DraftError;
use thiserror::Error;

use crate::state::ActionKind;

/// Everything a console action can fail with. Each variant is meant to be
/// shown to the user as-is.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Draft refused before any request
    #[error(transparent)]
    Validation(#[from] DraftError),

    /// Target missing from the local list, which may be stale
    #[error("Employee not found: {username}")]
    NotFoundLocal { username: String },

    #[error("No action is waiting for confirmation")]
    NoPendingAction,

    #[error("No add-employee form is open")]
    NoDraft,

    #[error("The {0} action has no target")]
    MissingTarget(ActionKind),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
