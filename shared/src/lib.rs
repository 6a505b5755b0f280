//! Shared types for the Roster workspace
//!
//! Employee models, the remote-record normalization, and the response
//! envelopes exchanged with the HR backend. Used by both `roster-client`
//! and `roster-console`.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use error::{DraftError, MappingError};
pub use models::{Employee, EmployeeDraft, EmployeeStatus, NewEmployee, Shift};
pub use response::{ActionResponse, CreatedAccount};
pub use serde::{Deserialize, Serialize};
