//! Roster Client - HTTP client for the HR backend
//!
//! Typed access to the employee collection, PIN verification and login,
//! all built on a single JSON request primitive ([`HttpClient::request`]).

pub mod auth;
pub mod config;
pub mod employees;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod pin;

pub use auth::AuthClient;
pub use config::ClientConfig;
pub use employees::EmployeeClient;
pub use error::{ClientError, ClientResult};
pub use self::http::{ApiRequest, HttpClient, NetworkHttpClient, RequestBody};
pub use pin::{HttpPinVerifier, PinVerifier};

// Re-export shared types for convenience
pub use shared::models::{DEFAULT_PASSWORD, Employee, EmployeeDraft, EmployeeStatus, NewEmployee, Shift};
pub use shared::{CreatedAccount, DraftError, MappingError};
