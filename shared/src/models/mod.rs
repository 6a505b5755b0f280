//! Data models
//!
//! Employee records as the console sees them, after normalization of the
//! backend's loosely-typed payloads.

pub mod employee;
pub mod shift;

// Re-exports
pub use employee::*;
pub use shift::*;
