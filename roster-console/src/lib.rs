//! Roster Console - employee administration front end
//!
//! A reducer-style [`ConsoleState`] mirrors the remote employee collection;
//! the [`Console`] controller drives the resource client and gates every
//! mutating action behind a PIN check.

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod logger;
pub mod render;
pub mod state;

pub use config::ConsoleConfig;
pub use console::{Console, Notice};
pub use error::{ConsoleError, ConsoleResult};
pub use state::{ActionKind, ConsoleState, Event, FetchTicket, ListStatus, PendingAction};
