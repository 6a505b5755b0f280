//! Console state container
//!
//! All local state lives in [`ConsoleState`] and changes only through
//! [`ConsoleState::apply`]. Three independent parts:
//! - the list fetch lifecycle (`Idle` / `Loading` / `Failed`) and its records
//! - the action waiting for PIN confirmation
//! - the add-employee draft (the dialog is open iff a draft exists)
//!
//! List fetches are tagged with a generation. Only the result of the most
//! recently started fetch is committed; older results are dropped whatever
//! order they arrive in.

use std::fmt;

use shared::models::{Employee, EmployeeDraft};
use tracing::debug;

/// List fetch lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

/// What the confirmation gate is guarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Toggle day/night, addressed by username
    Shift,
    /// Soft status change to `off`. This is the row's "delete" button.
    Resign,
    /// Addressed by id
    Reset,
    /// Hard delete by id
    Remove,
    /// Submit the add-employee draft
    Add,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shift => "shift",
            Self::Resign => "resign",
            Self::Reset => "reset",
            Self::Remove => "remove",
            Self::Add => "add",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action picked by the user, waiting for PIN confirmation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub kind: ActionKind,
    pub target_id: Option<i64>,
    pub target_username: Option<String>,
}

impl PendingAction {
    /// Row action against a listed employee
    pub fn for_employee(kind: ActionKind, employee: &Employee) -> Self {
        Self {
            kind,
            target_id: Some(employee.id),
            target_username: Some(employee.username.clone()),
        }
    }

    pub fn add() -> Self {
        Self {
            kind: ActionKind::Add,
            target_id: None,
            target_username: None,
        }
    }
}

/// Identifies one list fetch. Handed out by [`ConsoleState::begin_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    query: Option<String>,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Trimmed query, `None` for a full listing
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

/// State transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// Search text changed (or initial load). Starts a new generation.
    FetchStarted { query: String },
    FetchSucceeded {
        generation: u64,
        employees: Vec<Employee>,
    },
    FetchFailed { generation: u64, message: String },
    ActionRequested(PendingAction),
    /// Gated operation succeeded: clear the gate and close the draft
    ActionCompleted,
    /// User dismissed the gate or the dialog
    Cancelled,
    DraftOpened,
    DraftEdited(EmployeeDraft),
    /// Optimistic removal after a resign
    RemovedByUsername(String),
    /// Optimistic removal after a hard delete
    RemovedById(i64),
}

#[derive(Debug, Clone, Default)]
pub struct ConsoleState {
    query: String,
    generation: u64,
    status: ListStatus,
    employees: Vec<Employee>,
    pending: Option<PendingAction>,
    draft: Option<EmployeeDraft>,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns `false` when the event was discarded
    /// (a fetch result from a superseded generation).
    pub fn apply(&mut self, event: Event) -> bool {
        match event {
            Event::FetchStarted { query } => {
                self.query = query;
                self.generation += 1;
                self.status = ListStatus::Loading;
            }
            Event::FetchSucceeded {
                generation,
                employees,
            } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "Dropping stale list result");
                    return false;
                }
                self.employees = employees;
                self.status = ListStatus::Idle;
            }
            Event::FetchFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "Dropping stale list error");
                    return false;
                }
                self.status = ListStatus::Failed(message);
            }
            Event::ActionRequested(action) => {
                self.pending = Some(action);
            }
            Event::ActionCompleted | Event::Cancelled => {
                self.pending = None;
                self.draft = None;
            }
            Event::DraftOpened => {
                self.draft = Some(EmployeeDraft::default());
            }
            Event::DraftEdited(draft) => {
                self.draft = Some(draft);
            }
            Event::RemovedByUsername(username) => {
                self.employees.retain(|e| e.username != username);
            }
            Event::RemovedById(id) => {
                self.employees.retain(|e| e.id != id);
            }
        }
        true
    }

    /// Start a fetch for `query` and return the ticket its result must carry.
    pub fn begin_fetch(&mut self, query: &str) -> FetchTicket {
        let query = query.trim();
        self.apply(Event::FetchStarted {
            query: query.to_string(),
        });
        FetchTicket {
            generation: self.generation,
            query: (!query.is_empty()).then(|| query.to_string()),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> &ListStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ListStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn find_by_username(&self, username: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.username == username)
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn draft(&self) -> Option<&EmployeeDraft> {
        self.draft.as_ref()
    }

    pub fn is_draft_open(&self) -> bool {
        self.draft.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn employee(id: i64, username: &str) -> Employee {
        Employee::from_remote(&json!({"id": id, "username": username})).unwrap()
    }

    #[test]
    fn test_fetch_lifecycle() {
        let mut state = ConsoleState::new();
        let ticket = state.begin_fetch("  an ");
        assert!(state.is_loading());
        assert_eq!(state.query(), "an");
        assert_eq!(ticket.query(), Some("an"));

        assert!(state.apply(Event::FetchSucceeded {
            generation: ticket.generation(),
            employees: vec![employee(1, "an")],
        }));
        assert_eq!(state.status(), &ListStatus::Idle);
        assert_eq!(state.employees().len(), 1);
    }

    #[test]
    fn test_blank_query_is_full_listing() {
        let mut state = ConsoleState::new();
        assert_eq!(state.begin_fetch("   ").query(), None);
    }

    #[test]
    fn test_fetch_failure_keeps_previous_records() {
        let mut state = ConsoleState::new();
        let first = state.begin_fetch("");
        state.apply(Event::FetchSucceeded {
            generation: first.generation(),
            employees: vec![employee(1, "a")],
        });

        let second = state.begin_fetch("x");
        state.apply(Event::FetchFailed {
            generation: second.generation(),
            message: "HTTP 500".into(),
        });
        assert_eq!(state.error(), Some("HTTP 500"));
        assert_eq!(state.employees().len(), 1);
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut state = ConsoleState::new();
        let old = state.begin_fetch("a");
        let new = state.begin_fetch("ab");

        assert!(state.apply(Event::FetchSucceeded {
            generation: new.generation(),
            employees: vec![employee(2, "ab")],
        }));
        // the older request answers last
        assert!(!state.apply(Event::FetchSucceeded {
            generation: old.generation(),
            employees: vec![employee(1, "a"), employee(2, "ab")],
        }));
        assert!(!state.apply(Event::FetchFailed {
            generation: old.generation(),
            message: "late".into(),
        }));

        assert_eq!(state.employees().len(), 1);
        assert_eq!(state.status(), &ListStatus::Idle);
    }

    #[test]
    fn test_stale_result_does_not_end_loading() {
        let mut state = ConsoleState::new();
        let old = state.begin_fetch("a");
        let _new = state.begin_fetch("ab");
        state.apply(Event::FetchSucceeded {
            generation: old.generation(),
            employees: vec![],
        });
        assert!(state.is_loading());
    }

    #[test]
    fn test_gate_and_draft_are_independent() {
        let mut state = ConsoleState::new();
        state.apply(Event::DraftOpened);
        assert!(state.is_draft_open());
        assert!(state.pending().is_none());

        state.apply(Event::ActionRequested(PendingAction::add()));
        assert_eq!(state.pending().map(|p| p.kind), Some(ActionKind::Add));

        state.apply(Event::Cancelled);
        assert!(state.pending().is_none());
        assert!(!state.is_draft_open());
    }

    #[test]
    fn test_optimistic_removal() {
        let mut state = ConsoleState::new();
        let ticket = state.begin_fetch("");
        state.apply(Event::FetchSucceeded {
            generation: ticket.generation(),
            employees: vec![employee(1, "a"), employee(2, "b"), employee(3, "c")],
        });

        state.apply(Event::RemovedByUsername("b".into()));
        assert!(state.find_by_username("b").is_none());

        state.apply(Event::RemovedById(3));
        assert!(state.find_by_id(3).is_none());
        assert_eq!(state.employees().len(), 1);
    }
}
