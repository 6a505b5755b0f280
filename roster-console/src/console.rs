//! Console controller
//!
//! Owns the [`ConsoleState`] and turns user intents into resource-client
//! calls. Every mutating call goes through [`Console::confirm`], which checks
//! the PIN first.

use std::fmt;
use std::sync::Arc;

use roster_client::{ClientResult, EmployeeClient, PinVerifier};
use shared::models::{Employee, EmployeeDraft, Shift};
use tracing::{debug, info, warn};

use crate::error::{ConsoleError, ConsoleResult};
use crate::state::{ActionKind, ConsoleState, Event, FetchTicket, PendingAction};

/// Outcome of a confirmation, shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// PIN refused. Nothing was sent; the action is still pending.
    PinRejected,
    ShiftChanged { username: String, shift: Shift },
    Resigned { username: String },
    Reset { id: i64 },
    Removed { id: i64 },
    Added {
        username: String,
        user_id: Option<i64>,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinRejected => f.write_str("Incorrect PIN"),
            Self::ShiftChanged { username, shift } => {
                write!(f, "{username} moved to the {} shift", shift.label())
            }
            Self::Resigned { username } => write!(f, "{username} marked as resigned"),
            Self::Reset { id } => write!(f, "Employee #{id} reset"),
            Self::Removed { id } => write!(f, "Employee #{id} deleted"),
            Self::Added {
                username,
                user_id: Some(id),
            } => write!(f, "Added {username} (#{id})"),
            Self::Added {
                username,
                user_id: None,
            } => write!(f, "Added {username}"),
        }
    }
}

pub struct Console {
    employees: EmployeeClient,
    pin: Arc<dyn PinVerifier>,
    state: ConsoleState,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Console {
    pub fn new(employees: EmployeeClient, pin: Arc<dyn PinVerifier>) -> Self {
        Self {
            employees,
            pin,
            state: ConsoleState::new(),
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    // ========== List ==========

    /// Fetch and commit in one step. A failed fetch is recorded in the state
    /// and also returned.
    pub async fn search(&mut self, query: &str) -> ConsoleResult<()> {
        let ticket = self.begin_search(query);
        let result = self.fetch(&ticket).await;
        match result {
            Ok(employees) => {
                self.finish_search(&ticket, Ok(employees));
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                self.finish_search(&ticket, Err(message));
                Err(e.into())
            }
        }
    }

    /// Full listing with the search text cleared
    pub async fn reload(&mut self) -> ConsoleResult<()> {
        self.search("").await
    }

    /// Start a fetch. Any earlier ticket becomes stale.
    pub fn begin_search(&mut self, query: &str) -> FetchTicket {
        let ticket = self.state.begin_fetch(query);
        debug!(generation = ticket.generation(), query = ?ticket.query(), "List fetch started");
        ticket
    }

    /// Run the request for `ticket` without touching local state
    pub async fn fetch(&self, ticket: &FetchTicket) -> ClientResult<Vec<Employee>> {
        self.employees.list(ticket.query()).await
    }

    /// Commit a fetch result. Returns `false` if the ticket was stale.
    pub fn finish_search(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Employee>, String>,
    ) -> bool {
        let generation = ticket.generation();
        let event = match result {
            Ok(employees) => Event::FetchSucceeded {
                generation,
                employees,
            },
            Err(message) => {
                warn!(generation, %message, "List fetch failed");
                Event::FetchFailed {
                    generation,
                    message,
                }
            }
        };
        self.state.apply(event)
    }

    // ========== Gate ==========

    /// Arm the gate for a row action on a listed employee
    pub fn request_action(&mut self, kind: ActionKind, username: &str) -> ConsoleResult<()> {
        let employee = self
            .state
            .find_by_username(username)
            .ok_or_else(|| ConsoleError::NotFoundLocal {
                username: username.to_string(),
            })?;
        let action = PendingAction::for_employee(kind, employee);
        self.request(action);
        Ok(())
    }

    pub fn request(&mut self, action: PendingAction) {
        debug!(kind = %action.kind, username = ?action.target_username, id = ?action.target_id, "Action awaiting PIN");
        self.state.apply(Event::ActionRequested(action));
    }

    /// Close the gate and the add form. No request is made.
    pub fn cancel(&mut self) {
        self.state.apply(Event::Cancelled);
    }

    // ========== Add form ==========

    pub fn open_draft(&mut self) {
        self.state.apply(Event::DraftOpened);
    }

    pub fn edit_draft(&mut self, draft: EmployeeDraft) -> ConsoleResult<()> {
        if !self.state.is_draft_open() {
            return Err(ConsoleError::NoDraft);
        }
        self.state.apply(Event::DraftEdited(draft));
        Ok(())
    }

    /// Check the draft locally and arm the gate for it. Nothing is sent.
    pub fn submit_draft(&mut self) -> ConsoleResult<()> {
        let draft = self.state.draft().ok_or(ConsoleError::NoDraft)?;
        draft.validate()?;
        self.request(PendingAction::add());
        Ok(())
    }

    /// Verify `pin` and run the pending action.
    ///
    /// A refused PIN yields [`Notice::PinRejected`] and leaves the action
    /// pending. A failed operation returns its error and also leaves the
    /// action pending, so the caller may retry or [`cancel`](Self::cancel).
    pub async fn confirm(&mut self, pin: &str) -> ConsoleResult<Notice> {
        let action = self
            .state
            .pending()
            .cloned()
            .ok_or(ConsoleError::NoPendingAction)?;

        // the draft may have been edited since it was submitted
        if action.kind == ActionKind::Add {
            self.state.draft().ok_or(ConsoleError::NoDraft)?.validate()?;
        }

        if !self.pin.verify(pin).await? {
            warn!(kind = %action.kind, "PIN rejected");
            return Ok(Notice::PinRejected);
        }

        let notice = self.dispatch(&action).await?;
        info!(kind = %action.kind, %notice, "Action completed");
        Ok(notice)
    }

    async fn dispatch(&mut self, action: &PendingAction) -> ConsoleResult<Notice> {
        match action.kind {
            ActionKind::Shift => {
                let username = target_username(action)?;
                let current = self
                    .state
                    .find_by_username(&username)
                    .map(|e| e.shift)
                    .ok_or_else(|| ConsoleError::NotFoundLocal {
                        username: username.clone(),
                    })?;
                let shift = self.employees.change_shift(&username, current).await?;
                // local record keeps its old shift until the next fetch
                self.state.apply(Event::ActionCompleted);
                Ok(Notice::ShiftChanged { username, shift })
            }
            ActionKind::Resign => {
                let username = target_username(action)?;
                self.employees.resign(&username).await?;
                self.state.apply(Event::RemovedByUsername(username.clone()));
                self.state.apply(Event::ActionCompleted);
                Ok(Notice::Resigned { username })
            }
            ActionKind::Reset => {
                let id = target_id(action)?;
                self.employees.reset(id).await?;
                self.state.apply(Event::ActionCompleted);
                Ok(Notice::Reset { id })
            }
            ActionKind::Remove => {
                let id = target_id(action)?;
                self.employees.delete(id).await?;
                self.state.apply(Event::RemovedById(id));
                self.state.apply(Event::ActionCompleted);
                Ok(Notice::Removed { id })
            }
            ActionKind::Add => {
                let draft = self.state.draft().cloned().ok_or(ConsoleError::NoDraft)?;
                let created = self.employees.create(&draft).await?;
                self.state.apply(Event::ActionCompleted);
                // the account exists even if the refresh fails; the failure
                // shows up in the list status
                if let Err(e) = self.reload().await {
                    warn!(error = %e, "Refresh after add failed");
                }
                Ok(Notice::Added {
                    username: created.username,
                    user_id: created.user_id,
                })
            }
        }
    }
}

fn target_username(action: &PendingAction) -> ConsoleResult<String> {
    action
        .target_username
        .clone()
        .ok_or(ConsoleError::MissingTarget(action.kind))
}

fn target_id(action: &PendingAction) -> ConsoleResult<i64> {
    action
        .target_id
        .ok_or(ConsoleError::MissingTarget(action.kind))
}
