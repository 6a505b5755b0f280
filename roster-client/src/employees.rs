//! Employee resource client
//!
//! Two endpoint families exist on the backend:
//! - username-addressed form endpoints (`edit-users/by-username/...`) for shift and resign
//! - legacy id-addressed endpoints (`employees/{id}/...`) for create, shift, reset and delete
//!
//! Both are exposed here. The console uses the username family where it exists.

use std::sync::Arc;

use serde_json::Value;
use shared::models::{Employee, EmployeeDraft, NewEmployee, Shift};
use shared::response::server_message;
use shared::CreatedAccount;
use tracing::{debug, info, warn};
use urlencoding::encode;

use crate::http::HttpClient;
use crate::ClientResult;

/// Typed operations against the employee collection
#[derive(Clone)]
pub struct EmployeeClient {
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for EmployeeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeClient").finish_non_exhaustive()
    }
}

impl EmployeeClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// List or search employees.
    ///
    /// A purely numeric query is an id lookup and yields at most one record.
    /// Anything else fetches the whole collection and filters it locally by
    /// case-insensitive substring on full name or username.
    pub async fn list(&self, query: Option<&str>) -> ClientResult<Vec<Employee>> {
        let query = query.map(str::trim).unwrap_or_default();

        if is_id_query(query) {
            let Ok(id) = query.parse::<i64>() else {
                debug!(query, "Id query out of range");
                return Ok(Vec::new());
            };
            return Ok(self.get(id).await?.into_iter().collect());
        }

        let body = self.http.get("users").await?;
        let employees = collection_from(&body);
        debug!(total = employees.len(), query, "Fetched employee collection");

        if query.is_empty() {
            return Ok(employees);
        }
        let needle = query.to_lowercase();
        Ok(employees.into_iter().filter(|e| e.matches(&needle)).collect())
    }

    /// Fetch a single employee with avatar data. A missing record is `None`.
    pub async fn get(&self, id: i64) -> ClientResult<Option<Employee>> {
        let path = format!("users/{id}?include_avatar_base64=true");
        let body = match self.http.get(&path).await {
            Ok(body) => body,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        let record = body.get("user").unwrap_or(&body);
        if record.is_null() {
            return Ok(None);
        }
        Ok(Some(Employee::from_remote(record)?))
    }

    /// Create the employee and its login account in one request.
    ///
    /// The account gets the server's default password
    /// ([`DEFAULT_PASSWORD`](shared::models::DEFAULT_PASSWORD)).
    pub async fn create(&self, draft: &EmployeeDraft) -> ClientResult<CreatedAccount> {
        draft.validate()?;
        let fields = draft
            .form_fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let body = self.http.post_form("add-user-account", fields).await?;

        let created = serde_json::from_value::<CreatedAccount>(body).unwrap_or_else(|_| CreatedAccount {
            user_id: None,
            username: draft.username.trim().to_string(),
        });
        info!(username = %created.username, user_id = ?created.user_id, "Employee created");
        Ok(created)
    }

    /// Switch an employee to the other shift.
    ///
    /// `current` is the shift the caller believes the employee is on; the
    /// toggled value is sent regardless of the server-side state. Returns the
    /// submitted shift.
    pub async fn change_shift(&self, username: &str, current: Shift) -> ClientResult<Shift> {
        let new_shift = current.toggled();
        let path = format!("edit-users/by-username/{}/shift", encode(username));
        self.http
            .put_form(&path, vec![("new_shift".into(), new_shift.as_str().into())])
            .await?;
        info!(username, from = %current, to = %new_shift, "Shift changed");
        Ok(new_shift)
    }

    /// Mark an employee as resigned (`status=off`). The record is kept.
    pub async fn resign(&self, username: &str) -> ClientResult<()> {
        let path = format!("edit-users/by-username/{}/resign", encode(username));
        self.http
            .put_form(&path, vec![("status".into(), "off".into())])
            .await?;
        info!(username, "Employee resigned");
        Ok(())
    }

    pub async fn reset(&self, id: i64) -> ClientResult<()> {
        self.http.post_empty(&format!("employees/{id}/reset")).await?;
        info!(id, "Employee reset");
        Ok(())
    }

    /// Hard delete, unlike [`resign`](Self::resign)
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("employees/{id}")).await?;
        info!(id, "Employee deleted");
        Ok(())
    }

    // ========== Legacy id-addressed API ==========

    /// Legacy JSON create. The password is sent explicitly here.
    pub async fn create_legacy(&self, payload: &NewEmployee) -> ClientResult<Employee> {
        let body = serde_json::to_value(payload)
            .map_err(|e| crate::ClientError::InvalidResponse(e.to_string()))?;
        let created = self.http.post_json("employees", body).await?;
        Ok(Employee::from_remote(&created)?)
    }

    /// Legacy shift toggle; the server picks the new value.
    pub async fn shift_by_id(&self, id: i64) -> ClientResult<()> {
        self.http.post_empty(&format!("employees/{id}/shift")).await?;
        Ok(())
    }

    /// Reset the employee's account password to the server default.
    /// Returns the server's confirmation message, if any.
    pub async fn reset_password(&self, id: i64) -> ClientResult<Option<String>> {
        let body = self
            .http
            .post_empty(&format!("edit-users/{id}/reset-password"))
            .await?;
        info!(id, "Password reset");
        Ok(server_message(&body))
    }
}

fn is_id_query(query: &str) -> bool {
    !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit())
}

/// Accepts `{ "users": [...] }` or a bare array. Records that cannot be
/// normalized are skipped.
fn collection_from(body: &Value) -> Vec<Employee> {
    let records = body
        .get("users")
        .and_then(Value::as_array)
        .or_else(|| body.as_array());
    let Some(records) = records else {
        return Vec::new();
    };
    records
        .iter()
        .filter_map(|raw| match Employee::from_remote(raw) {
            Ok(employee) => Some(employee),
            Err(e) => {
                warn!(error = %e, "Skipping malformed employee record");
                None
            }
        })
        .collect()
}
